//! Score calculator: applies each factor's strategy to the record and
//! aggregates the weighted total, plus the per-factor breakdown diagnostic.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::assessment::PatientRecord;
use crate::services::risk::factors::{Band, FactorSpec, Strategy, FACTORS};

/// Raw value of one factor as seen by the calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FactorValue {
    Number(f64),
    Flag(bool),
    Label(&'static str),
}

/// Per-factor entry of the score breakdown. Contributions are
/// pre-perturbation and rounded to 4 decimals independently.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FactorContribution {
    pub contribution: f64,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

/// Fetch the raw value of a configured factor from the record, if present.
pub fn factor_value(record: &PatientRecord, name: &str) -> Option<FactorValue> {
    match name {
        "age" => record.age.map(|v| FactorValue::Number(f64::from(v))),
        "hypertension" => record.hypertension.map(FactorValue::Flag),
        "heart_disease" => record.heart_disease.map(FactorValue::Flag),
        "avg_glucose_level" => record.avg_glucose_level.map(FactorValue::Number),
        "bmi" => record.bmi.map(FactorValue::Number),
        "smoking_status" => record.smoking_status.map(|v| FactorValue::Label(v.label())),
        "work_type" => record.work_type.map(|v| FactorValue::Label(v.label())),
        "residence_type" => record.residence_type.map(|v| FactorValue::Label(v.label())),
        "gender" => record.gender.map(|v| FactorValue::Label(v.label())),
        _ => None,
    }
}

/// Score one graduated value against its bands: locate the single band
/// containing the value and interpolate linearly within it. A value outside
/// every band scores zero.
fn graduated_score(bands: &[Band], value: f64) -> f64 {
    for band in bands {
        if value >= band.lower && value < band.upper {
            if band.upper > band.lower {
                let position = (value - band.lower) / (band.upper - band.lower);
                return band.multiplier * (0.5 + 0.5 * position);
            }
            return band.multiplier;
        }
    }
    0.0
}

/// Normalized factor score in `[0, 1]` for one (strategy, value) pair.
fn strategy_score(strategy: &Strategy, value: &FactorValue) -> f64 {
    match (strategy, value) {
        (Strategy::Graduated(bands), FactorValue::Number(v)) => graduated_score(bands, *v),
        (Strategy::Binary, FactorValue::Flag(set)) => {
            if *set {
                1.0
            } else {
                0.0
            }
        }
        (Strategy::Categorical(table), FactorValue::Label(label)) => table
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, multiplier)| *multiplier)
            .unwrap_or(0.0),
        // Mismatched value shape for the strategy: no contribution.
        _ => 0.0,
    }
}

/// Weighted contribution of one factor, zero when absent from the record.
fn contribution(spec: &FactorSpec, record: &PatientRecord) -> f64 {
    match factor_value(record, spec.name) {
        Some(value) => spec.weight * strategy_score(&spec.strategy, &value),
        None => 0.0,
    }
}

/// Aggregate weighted total before perturbation and clamping.
pub fn raw_total(record: &PatientRecord) -> f64 {
    FACTORS.iter().map(|spec| contribution(spec, record)).sum()
}

/// Per-factor breakdown for display. Absent factors appear with a zero
/// contribution and no value, mirroring their effect on the total.
pub fn breakdown(record: &PatientRecord) -> BTreeMap<&'static str, FactorContribution> {
    FACTORS
        .iter()
        .map(|spec| {
            let value = factor_value(record, spec.name);
            let entry = FactorContribution {
                contribution: round4(contribution(spec, record)),
                weight: spec.weight,
                value: value.map(|v| match v {
                    FactorValue::Number(n) => serde_json::json!(n),
                    FactorValue::Flag(flag) => serde_json::json!(i32::from(flag)),
                    FactorValue::Label(label) => serde_json::json!(label),
                }),
            };
            (spec.name, entry)
        })
        .collect()
}

/// Round to 4 decimal places, the public precision of scores.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Round to 1 decimal place, the public precision of confidence.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::{
        Gender, ResidenceType, SmokingStatus, WorkType,
    };

    fn empty() -> PatientRecord {
        PatientRecord::default()
    }

    #[test]
    fn empty_record_scores_zero() {
        assert_eq!(raw_total(&empty()), 0.0);
    }

    #[test]
    fn graduated_interpolates_within_band() {
        // age 65 sits midway through [60, 70) with multiplier 0.6:
        // 0.6 * (0.5 + 0.5 * 0.5) = 0.45, weighted by 0.20 → 0.09
        let record = PatientRecord {
            age: Some(65),
            ..empty()
        };
        assert!((raw_total(&record) - 0.09).abs() < 1e-12);
    }

    #[test]
    fn graduated_band_boundary_takes_upper_bucket() {
        // age 40 belongs to [40, 50) (multiplier 0.1), not [0, 40).
        let record = PatientRecord {
            age: Some(40),
            ..empty()
        };
        // position 0 within the band → 0.1 * 0.5 * 0.20
        assert!((raw_total(&record) - 0.1 * 0.5 * 0.20).abs() < 1e-12);
    }

    #[test]
    fn graduated_value_outside_all_bands_scores_zero() {
        let record = PatientRecord {
            avg_glucose_level: Some(600.0),
            ..empty()
        };
        assert_eq!(raw_total(&record), 0.0);
    }

    #[test]
    fn binary_factor_contributes_full_weight() {
        let record = PatientRecord {
            hypertension: Some(true),
            heart_disease: Some(false),
            ..empty()
        };
        assert!((raw_total(&record) - 0.18).abs() < 1e-12);
    }

    #[test]
    fn categorical_factor_uses_table_multiplier() {
        let record = PatientRecord {
            smoking_status: Some(SmokingStatus::Smokes),
            ..empty()
        };
        assert!((raw_total(&record) - 0.12).abs() < 1e-12);

        let record = PatientRecord {
            smoking_status: Some(SmokingStatus::Unknown),
            ..empty()
        };
        assert!((raw_total(&record) - 0.12 * 0.2).abs() < 1e-12);
    }

    #[test]
    fn age_contribution_is_monotonic() {
        let mut last = -1.0;
        for age in [30, 50, 70, 90] {
            let record = PatientRecord {
                age: Some(age),
                ..empty()
            };
            let total = raw_total(&record);
            assert!(total >= last, "age {age} decreased the contribution");
            last = total;
        }
    }

    #[test]
    fn glucose_and_bmi_contributions_are_monotonic() {
        for (values, build) in [
            (
                vec![80.0, 110.0, 150.0, 200.0, 300.0],
                (|v| PatientRecord {
                    avg_glucose_level: Some(v),
                    ..PatientRecord::default()
                }) as fn(f64) -> PatientRecord,
            ),
            (
                vec![20.0, 27.0, 32.0, 37.0, 45.0],
                (|v| PatientRecord {
                    bmi: Some(v),
                    ..PatientRecord::default()
                }) as fn(f64) -> PatientRecord,
            ),
        ] {
            let mut last = -1.0;
            for v in values {
                let total = raw_total(&build(v));
                assert!(total >= last, "value {v} decreased the contribution");
                last = total;
            }
        }
    }

    #[test]
    fn underweight_bmi_scores_above_normal_bmi() {
        let underweight = PatientRecord {
            bmi: Some(17.0),
            ..empty()
        };
        let normal = PatientRecord {
            bmi: Some(22.0),
            ..empty()
        };
        assert!(raw_total(&underweight) > raw_total(&normal));
    }

    #[test]
    fn breakdown_covers_every_factor() {
        let record = PatientRecord {
            age: Some(72),
            hypertension: Some(true),
            gender: Some(Gender::Male),
            work_type: Some(WorkType::Private),
            residence_type: Some(ResidenceType::Urban),
            ..empty()
        };
        let map = breakdown(&record);
        assert_eq!(map.len(), 9);

        let hypertension = &map["hypertension"];
        assert_eq!(hypertension.contribution, 0.18);
        assert_eq!(hypertension.value, Some(serde_json::json!(1)));

        // Absent factor keeps its weight visible but has no value.
        let bmi = &map["bmi"];
        assert_eq!(bmi.contribution, 0.0);
        assert_eq!(bmi.weight, 0.12);
        assert!(bmi.value.is_none());
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(round4(0.123_456), 0.1235);
        assert_eq!(round1(88.88), 88.9);
    }
}
