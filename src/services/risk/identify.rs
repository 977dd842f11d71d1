//! Factor identifier: severity-tagged explanations derived from the raw
//! record fields, independent of the weighted score.
//!
//! Families are evaluated in a fixed order and at most one string fires per
//! family (highest tier first). The resulting order is the evaluation order,
//! not a severity ranking; callers surface the first element as the "most
//! significant factor" purely as an artifact of that order.

use crate::models::assessment::{
    Gender, PatientRecord, ResidenceType, SmokingStatus, WorkType,
};

/// Descending (threshold, label) tiers; the first tier at or below the value
/// fires, the rest of the family stays silent.
type Tier = (f64, &'static str);

const AGE_TIERS: [Tier; 4] = [
    (80.0, "Very advanced age (≥80 years) - Critical Risk"),
    (70.0, "Advanced age (70-79 years) - High Risk"),
    (60.0, "Mature age (60-69 years) - Moderate Risk"),
    (50.0, "Middle age (50-59 years) - Low Risk"),
];

const GLUCOSE_TIERS: [Tier; 4] = [
    (250.0, "Severely elevated glucose (≥250 mg/dL) - Critical Risk"),
    (180.0, "Poorly controlled diabetes (180-249 mg/dL) - High Risk"),
    (126.0, "Diabetes (126-179 mg/dL) - Moderate Risk"),
    (100.0, "Pre-diabetes (100-125 mg/dL) - Low Risk"),
];

const BMI_TIERS: [Tier; 4] = [
    (40.0, "Severe obesity (BMI ≥40) - Critical Risk"),
    (35.0, "Moderate obesity (BMI 35-39.9) - High Risk"),
    (30.0, "Obesity (BMI 30-34.9) - Moderate Risk"),
    (25.0, "Overweight (BMI 25-29.9) - Low Risk"),
];

const UNDERWEIGHT_LABEL: &str = "Underweight (BMI <18.5) - Low Risk";

/// First tier whose threshold the value reaches, top tier first.
fn matched_tier(tiers: &[Tier], value: f64) -> Option<&'static str> {
    tiers
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(_, label)| *label)
}

/// Identify present risk factors in evaluation order.
pub fn identify(record: &PatientRecord) -> Vec<String> {
    let mut factors = Vec::new();

    if let Some(age) = record.age {
        if let Some(label) = matched_tier(&AGE_TIERS, f64::from(age)) {
            factors.push(label.to_string());
        }
    }

    if record.hypertension == Some(true) {
        factors.push("Hypertension - High Risk".to_string());
    }
    if record.heart_disease == Some(true) {
        factors.push("Heart disease - High Risk".to_string());
    }

    if let Some(glucose) = record.avg_glucose_level {
        if let Some(label) = matched_tier(&GLUCOSE_TIERS, glucose) {
            factors.push(label.to_string());
        }
    }

    if let Some(bmi) = record.bmi {
        if let Some(label) = matched_tier(&BMI_TIERS, bmi) {
            factors.push(label.to_string());
        } else if bmi < 18.5 {
            factors.push(UNDERWEIGHT_LABEL.to_string());
        }
    }

    match record.smoking_status {
        Some(SmokingStatus::Smokes) => {
            factors.push("Current smoker - Critical Risk".to_string());
        }
        Some(SmokingStatus::FormerlySmoked) => {
            factors.push("Former smoker - Moderate Risk".to_string());
        }
        Some(SmokingStatus::Unknown) => {
            factors.push("Unknown smoking status - Low Risk".to_string());
        }
        Some(SmokingStatus::NeverSmoked) | None => {}
    }

    match record.work_type {
        Some(WorkType::SelfEmployed) => {
            factors.push("Self-employed work - Moderate Risk".to_string());
        }
        Some(WorkType::Private) => {
            factors.push("Private sector work - Low Risk".to_string());
        }
        _ => {}
    }

    if record.gender == Some(Gender::Male) {
        factors.push("Male gender - Low Risk".to_string());
    }
    if record.residence_type == Some(ResidenceType::Urban) {
        factors.push("Urban residence - Low Risk".to_string());
    }

    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_tier_per_family() {
        let record = PatientRecord {
            age: Some(85),
            avg_glucose_level: Some(300.0),
            ..PatientRecord::default()
        };
        let factors = identify(&record);
        assert_eq!(
            factors,
            vec![
                "Very advanced age (≥80 years) - Critical Risk",
                "Severely elevated glucose (≥250 mg/dL) - Critical Risk",
            ]
        );
    }

    #[test]
    fn age_tiers_are_mutually_exclusive() {
        for (age, expected) in [
            (49, None),
            (50, Some("Middle age (50-59 years) - Low Risk")),
            (60, Some("Mature age (60-69 years) - Moderate Risk")),
            (79, Some("Advanced age (70-79 years) - High Risk")),
            (80, Some("Very advanced age (≥80 years) - Critical Risk")),
        ] {
            let record = PatientRecord {
                age: Some(age),
                ..PatientRecord::default()
            };
            let factors = identify(&record);
            match expected {
                Some(label) => assert_eq!(factors, vec![label], "age {age}"),
                None => assert!(factors.is_empty(), "age {age}"),
            }
        }
    }

    #[test]
    fn underweight_bmi_is_flagged() {
        let record = PatientRecord {
            bmi: Some(17.0),
            ..PatientRecord::default()
        };
        assert_eq!(identify(&record), vec![UNDERWEIGHT_LABEL]);
    }

    #[test]
    fn normal_bmi_is_silent() {
        let record = PatientRecord {
            bmi: Some(22.0),
            ..PatientRecord::default()
        };
        assert!(identify(&record).is_empty());
    }

    #[test]
    fn evaluation_order_is_stable() {
        let record = PatientRecord {
            age: Some(72),
            hypertension: Some(true),
            heart_disease: Some(true),
            avg_glucose_level: Some(130.0),
            bmi: Some(31.0),
            smoking_status: Some(SmokingStatus::FormerlySmoked),
            work_type: Some(WorkType::Private),
            residence_type: Some(ResidenceType::Urban),
            gender: Some(Gender::Male),
            ever_married: Some("Yes".to_string()),
        };
        let factors = identify(&record);
        assert_eq!(
            factors,
            vec![
                "Advanced age (70-79 years) - High Risk",
                "Hypertension - High Risk",
                "Heart disease - High Risk",
                "Diabetes (126-179 mg/dL) - Moderate Risk",
                "Obesity (BMI 30-34.9) - Moderate Risk",
                "Former smoker - Moderate Risk",
                "Private sector work - Low Risk",
                "Male gender - Low Risk",
                "Urban residence - Low Risk",
            ]
        );
        // Identical input yields identical output, in the same order.
        assert_eq!(identify(&record), factors);
    }
}
