//! Risk scoring engine.
//!
//! A stateless, total function from a [`PatientRecord`] to a
//! [`RiskAssessment`]: given a record whose present fields are correctly
//! typed, `assess` always succeeds. Missing attributes contribute zero and
//! lower confidence; unknown categorical labels contribute zero. The only
//! non-determinism is the bounded score perturbation, injectable for tests.

pub mod factors;
pub mod identify;
pub mod jitter;
pub mod recommend;
pub mod score;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::assessment::{PatientRecord, RiskLevel};
use crate::services::risk::jitter::{Perturbation, UniformJitter};
use crate::services::risk::score::{round1, round4, FactorContribution};

/// Complete assessment outcome. Immutable once produced; the engine retains
/// no state between calls.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    /// Final score in `[0, 1]`, perturbed, clamped, 4-decimal precision.
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    /// Severity-tagged factor strings in evaluation order.
    pub risk_factors: Vec<String>,
    /// Tiered guidance strings; duplicates across categories are expected.
    pub recommendations: Vec<String>,
    /// Data completeness percentage, 1-decimal precision.
    pub confidence: f64,
    /// Pre-perturbation contribution per factor.
    pub score_breakdown: BTreeMap<&'static str, FactorContribution>,
}

impl RiskAssessment {
    /// First identified factor, an artifact of evaluation order rather than
    /// a numeric severity ranking.
    pub fn most_significant_factor(&self) -> Option<&str> {
        self.risk_factors.first().map(String::as_str)
    }
}

/// Ascending classification thresholds; first match wins. Total over `[0, 1]`.
fn classify(score: f64) -> RiskLevel {
    if score <= 0.15 {
        RiskLevel::VeryLow
    } else if score <= 0.30 {
        RiskLevel::Low
    } else if score <= 0.50 {
        RiskLevel::Moderate
    } else if score <= 0.70 {
        RiskLevel::High
    } else if score <= 0.85 {
        RiskLevel::VeryHigh
    } else {
        RiskLevel::Critical
    }
}

/// Completeness of the record: configured factors present, as a percentage.
fn confidence(record: &PatientRecord) -> f64 {
    let present = factors::FACTORS
        .iter()
        .filter(|spec| score::factor_value(record, spec.name).is_some())
        .count();
    round1(present as f64 / factors::FACTORS.len() as f64 * 100.0)
}

/// Assess a record with the production perturbation source.
pub fn assess(record: &PatientRecord) -> RiskAssessment {
    assess_with(record, &UniformJitter)
}

/// Assess a record with an explicit perturbation source.
pub fn assess_with(record: &PatientRecord, perturbation: &dyn Perturbation) -> RiskAssessment {
    let raw = score::raw_total(record);
    let perturbed = (raw + perturbation.sample()).clamp(0.0, 1.0);
    let risk_level = classify(perturbed);

    RiskAssessment {
        risk_score: round4(perturbed),
        risk_level,
        risk_factors: identify::identify(record),
        recommendations: recommend::recommend(risk_level, record),
        confidence: confidence(record),
        score_breakdown: score::breakdown(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::{Gender, ResidenceType, SmokingStatus, WorkType};
    use crate::services::risk::jitter::NoJitter;

    fn low_risk_record() -> PatientRecord {
        PatientRecord {
            age: Some(25),
            gender: Some(Gender::Female),
            hypertension: Some(false),
            heart_disease: Some(false),
            ever_married: Some("No".to_string()),
            work_type: Some(WorkType::GovtJob),
            residence_type: Some(ResidenceType::Rural),
            avg_glucose_level: Some(85.0),
            bmi: Some(22.5),
            smoking_status: Some(SmokingStatus::NeverSmoked),
        }
    }

    fn compounded_risk_record() -> PatientRecord {
        PatientRecord {
            age: Some(85),
            gender: Some(Gender::Male),
            hypertension: Some(true),
            heart_disease: Some(true),
            ever_married: Some("Yes".to_string()),
            work_type: Some(WorkType::SelfEmployed),
            residence_type: Some(ResidenceType::Urban),
            avg_glucose_level: Some(280.0),
            bmi: Some(42.0),
            smoking_status: Some(SmokingStatus::Smokes),
        }
    }

    fn extreme_record() -> PatientRecord {
        PatientRecord {
            age: Some(110),
            avg_glucose_level: Some(450.0),
            bmi: Some(55.0),
            ..compounded_risk_record()
        }
    }

    #[test]
    fn score_is_always_in_unit_interval() {
        for record in [
            PatientRecord::default(),
            low_risk_record(),
            compounded_risk_record(),
            extreme_record(),
        ] {
            let outcome = assess(&record);
            assert!((0.0..=1.0).contains(&outcome.risk_score));
            assert!((0.0..=100.0).contains(&outcome.confidence));
        }
    }

    #[test]
    fn healthy_young_record_classifies_low() {
        let outcome = assess_with(&low_risk_record(), &NoJitter);
        assert!(matches!(
            outcome.risk_level,
            RiskLevel::VeryLow | RiskLevel::Low
        ));
        assert!(outcome.risk_score < 0.15);
        assert_eq!(outcome.confidence, 100.0);
    }

    #[test]
    fn compounded_risks_classify_elevated() {
        let outcome = assess_with(&compounded_risk_record(), &NoJitter);
        assert!(outcome.risk_level.is_elevated());
        assert!(outcome.recommendations.contains(
            &"🧠 Learn F.A.S.T. stroke warning signs: Face, Arms, Speech, Time".to_string()
        ));
    }

    #[test]
    fn extreme_record_classifies_critical() {
        let outcome = assess_with(&extreme_record(), &NoJitter);
        assert_eq!(outcome.risk_level, RiskLevel::Critical);
        assert!(outcome
            .recommendations
            .contains(&"🚨 CRITICAL: Seek immediate medical attention (within 24 hours)".to_string()));
        assert!(outcome.recommendations.contains(
            &"🧠 Learn F.A.S.T. stroke warning signs: Face, Arms, Speech, Time".to_string()
        ));
        // Even the worst possible perturbation keeps this record critical.
        assert!(score::raw_total(&extreme_record()) - jitter::JITTER_BOUND > 0.85);
    }

    #[test]
    fn classification_is_total_and_threshold_aligned() {
        assert_eq!(classify(0.0), RiskLevel::VeryLow);
        assert_eq!(classify(0.15), RiskLevel::VeryLow);
        assert_eq!(classify(0.1501), RiskLevel::Low);
        assert_eq!(classify(0.30), RiskLevel::Low);
        assert_eq!(classify(0.50), RiskLevel::Moderate);
        assert_eq!(classify(0.70), RiskLevel::High);
        assert_eq!(classify(0.85), RiskLevel::VeryHigh);
        assert_eq!(classify(0.8501), RiskLevel::Critical);
        assert_eq!(classify(1.0), RiskLevel::Critical);
    }

    #[test]
    fn repeated_calls_agree_within_twice_the_jitter_bound() {
        let record = compounded_risk_record();
        let a = assess(&record);
        let b = assess(&record);
        assert!((a.risk_score - b.risk_score).abs() <= 2.0 * jitter::JITTER_BOUND + 1e-9);
        // Non-numeric outputs are identical across calls.
        assert_eq!(a.risk_factors, b.risk_factors);
        assert_eq!(a.recommendations, b.recommendations);
    }

    #[test]
    fn confidence_tracks_missing_factors() {
        let outcome = assess_with(&PatientRecord::default(), &NoJitter);
        assert_eq!(outcome.confidence, 0.0);

        let partial = PatientRecord {
            age: Some(50),
            hypertension: Some(false),
            bmi: Some(24.0),
            ..PatientRecord::default()
        };
        let outcome = assess_with(&partial, &NoJitter);
        // 3 of 9 configured factors present.
        assert_eq!(outcome.confidence, round1(3.0 / 9.0 * 100.0));
    }

    #[test]
    fn missing_fields_are_not_errors() {
        let outcome = assess_with(&PatientRecord::default(), &NoJitter);
        assert_eq!(outcome.risk_score, 0.0);
        assert_eq!(outcome.risk_level, RiskLevel::VeryLow);
        assert!(outcome.risk_factors.is_empty());
        assert!(outcome.most_significant_factor().is_none());
        assert_eq!(outcome.score_breakdown.len(), 9);
    }

    #[test]
    fn most_significant_factor_is_first_in_evaluation_order() {
        let outcome = assess_with(&compounded_risk_record(), &NoJitter);
        assert_eq!(
            outcome.most_significant_factor(),
            Some("Very advanced age (≥80 years) - Critical Risk")
        );
    }

    #[test]
    fn deterministic_score_matches_hand_computation() {
        // age 85 → band [80,120): 1.0 * (0.5 + 0.5 * 5/40) = 0.5625, * 0.20
        // hypertension → 0.18, heart disease → 0.16
        // glucose 280 → band [250,500): 1.0 * (0.5 + 0.5 * 30/250) = 0.56, * 0.14
        // bmi 42 → band [40,60): 1.0 * (0.5 + 0.5 * 2/20) = 0.55, * 0.12
        // smokes → 0.12, self-employed → 0.8 * 0.04, urban → 0.5 * 0.02, male → 0.6 * 0.02
        let expected = 0.20 * 0.5625
            + 0.18
            + 0.16
            + 0.14 * 0.56
            + 0.12 * 0.55
            + 0.12
            + 0.04 * 0.8
            + 0.02 * 0.5
            + 0.02 * 0.6;
        let outcome = assess_with(&compounded_risk_record(), &NoJitter);
        assert_eq!(outcome.risk_score, round4(expected));
        assert_eq!(outcome.risk_level, RiskLevel::VeryHigh);
    }
}
