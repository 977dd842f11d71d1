//! Recommendation generator: tiered guidance derived from the risk level and
//! the specific factor values.
//!
//! Output order is fixed: the four base strings for the level, then the
//! condition-specific triggers in a fixed order, then the stroke-awareness
//! reminder for elevated levels. Duplicated themes across categories are
//! expected; each trigger fires independently.

use crate::models::assessment::{PatientRecord, RiskLevel, SmokingStatus};

const VERY_LOW_BASE: [&str; 4] = [
    "Maintain current healthy lifestyle",
    "Annual health check-ups recommended",
    "Continue regular physical activity",
    "Maintain balanced diet",
];

const LOW_BASE: [&str; 4] = [
    "Continue preventive care measures",
    "Monitor blood pressure quarterly",
    "Maintain healthy diet and exercise routine",
    "Consider lifestyle optimization",
];

const MODERATE_BASE: [&str; 4] = [
    "Schedule medical consultation within 2-4 weeks",
    "Monitor blood pressure monthly",
    "Implement structured exercise program",
    "Consider dietary consultation",
];

const HIGH_BASE: [&str; 4] = [
    "🚨 Schedule medical consultation within 1 week",
    "Monitor blood pressure weekly",
    "Implement immediate lifestyle changes",
    "Consider cardiovascular screening",
];

const VERY_HIGH_BASE: [&str; 4] = [
    "🚨 URGENT: Schedule medical consultation within 2-3 days",
    "Daily blood pressure monitoring",
    "Immediate lifestyle intervention required",
    "Comprehensive cardiovascular assessment needed",
];

const CRITICAL_BASE: [&str; 4] = [
    "🚨 CRITICAL: Seek immediate medical attention (within 24 hours)",
    "Continuous health monitoring required",
    "Emergency action plan needed",
    "Immediate specialist referral recommended",
];

const STROKE_AWARENESS: &str = "🧠 Learn F.A.S.T. stroke warning signs: Face, Arms, Speech, Time";

fn base_for(level: RiskLevel) -> &'static [&'static str; 4] {
    match level {
        RiskLevel::VeryLow => &VERY_LOW_BASE,
        RiskLevel::Low => &LOW_BASE,
        RiskLevel::Moderate => &MODERATE_BASE,
        RiskLevel::High => &HIGH_BASE,
        RiskLevel::VeryHigh => &VERY_HIGH_BASE,
        RiskLevel::Critical => &CRITICAL_BASE,
    }
}

/// Generate the ordered recommendation list for one assessment.
pub fn recommend(level: RiskLevel, record: &PatientRecord) -> Vec<String> {
    let mut recommendations: Vec<String> =
        base_for(level).iter().map(|s| s.to_string()).collect();

    if record.hypertension == Some(true) {
        recommendations
            .push("Follow prescribed hypertension medication regimen strictly".to_string());
    }
    if record.heart_disease == Some(true) {
        recommendations
            .push("Cardiology follow-up and medication compliance essential".to_string());
    }

    // Highest matching tier only, per condition.
    if let Some(glucose) = record.avg_glucose_level {
        if glucose >= 250.0 {
            recommendations.push("🚨 URGENT: Immediate diabetes management required".to_string());
        } else if glucose >= 126.0 {
            recommendations
                .push("Diabetes management and glucose monitoring essential".to_string());
        } else if glucose >= 100.0 {
            recommendations
                .push("Pre-diabetes management - lifestyle changes recommended".to_string());
        }
    }

    if let Some(bmi) = record.bmi {
        if bmi >= 35.0 {
            recommendations
                .push("🚨 Urgent weight management - consider bariatric consultation".to_string());
        } else if bmi >= 30.0 {
            recommendations.push("Weight management program recommended".to_string());
        } else if bmi >= 25.0 {
            recommendations
                .push("Gradual weight reduction through diet and exercise".to_string());
        }
    }

    match record.smoking_status {
        Some(SmokingStatus::Smokes) => recommendations.push(
            "🚨 CRITICAL: Immediate smoking cessation required - seek professional help"
                .to_string(),
        ),
        Some(SmokingStatus::FormerlySmoked) => recommendations
            .push("Continue smoke-free lifestyle - avoid relapse triggers".to_string()),
        _ => {}
    }

    if let Some(age) = record.age {
        if age >= 70 {
            recommendations.push("Regular geriatric health assessments recommended".to_string());
        } else if age >= 60 {
            recommendations.push("Enhanced preventive care for mature adults".to_string());
        }
    }

    if level.is_elevated() {
        recommendations.push(STROKE_AWARENESS.to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::Gender;

    #[test]
    fn every_level_gets_four_base_strings() {
        let record = PatientRecord::default();
        for level in [
            RiskLevel::VeryLow,
            RiskLevel::Low,
            RiskLevel::Moderate,
            RiskLevel::High,
            RiskLevel::VeryHigh,
            RiskLevel::Critical,
        ] {
            let recs = recommend(level, &record);
            assert_eq!(&recs[..4], base_for(level).map(String::from));
        }
    }

    #[test]
    fn stroke_awareness_only_for_elevated_levels() {
        let record = PatientRecord::default();
        for (level, expected) in [
            (RiskLevel::Moderate, false),
            (RiskLevel::High, true),
            (RiskLevel::VeryHigh, true),
            (RiskLevel::Critical, true),
        ] {
            let recs = recommend(level, &record);
            assert_eq!(recs.last().map(String::as_str) == Some(STROKE_AWARENESS), expected);
        }
    }

    #[test]
    fn glucose_trigger_uses_highest_tier_only() {
        let record = PatientRecord {
            avg_glucose_level: Some(280.0),
            ..PatientRecord::default()
        };
        let recs = recommend(RiskLevel::Low, &record);
        assert!(recs.contains(&"🚨 URGENT: Immediate diabetes management required".to_string()));
        assert!(!recs
            .iter()
            .any(|r| r == "Diabetes management and glucose monitoring essential"));
    }

    #[test]
    fn independent_triggers_stack() {
        let record = PatientRecord {
            age: Some(74),
            hypertension: Some(true),
            heart_disease: Some(true),
            bmi: Some(36.0),
            smoking_status: Some(SmokingStatus::Smokes),
            gender: Some(Gender::Male),
            ..PatientRecord::default()
        };
        let recs = recommend(RiskLevel::Critical, &record);
        // 4 base + hypertension + heart disease + bmi + smoking + age + F.A.S.T.
        assert_eq!(recs.len(), 10);
        assert_eq!(
            recs[0],
            "🚨 CRITICAL: Seek immediate medical attention (within 24 hours)"
        );
        assert_eq!(recs.last().map(String::as_str), Some(STROKE_AWARENESS));
    }

    #[test]
    fn output_is_deterministic() {
        let record = PatientRecord {
            age: Some(66),
            avg_glucose_level: Some(110.0),
            bmi: Some(27.0),
            smoking_status: Some(SmokingStatus::FormerlySmoked),
            ..PatientRecord::default()
        };
        let a = recommend(RiskLevel::Moderate, &record);
        let b = recommend(RiskLevel::Moderate, &record);
        assert_eq!(a, b);
    }
}
