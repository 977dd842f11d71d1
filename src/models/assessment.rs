//! Assessment model: patient attributes, risk levels, and submission DTOs.
//!
//! Categorical attribute labels mirror the stroke dataset vocabulary
//! ("never smoked", "Govt_job", ...). The string form returned by `label()`
//! is the canonical key used by the scoring engine's category tables and
//! must stay in sync with the serde/sqlx renames.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

// -- Enums matching PostgreSQL --

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "gender")]
pub enum Gender {
    Female,
    Male,
    Other,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "work_type")]
pub enum WorkType {
    #[sqlx(rename = "children")]
    #[serde(rename = "children")]
    Children,
    #[sqlx(rename = "Govt_job")]
    #[serde(rename = "Govt_job")]
    GovtJob,
    #[sqlx(rename = "Never_worked")]
    #[serde(rename = "Never_worked")]
    NeverWorked,
    Private,
    #[sqlx(rename = "Self-employed")]
    #[serde(rename = "Self-employed")]
    SelfEmployed,
}

impl WorkType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Children => "children",
            Self::GovtJob => "Govt_job",
            Self::NeverWorked => "Never_worked",
            Self::Private => "Private",
            Self::SelfEmployed => "Self-employed",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "residence_type")]
pub enum ResidenceType {
    Rural,
    Urban,
}

impl ResidenceType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rural => "Rural",
            Self::Urban => "Urban",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "smoking_status")]
pub enum SmokingStatus {
    #[sqlx(rename = "never smoked")]
    #[serde(rename = "never smoked")]
    NeverSmoked,
    #[sqlx(rename = "formerly smoked")]
    #[serde(rename = "formerly smoked")]
    FormerlySmoked,
    #[sqlx(rename = "smokes")]
    #[serde(rename = "smokes")]
    Smokes,
    Unknown,
}

impl SmokingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NeverSmoked => "never smoked",
            Self::FormerlySmoked => "formerly smoked",
            Self::Smokes => "smokes",
            Self::Unknown => "Unknown",
        }
    }
}

/// Ordered risk classification. Variant order is ascending severity, so the
/// derived `Ord` matches the threshold order used by the classifier.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, PartialOrd, Ord,
)]
#[sqlx(type_name = "risk_level")]
pub enum RiskLevel {
    #[sqlx(rename = "Very Low")]
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Moderate,
    High,
    #[sqlx(rename = "Very High")]
    #[serde(rename = "Very High")]
    VeryHigh,
    Critical,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::Critical => "Critical",
        }
    }

    /// Levels that trigger clinical follow-up workflows.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Self::High | Self::VeryHigh | Self::Critical)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// -- Engine input --

/// Patient attributes handed to the scoring engine.
///
/// Every scored attribute is optional: a missing attribute contributes zero
/// to the score and lowers the confidence estimate, it is never an error.
/// `ever_married` is carried through for the record but not scored.
#[derive(Debug, Clone, Default)]
pub struct PatientRecord {
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub hypertension: Option<bool>,
    pub heart_disease: Option<bool>,
    pub ever_married: Option<String>,
    pub work_type: Option<WorkType>,
    pub residence_type: Option<ResidenceType>,
    pub avg_glucose_level: Option<f64>,
    pub bmi: Option<f64>,
    pub smoking_status: Option<SmokingStatus>,
}

// -- Persistence --

/// Stored assessment row: raw inputs plus the engine outputs.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assessment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub patient_ref: String,
    pub age: i32,
    pub gender: Gender,
    pub hypertension: bool,
    pub heart_disease: bool,
    pub ever_married: String,
    pub work_type: WorkType,
    pub residence_type: ResidenceType,
    pub avg_glucose_level: f64,
    pub bmi: f64,
    pub smoking_status: SmokingStatus,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    /// JSON array of factor strings, stored verbatim as produced.
    pub risk_factors: serde_json::Value,
    /// JSON array of recommendation strings, stored verbatim as produced.
    pub recommendations: serde_json::Value,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
}

/// Compact row for history listings.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AssessmentSummary {
    pub id: Uuid,
    pub patient_ref: String,
    pub age: i32,
    pub gender: Gender,
    pub risk_level: RiskLevel,
    pub risk_score: f64,
    pub created_at: DateTime<Utc>,
}

// -- Request DTOs --

/// Assessment submission. All ten patient fields are required here; the
/// upstream validation keeps malformed input away from the engine, which
/// itself has no failure path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitAssessment {
    #[validate(range(min = 0, max = 120))]
    pub age: i32,
    pub gender: Gender,
    /// 0/1 flag, as submitted by the assessment form.
    #[validate(range(min = 0, max = 1))]
    pub hypertension: i16,
    /// 0/1 flag, as submitted by the assessment form.
    #[validate(range(min = 0, max = 1))]
    pub heart_disease: i16,
    #[validate(length(min = 1))]
    pub ever_married: String,
    pub work_type: WorkType,
    pub residence_type: ResidenceType,
    #[validate(range(min = 0.0, max = 1000.0))]
    pub avg_glucose_level: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub bmi: f64,
    pub smoking_status: SmokingStatus,
}

impl SubmitAssessment {
    /// Build the fully populated record handed to the scoring engine.
    pub fn to_record(&self) -> PatientRecord {
        PatientRecord {
            age: Some(self.age),
            gender: Some(self.gender),
            hypertension: Some(self.hypertension == 1),
            heart_disease: Some(self.heart_disease == 1),
            ever_married: Some(self.ever_married.clone()),
            work_type: Some(self.work_type),
            residence_type: Some(self.residence_type),
            avg_glucose_level: Some(self.avg_glucose_level),
            bmi: Some(self.bmi),
            smoking_status: Some(self.smoking_status),
        }
    }
}

/// Raw inputs of the most recent assessment, returned for form prefill.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AssessmentPrefill {
    pub age: i32,
    pub gender: Gender,
    pub hypertension: bool,
    pub heart_disease: bool,
    pub ever_married: String,
    pub work_type: WorkType,
    pub residence_type: ResidenceType,
    pub avg_glucose_level: f64,
    pub bmi: f64,
    pub smoking_status: SmokingStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorical_labels_match_serde_renames() {
        let json = serde_json::to_string(&SmokingStatus::NeverSmoked).unwrap();
        assert_eq!(json, "\"never smoked\"");
        let json = serde_json::to_string(&WorkType::SelfEmployed).unwrap();
        assert_eq!(json, "\"Self-employed\"");
        let json = serde_json::to_string(&WorkType::GovtJob).unwrap();
        assert_eq!(json, "\"Govt_job\"");
    }

    #[test]
    fn risk_level_round_trips_through_display_label() {
        for level in [
            RiskLevel::VeryLow,
            RiskLevel::Low,
            RiskLevel::Moderate,
            RiskLevel::High,
            RiskLevel::VeryHigh,
            RiskLevel::Critical,
        ] {
            let json = serde_json::to_string(&level).unwrap();
            assert_eq!(json, format!("\"{level}\""));
        }
    }

    #[test]
    fn risk_level_ordering_is_ascending() {
        assert!(RiskLevel::VeryLow < RiskLevel::Low);
        assert!(RiskLevel::VeryHigh < RiskLevel::Critical);
        assert!(RiskLevel::High.is_elevated());
        assert!(!RiskLevel::Moderate.is_elevated());
    }

    #[test]
    fn submission_converts_flags_to_booleans() {
        let submit = SubmitAssessment {
            age: 61,
            gender: Gender::Male,
            hypertension: 1,
            heart_disease: 0,
            ever_married: "Yes".to_string(),
            work_type: WorkType::Private,
            residence_type: ResidenceType::Urban,
            avg_glucose_level: 130.0,
            bmi: 27.5,
            smoking_status: SmokingStatus::FormerlySmoked,
        };
        let record = submit.to_record();
        assert_eq!(record.hypertension, Some(true));
        assert_eq!(record.heart_disease, Some(false));
        assert_eq!(record.age, Some(61));
    }

    #[test]
    fn submission_validation_rejects_out_of_range_age() {
        let submit = SubmitAssessment {
            age: 150,
            gender: Gender::Female,
            hypertension: 0,
            heart_disease: 0,
            ever_married: "No".to_string(),
            work_type: WorkType::Private,
            residence_type: ResidenceType::Rural,
            avg_glucose_level: 90.0,
            bmi: 22.0,
            smoking_status: SmokingStatus::NeverSmoked,
        };
        assert!(submit.validate().is_err());
    }
}
