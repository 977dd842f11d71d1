//! Assessment service: runs the scoring engine over validated submissions
//! and owns the stored assessment history.

use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::assessment::{
    Assessment, AssessmentPrefill, AssessmentSummary, SubmitAssessment,
};
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::risk::{self, RiskAssessment};

/// Response for a completed submission: the stored row's identifiers plus
/// the full engine outcome, including the display-only most significant
/// factor (first identified factor by evaluation order).
#[derive(Debug, Serialize)]
pub struct AssessmentOutcome {
    pub assessment_id: Uuid,
    pub patient_ref: String,
    #[serde(flatten)]
    pub result: RiskAssessment,
    pub most_significant_factor: Option<String>,
}

/// Score a validated submission and persist it for the calling user.
pub async fn submit(
    pool: &PgPool,
    user_id: Uuid,
    input: &SubmitAssessment,
) -> Result<AssessmentOutcome, AppError> {
    input.validate()?;

    let record = input.to_record();
    let result = risk::assess(&record);

    let patient_ref = format!("patient_{}", Utc::now().format("%Y%m%d%H%M%S"));

    let risk_factors = serde_json::to_value(&result.risk_factors)
        .map_err(|e| AppError::Internal(format!("Failed to encode risk factors: {e}")))?;
    let recommendations = serde_json::to_value(&result.recommendations)
        .map_err(|e| AppError::Internal(format!("Failed to encode recommendations: {e}")))?;

    let assessment_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO assessments (
            user_id, patient_ref, age, gender, hypertension, heart_disease,
            ever_married, work_type, residence_type, avg_glucose_level, bmi,
            smoking_status, risk_score, risk_level, risk_factors,
            recommendations, confidence
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(&patient_ref)
    .bind(input.age)
    .bind(input.gender)
    .bind(input.hypertension == 1)
    .bind(input.heart_disease == 1)
    .bind(&input.ever_married)
    .bind(input.work_type)
    .bind(input.residence_type)
    .bind(input.avg_glucose_level)
    .bind(input.bmi)
    .bind(input.smoking_status)
    .bind(result.risk_score)
    .bind(result.risk_level)
    .bind(&risk_factors)
    .bind(&recommendations)
    .bind(result.confidence)
    .fetch_one(pool)
    .await?;

    tracing::info!(
        %user_id,
        %assessment_id,
        risk_level = %result.risk_level,
        risk_score = result.risk_score,
        "Stored assessment"
    );

    let most_significant_factor = result.most_significant_factor().map(str::to_string);
    Ok(AssessmentOutcome {
        assessment_id,
        patient_ref,
        result,
        most_significant_factor,
    })
}

/// The calling user's assessment history, newest first.
pub async fn history(
    pool: &PgPool,
    user_id: Uuid,
    pagination: &Pagination,
) -> Result<PagedResult<AssessmentSummary>, AppError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assessments WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    let items = sqlx::query_as::<_, AssessmentSummary>(
        r#"
        SELECT id, patient_ref, age, gender, risk_level, risk_score, created_at
        FROM assessments
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    Ok(PagedResult::new(items, total, pagination))
}

/// One stored assessment, visible only to its owner. The persisted
/// risk_factors and recommendations arrays are returned verbatim.
pub async fn find_by_id(
    pool: &PgPool,
    user_id: Uuid,
    assessment_id: Uuid,
) -> Result<Assessment, AppError> {
    sqlx::query_as::<_, Assessment>(
        "SELECT * FROM assessments WHERE id = $1 AND user_id = $2",
    )
    .bind(assessment_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Assessment not found".to_string()))
}

/// Raw inputs of the user's most recent assessment, for form prefill.
pub async fn latest_prefill(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<AssessmentPrefill, AppError> {
    sqlx::query_as::<_, AssessmentPrefill>(
        r#"
        SELECT age, gender, hypertension, heart_disease, ever_married,
               work_type, residence_type, avg_glucose_level, bmi, smoking_status
        FROM assessments
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("No previous assessments found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::{Gender, ResidenceType, RiskLevel, SmokingStatus, WorkType};

    fn submission() -> SubmitAssessment {
        SubmitAssessment {
            age: 25,
            gender: Gender::Female,
            hypertension: 0,
            heart_disease: 0,
            ever_married: "No".to_string(),
            work_type: WorkType::GovtJob,
            residence_type: ResidenceType::Rural,
            avg_glucose_level: 85.0,
            bmi: 22.5,
            smoking_status: SmokingStatus::NeverSmoked,
        }
    }

    #[test]
    fn outcome_serializes_engine_fields_at_top_level() {
        let result = risk::assess(&submission().to_record());
        let outcome = AssessmentOutcome {
            assessment_id: Uuid::nil(),
            patient_ref: "patient_20250101120000".to_string(),
            most_significant_factor: result.most_significant_factor().map(str::to_string),
            result,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json["risk_score"].is_number());
        assert!(json["risk_level"].is_string());
        assert!(json["score_breakdown"]["age"]["weight"].is_number());
        assert_eq!(json["patient_ref"], "patient_20250101120000");
    }

    #[test]
    fn healthy_submission_scores_low() {
        let outcome = risk::assess(&submission().to_record());
        assert!(matches!(
            outcome.risk_level,
            RiskLevel::VeryLow | RiskLevel::Low
        ));
        assert_eq!(outcome.confidence, 100.0);
    }
}
