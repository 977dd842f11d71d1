//! Feedback service: patient feedback, reactivation requests from
//! deactivated accounts and admin responses.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::feedback::{
    CreateFeedback, Feedback, FeedbackWithNames, ReactivationRequest, RespondFeedback,
};

pub const REACTIVATION_CATEGORY: &str = "reactivation";
pub const REACTIVATION_SUBJECT: &str = "Account Reactivation Request";

#[derive(Debug, Serialize)]
pub struct FeedbackOverview {
    pub items: Vec<FeedbackWithNames>,
    pub pending_count: i64,
    pub responded_count: i64,
}

/// File feedback on behalf of the authenticated user.
pub async fn submit(
    pool: &PgPool,
    user_id: Uuid,
    input: &CreateFeedback,
) -> Result<Feedback, AppError> {
    input.validate()?;
    insert(pool, user_id, &input.subject, &input.message, &input.category).await
}

/// File a reactivation request for a deactivated account.
///
/// This is reachable without a token since a deactivated user cannot log
/// in. The request is stored as ordinary feedback under a reserved
/// category so it shows up in the admin queue. Only deactivated accounts
/// may file one.
pub async fn request_reactivation(
    pool: &PgPool,
    input: &ReactivationRequest,
) -> Result<Feedback, AppError> {
    input.validate()?;

    let is_active: Option<bool> = sqlx::query_scalar("SELECT is_active FROM users WHERE id = $1")
        .bind(input.user_id)
        .fetch_optional(pool)
        .await?;

    match is_active {
        None => return Err(AppError::NotFound("User not found".to_string())),
        Some(true) => {
            return Err(AppError::Validation("Account is already active".to_string()))
        }
        Some(false) => {}
    }

    insert(
        pool,
        input.user_id,
        REACTIVATION_SUBJECT,
        &input.message,
        REACTIVATION_CATEGORY,
    )
    .await
}

async fn insert(
    pool: &PgPool,
    user_id: Uuid,
    subject: &str,
    message: &str,
    category: &str,
) -> Result<Feedback, AppError> {
    let feedback = sqlx::query_as::<_, Feedback>(
        r#"
        INSERT INTO user_feedback (user_id, subject, message, category)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(subject)
    .bind(message)
    .bind(category)
    .fetch_one(pool)
    .await?;

    tracing::info!(%user_id, feedback_id = %feedback.id, category, "Stored feedback");
    Ok(feedback)
}

/// The authenticated user's own feedback, newest first.
pub async fn list_own(pool: &PgPool, user_id: Uuid) -> Result<Vec<Feedback>, AppError> {
    let items = sqlx::query_as::<_, Feedback>(
        "SELECT * FROM user_feedback WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Full feedback queue with submitter names and per-status counts.
pub async fn overview(pool: &PgPool) -> Result<FeedbackOverview, AppError> {
    let items = sqlx::query_as::<_, FeedbackWithNames>(
        r#"
        SELECT f.id, f.subject, f.message, f.category, f.status, f.created_at,
               u.username, u.full_name,
               f.admin_response, f.responded_at, r.full_name AS responded_by_name
        FROM user_feedback f
        JOIN users u ON u.id = f.user_id
        LEFT JOIN users r ON r.id = f.responded_by
        ORDER BY f.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let (pending_count, responded_count) = tokio::try_join!(
        count_by_status(pool, "pending"),
        count_by_status(pool, "responded"),
    )?;

    Ok(FeedbackOverview {
        items,
        pending_count,
        responded_count,
    })
}

async fn count_by_status(pool: &PgPool, status: &str) -> Result<i64, AppError> {
    let count = sqlx::query_scalar(
        "SELECT COUNT(*) FROM user_feedback WHERE status = $1::feedback_status",
    )
    .bind(status)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Record an admin response and mark the feedback responded.
pub async fn respond(
    pool: &PgPool,
    admin_id: Uuid,
    feedback_id: Uuid,
    input: &RespondFeedback,
) -> Result<Feedback, AppError> {
    input.validate()?;

    let feedback = sqlx::query_as::<_, Feedback>(
        r#"
        UPDATE user_feedback
        SET admin_response = $1, responded_by = $2, responded_at = NOW(),
            status = 'responded'
        WHERE id = $3
        RETURNING *
        "#,
    )
    .bind(&input.response)
    .bind(admin_id)
    .bind(feedback_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Feedback not found".to_string()))?;

    tracing::info!(%admin_id, %feedback_id, "Responded to feedback");
    Ok(feedback)
}
