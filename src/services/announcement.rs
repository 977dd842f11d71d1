//! Announcement service: admin-published notices shown to patients.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::announcement::{Announcement, AnnouncementNotice, CreateAnnouncement};

pub async fn create(
    pool: &PgPool,
    admin_id: Uuid,
    input: &CreateAnnouncement,
) -> Result<Announcement, AppError> {
    input.validate()?;

    let announcement = sqlx::query_as::<_, Announcement>(
        r#"
        INSERT INTO announcements (title, content, kind, created_by, expires_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(&input.title)
    .bind(&input.content)
    .bind(input.kind)
    .bind(admin_id)
    .bind(input.expires_at)
    .fetch_one(pool)
    .await?;

    tracing::info!(%admin_id, announcement_id = %announcement.id, "Published announcement");
    Ok(announcement)
}

/// Flip an announcement's active flag, returning the new value.
pub async fn toggle_active(pool: &PgPool, announcement_id: Uuid) -> Result<bool, AppError> {
    sqlx::query_scalar(
        "UPDATE announcements SET is_active = NOT is_active WHERE id = $1 RETURNING is_active",
    )
    .bind(announcement_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Announcement not found".to_string()))
}

/// All announcements for admin management, newest first.
pub async fn list_all(pool: &PgPool) -> Result<Vec<Announcement>, AppError> {
    let announcements = sqlx::query_as::<_, Announcement>(
        "SELECT * FROM announcements ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(announcements)
}

/// The five most recent active announcements, for the patient dashboard.
pub async fn active_notices(pool: &PgPool) -> Result<Vec<AnnouncementNotice>, AppError> {
    let notices = sqlx::query_as::<_, AnnouncementNotice>(
        r#"
        SELECT title, content, kind, created_at
        FROM announcements
        WHERE is_active AND (expires_at IS NULL OR expires_at > NOW())
        ORDER BY created_at DESC
        LIMIT 5
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(notices)
}
