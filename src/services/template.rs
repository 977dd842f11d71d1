//! Assessment template service: admin-maintained prefill presets for the
//! assessment form.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::template::{AssessmentTemplate, CreateTemplate, UpdateTemplate};

pub async fn create(
    pool: &PgPool,
    admin_id: Uuid,
    input: &CreateTemplate,
) -> Result<AssessmentTemplate, AppError> {
    input.validate()?;

    let template = sqlx::query_as::<_, AssessmentTemplate>(
        r#"
        INSERT INTO assessment_templates (name, description, template_data, created_by)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(&input.name)
    .bind(&input.description)
    .bind(&input.template_data)
    .bind(admin_id)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            AppError::Conflict("Template name already exists".to_string())
        }
        other => AppError::Database(other),
    })?;

    tracing::info!(%admin_id, template_id = %template.id, "Created assessment template");
    Ok(template)
}

pub async fn update(
    pool: &PgPool,
    template_id: Uuid,
    input: &UpdateTemplate,
) -> Result<AssessmentTemplate, AppError> {
    input.validate()?;

    sqlx::query_as::<_, AssessmentTemplate>(
        r#"
        UPDATE assessment_templates
        SET name = $1, description = $2, template_data = $3, updated_at = NOW()
        WHERE id = $4
        RETURNING *
        "#,
    )
    .bind(&input.name)
    .bind(&input.description)
    .bind(&input.template_data)
    .bind(template_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Template not found".to_string()))
}

pub async fn toggle_active(pool: &PgPool, template_id: Uuid) -> Result<bool, AppError> {
    sqlx::query_scalar(
        "UPDATE assessment_templates SET is_active = NOT is_active, updated_at = NOW() \
         WHERE id = $1 RETURNING is_active",
    )
    .bind(template_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Template not found".to_string()))
}

/// All templates for admins; patients see only active ones.
pub async fn list(pool: &PgPool, active_only: bool) -> Result<Vec<AssessmentTemplate>, AppError> {
    let sql = if active_only {
        "SELECT * FROM assessment_templates WHERE is_active ORDER BY name"
    } else {
        "SELECT * FROM assessment_templates ORDER BY name"
    };
    let templates = sqlx::query_as::<_, AssessmentTemplate>(sql)
        .fetch_all(pool)
        .await?;
    Ok(templates)
}
