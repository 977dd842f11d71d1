//! Admin service: platform statistics, population-level risk analytics and
//! user management.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::assessment::RiskLevel;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::user::{UserRole, UserWithActivity};

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct RiskLevelCount {
    pub risk_level: RiskLevel,
    pub count: i64,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct DailyCount {
    pub day: chrono::NaiveDate,
    pub count: i64,
}

/// One entry in the current high-risk case list.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct HighRiskCase {
    pub assessment_id: Uuid,
    pub patient_ref: String,
    pub username: String,
    pub full_name: String,
    pub age: i32,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Share of assessments exhibiting each major contributing condition,
/// as percentages of all stored assessments.
#[derive(Debug, Serialize, Default)]
pub struct CausePercentages {
    pub hypertension: f64,
    pub heart_disease: f64,
    pub high_glucose: f64,
    pub obesity: f64,
    pub smoking: f64,
    pub advanced_age: f64,
}

/// One row in the admin's all-assessments listing.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct AssessmentWithOwner {
    pub id: Uuid,
    pub patient_ref: String,
    pub username: String,
    pub full_name: String,
    pub age: i32,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub confidence: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct PlatformStats {
    pub total_users: i64,
    pub total_assessments: i64,
    pub assessments_today: i64,
    pub high_risk_count: i64,
    pub critical_count: i64,
    pub active_users_week: i64,
    pub avg_risk_score: f64,
    pub risk_distribution: Vec<RiskLevelCount>,
    pub daily_assessments: Vec<DailyCount>,
    pub high_risk_cases: Vec<HighRiskCase>,
    pub cause_percentages: CausePercentages,
}

/// Aggregate platform statistics for the admin dashboard.
///
/// Scalar counts run in parallel; the grouped queries follow sequentially
/// since they share the pool anyway.
pub async fn platform_stats(pool: &PgPool) -> Result<PlatformStats, AppError> {
    let (
        total_users,
        total_assessments,
        assessments_today,
        high_risk_count,
        critical_count,
        active_users_week,
    ) =
        tokio::try_join!(
            count_scalar(pool, "SELECT COUNT(*) FROM users WHERE role = 'Patient'"),
            count_scalar(pool, "SELECT COUNT(*) FROM assessments"),
            count_scalar(
                pool,
                "SELECT COUNT(*) FROM assessments WHERE created_at::date = CURRENT_DATE",
            ),
            count_scalar(
                pool,
                "SELECT COUNT(*) FROM assessments WHERE risk_level IN ('High', 'Very High')",
            ),
            count_scalar(
                pool,
                "SELECT COUNT(*) FROM assessments WHERE risk_level = 'Critical'",
            ),
            count_scalar(
                pool,
                "SELECT COUNT(DISTINCT user_id) FROM assessments \
                 WHERE created_at > NOW() - INTERVAL '7 days'",
            ),
        )?;

    let avg_risk_score: Option<f64> =
        sqlx::query_scalar("SELECT AVG(risk_score) FROM assessments")
            .fetch_one(pool)
            .await?;

    let risk_distribution = sqlx::query_as::<_, RiskLevelCount>(
        r#"
        SELECT risk_level, COUNT(*) AS count
        FROM assessments
        GROUP BY risk_level
        ORDER BY risk_level
        "#,
    )
    .fetch_all(pool)
    .await?;

    let daily_assessments = sqlx::query_as::<_, DailyCount>(
        r#"
        SELECT created_at::date AS day, COUNT(*) AS count
        FROM assessments
        WHERE created_at > NOW() - INTERVAL '30 days'
        GROUP BY day
        ORDER BY day
        "#,
    )
    .fetch_all(pool)
    .await?;

    let high_risk_cases = high_risk_cases(pool).await?;
    let cause_percentages = cause_percentages(pool, total_assessments).await?;

    Ok(PlatformStats {
        total_users,
        total_assessments,
        assessments_today,
        high_risk_count,
        critical_count,
        active_users_week,
        avg_risk_score: avg_risk_score.unwrap_or(0.0),
        risk_distribution,
        daily_assessments,
        high_risk_cases,
        cause_percentages,
    })
}

async fn count_scalar(pool: &PgPool, sql: &str) -> Result<i64, AppError> {
    Ok(sqlx::query_scalar(sql).fetch_one(pool).await?)
}

/// Ten highest-scoring High, Very High or Critical assessments with their
/// owners, for follow-up triage.
async fn high_risk_cases(pool: &PgPool) -> Result<Vec<HighRiskCase>, AppError> {
    let cases = sqlx::query_as::<_, HighRiskCase>(
        r#"
        SELECT a.id AS assessment_id, a.patient_ref, u.username, u.full_name,
               a.age, a.risk_score, a.risk_level, a.created_at
        FROM assessments a
        JOIN users u ON u.id = a.user_id
        WHERE a.risk_level IN ('High', 'Very High', 'Critical')
        ORDER BY a.risk_score DESC
        LIMIT 10
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(cases)
}

/// All stored assessments across users, paginated, newest first.
pub async fn list_assessments(
    pool: &PgPool,
    pagination: &Pagination,
) -> Result<PagedResult<AssessmentWithOwner>, AppError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assessments")
        .fetch_one(pool)
        .await?;

    let items = sqlx::query_as::<_, AssessmentWithOwner>(
        r#"
        SELECT a.id, a.patient_ref, u.username, u.full_name, a.age,
               a.risk_score, a.risk_level, a.confidence, a.created_at
        FROM assessments a
        JOIN users u ON u.id = a.user_id
        ORDER BY a.created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    Ok(PagedResult::new(items, total, pagination))
}

async fn cause_percentages(
    pool: &PgPool,
    total_assessments: i64,
) -> Result<CausePercentages, AppError> {
    if total_assessments == 0 {
        return Ok(CausePercentages::default());
    }

    #[derive(sqlx::FromRow)]
    struct CauseCounts {
        hypertension: i64,
        heart_disease: i64,
        high_glucose: i64,
        obesity: i64,
        smoking: i64,
        advanced_age: i64,
    }

    let counts = sqlx::query_as::<_, CauseCounts>(
        r#"
        SELECT
            COUNT(*) FILTER (WHERE hypertension) AS hypertension,
            COUNT(*) FILTER (WHERE heart_disease) AS heart_disease,
            COUNT(*) FILTER (WHERE avg_glucose_level > 200) AS high_glucose,
            COUNT(*) FILTER (WHERE bmi > 30) AS obesity,
            COUNT(*) FILTER (WHERE smoking_status IN ('smokes', 'formerly smoked')) AS smoking,
            COUNT(*) FILTER (WHERE age > 65) AS advanced_age
        FROM assessments
        "#,
    )
    .fetch_one(pool)
    .await?;

    let pct = |n: i64| (n as f64 / total_assessments as f64 * 1000.0).round() / 10.0;
    Ok(CausePercentages {
        hypertension: pct(counts.hypertension),
        heart_disease: pct(counts.heart_disease),
        high_glucose: pct(counts.high_glucose),
        obesity: pct(counts.obesity),
        smoking: pct(counts.smoking),
        advanced_age: pct(counts.advanced_age),
    })
}

/// All registered users with their assessment activity, newest first.
pub async fn list_users(pool: &PgPool) -> Result<Vec<UserWithActivity>, AppError> {
    let users = sqlx::query_as::<_, UserWithActivity>(
        r#"
        SELECT u.id, u.username, u.email, u.full_name, u.role, u.is_active,
               u.last_login, u.created_at,
               COUNT(a.id) AS assessment_count,
               MAX(a.created_at) AS last_assessment
        FROM users u
        LEFT JOIN assessments a ON a.user_id = u.id
        GROUP BY u.id
        ORDER BY u.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(users)
}

/// Flip a user's active flag. Deactivated users cannot log in until an
/// admin reactivates them.
pub async fn toggle_user_active(
    pool: &PgPool,
    admin_id: Uuid,
    user_id: Uuid,
) -> Result<bool, AppError> {
    if admin_id == user_id {
        return Err(AppError::Validation(
            "Cannot deactivate your own account".to_string(),
        ));
    }

    let is_active: Option<bool> = sqlx::query_scalar(
        "UPDATE users SET is_active = NOT is_active, updated_at = NOW() \
         WHERE id = $1 RETURNING is_active",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    let is_active = is_active.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    tracing::info!(%admin_id, %user_id, is_active, "Toggled user active flag");
    Ok(is_active)
}

/// Grant a user the Admin role.
pub async fn promote_to_admin(
    pool: &PgPool,
    admin_id: Uuid,
    user_id: Uuid,
) -> Result<(), AppError> {
    let updated = sqlx::query("UPDATE users SET role = $1, updated_at = NOW() WHERE id = $2")
        .bind(UserRole::Admin)
        .bind(user_id)
        .execute(pool)
        .await?;

    if updated.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    tracing::info!(%admin_id, %user_id, "Promoted user to admin");
    Ok(())
}

/// Delete a user together with their assessments and feedback.
pub async fn delete_user(pool: &PgPool, admin_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
    if admin_id == user_id {
        return Err(AppError::Validation(
            "Cannot delete your own account".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM assessments WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM user_feedback WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    tx.commit().await?;

    tracing::info!(%admin_id, %user_id, "Deleted user and their data");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cause_percentages_default_to_zero() {
        let p = CausePercentages::default();
        assert_eq!(p.hypertension, 0.0);
        assert_eq!(p.advanced_age, 0.0);
    }

    #[test]
    fn platform_stats_serializes_distribution() {
        let stats = PlatformStats {
            total_users: 4,
            total_assessments: 10,
            assessments_today: 2,
            high_risk_count: 2,
            critical_count: 1,
            active_users_week: 3,
            avg_risk_score: 0.41,
            risk_distribution: vec![RiskLevelCount {
                risk_level: RiskLevel::Moderate,
                count: 5,
            }],
            daily_assessments: vec![],
            high_risk_cases: vec![],
            cause_percentages: CausePercentages::default(),
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["risk_distribution"][0]["risk_level"], "Moderate");
        assert_eq!(json["total_assessments"], 10);
    }
}
