//! Admin routes: platform statistics, user management and feedback queue.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use axum::extract::Query;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::RequireAdmin;
use crate::models::feedback::RespondFeedback;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::user::{CreateUser, UserResponse, UserWithActivity};
use crate::services::admin::{self, AssessmentWithOwner, PlatformStats};
use crate::services::auth;
use crate::services::feedback::{self, FeedbackOverview};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ActiveFlag {
    pub is_active: bool,
}

/// GET /api/v1/admin/stats — aggregated platform statistics.
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<ApiResponse<PlatformStats>>, AppError> {
    let stats = admin::platform_stats(&state.db).await?;
    Ok(ApiResponse::success(stats))
}

/// GET /api/v1/admin/assessments — all assessments across users.
pub async fn list_assessments(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<PagedResult<AssessmentWithOwner>>>, AppError> {
    let page = admin::list_assessments(&state.db, &pagination).await?;
    Ok(ApiResponse::success(page))
}

/// GET /api/v1/admin/users — all users with assessment activity.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<ApiResponse<Vec<UserWithActivity>>>, AppError> {
    let users = admin::list_users(&state.db).await?;
    Ok(ApiResponse::success(users))
}

/// POST /api/v1/admin/users — create a user with an explicit role.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateUser>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = auth::create_user(&state.db, &input).await?;
    Ok(ApiResponse::success(user.into()))
}

/// POST /api/v1/admin/users/{id}/toggle-active — activate or deactivate.
pub async fn toggle_user_active(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ActiveFlag>>, AppError> {
    let is_active = admin::toggle_user_active(&state.db, admin.id, id).await?;
    Ok(ApiResponse::success(ActiveFlag { is_active }))
}

/// POST /api/v1/admin/users/{id}/promote — grant the Admin role.
pub async fn promote_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    admin::promote_to_admin(&state.db, admin.id, id).await?;
    Ok(ApiResponse::success(()))
}

/// DELETE /api/v1/admin/users/{id} — delete a user and their data.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    admin::delete_user(&state.db, admin.id, id).await?;
    Ok(ApiResponse::success(()))
}

/// GET /api/v1/admin/feedback — the full feedback queue with counts.
pub async fn feedback_overview(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<ApiResponse<FeedbackOverview>>, AppError> {
    let overview = feedback::overview(&state.db).await?;
    Ok(ApiResponse::success(overview))
}

/// POST /api/v1/admin/feedback/{id}/respond — record a response.
pub async fn respond_feedback(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(input): Json<RespondFeedback>,
) -> Result<Json<ApiResponse<crate::models::feedback::Feedback>>, AppError> {
    let updated = feedback::respond(&state.db, admin.id, id, &input).await?;
    Ok(ApiResponse::success(updated))
}
