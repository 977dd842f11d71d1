//! Assessment template routes: patient-visible presets and admin CRUD.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::middleware::rbac::RequireAdmin;
use crate::models::template::{AssessmentTemplate, CreateTemplate, UpdateTemplate};
use crate::routes::admin::ActiveFlag;
use crate::services::template;
use crate::AppState;

/// GET /api/v1/templates — active presets for the assessment form.
pub async fn list_active(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<AssessmentTemplate>>>, AppError> {
    let templates = template::list(&state.db, true).await?;
    Ok(ApiResponse::success(templates))
}

/// GET /api/v1/admin/templates — all presets including inactive ones.
pub async fn list_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<ApiResponse<Vec<AssessmentTemplate>>>, AppError> {
    let templates = template::list(&state.db, false).await?;
    Ok(ApiResponse::success(templates))
}

/// POST /api/v1/admin/templates — create a preset.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateTemplate>,
) -> Result<Json<ApiResponse<AssessmentTemplate>>, AppError> {
    let created = template::create(&state.db, admin.id, &input).await?;
    Ok(ApiResponse::success(created))
}

/// PUT /api/v1/admin/templates/{id} — update a preset.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateTemplate>,
) -> Result<Json<ApiResponse<AssessmentTemplate>>, AppError> {
    let updated = template::update(&state.db, id, &input).await?;
    Ok(ApiResponse::success(updated))
}

/// POST /api/v1/admin/templates/{id}/toggle-active — show or hide.
pub async fn toggle_active(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ActiveFlag>>, AppError> {
    let is_active = template::toggle_active(&state.db, id).await?;
    Ok(ApiResponse::success(ActiveFlag { is_active }))
}
