//! Announcement routes: patient notices and admin management.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::middleware::rbac::RequireAdmin;
use crate::models::announcement::{Announcement, AnnouncementNotice, CreateAnnouncement};
use crate::routes::admin::ActiveFlag;
use crate::services::announcement;
use crate::AppState;

/// GET /api/v1/announcements — active notices for the patient dashboard.
pub async fn active_notices(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<AnnouncementNotice>>>, AppError> {
    let notices = announcement::active_notices(&state.db).await?;
    Ok(ApiResponse::success(notices))
}

/// GET /api/v1/admin/announcements — all announcements, newest first.
pub async fn list_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<ApiResponse<Vec<Announcement>>>, AppError> {
    let announcements = announcement::list_all(&state.db).await?;
    Ok(ApiResponse::success(announcements))
}

/// POST /api/v1/admin/announcements — publish an announcement.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateAnnouncement>,
) -> Result<Json<ApiResponse<Announcement>>, AppError> {
    let announcement = announcement::create(&state.db, admin.id, &input).await?;
    Ok(ApiResponse::success(announcement))
}

/// POST /api/v1/admin/announcements/{id}/toggle-active — show or hide.
pub async fn toggle_active(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ActiveFlag>>, AppError> {
    let is_active = announcement::toggle_active(&state.db, id).await?;
    Ok(ApiResponse::success(ActiveFlag { is_active }))
}
