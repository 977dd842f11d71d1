//! Patient feedback routes. Admin handling lives in the admin routes.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::models::feedback::{CreateFeedback, Feedback};
use crate::services::feedback;
use crate::AppState;

/// POST /api/v1/feedback — file feedback.
pub async fn submit(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<CreateFeedback>,
) -> Result<Json<ApiResponse<Feedback>>, AppError> {
    let feedback = feedback::submit(&state.db, user.id, &input).await?;
    Ok(ApiResponse::success(feedback))
}

/// GET /api/v1/feedback — the caller's own feedback, newest first.
pub async fn list_own(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<Feedback>>>, AppError> {
    let items = feedback::list_own(&state.db, user.id).await?;
    Ok(ApiResponse::success(items))
}
