//! Assessment routes: scoring submissions and patient history.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::models::assessment::{Assessment, AssessmentPrefill, AssessmentSummary, SubmitAssessment};
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::assessment::{self, AssessmentOutcome};
use crate::AppState;

/// POST /api/v1/assessments — score a submission and store the result.
pub async fn submit(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<SubmitAssessment>,
) -> Result<Json<ApiResponse<AssessmentOutcome>>, AppError> {
    let outcome = assessment::submit(&state.db, user.id, &input).await?;
    Ok(ApiResponse::success(outcome))
}

/// GET /api/v1/assessments — the caller's history, newest first.
pub async fn history(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<PagedResult<AssessmentSummary>>>, AppError> {
    let page = assessment::history(&state.db, user.id, &pagination).await?;
    Ok(ApiResponse::success(page))
}

/// GET /api/v1/assessments/latest — raw inputs of the most recent
/// assessment, for form prefill.
pub async fn latest(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<AssessmentPrefill>>, AppError> {
    let prefill = assessment::latest_prefill(&state.db, user.id).await?;
    Ok(ApiResponse::success(prefill))
}

/// GET /api/v1/assessments/{id} — one stored assessment, owner only.
pub async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Assessment>>, AppError> {
    let found = assessment::find_by_id(&state.db, user.id, id).await?;
    Ok(ApiResponse::success(found))
}
