//! Authentication and account routes.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::models::feedback::{Feedback, ReactivationRequest};
use crate::models::user::{RegisterRequest, UpdateProfile, UserResponse};
use crate::services::auth::{self, TokenPair};
use crate::services::feedback;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// POST /api/v1/auth/register — self-service patient registration.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = auth::register(&state.db, &input).await?;
    Ok(ApiResponse::success(user.into()))
}

/// POST /api/v1/auth/login — authenticate and receive a token pair.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenPair>>, AppError> {
    let tokens = auth::login(
        &state.db,
        &input.username,
        &input.password,
        &state.config.jwt_secret,
        state.config.jwt_access_token_expiry_secs,
        state.config.jwt_refresh_token_expiry_secs,
    )
    .await?;
    Ok(ApiResponse::success(tokens))
}

/// POST /api/v1/auth/refresh — exchange a refresh token for a new pair.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenPair>>, AppError> {
    let tokens = auth::refresh_token(
        &state.db,
        &input.refresh_token,
        &state.config.jwt_secret,
        state.config.jwt_access_token_expiry_secs,
        state.config.jwt_refresh_token_expiry_secs,
    )
    .await?;
    Ok(ApiResponse::success(tokens))
}

/// GET /api/v1/auth/me — the authenticated user's profile.
pub async fn me(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = auth::find_user_by_id(&state.db, user.id).await?;
    Ok(ApiResponse::success(user.into()))
}

/// PUT /api/v1/auth/profile — update contact details.
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<UpdateProfile>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = auth::update_profile(&state.db, user.id, &input).await?;
    Ok(ApiResponse::success(user.into()))
}

/// DELETE /api/v1/auth/account — delete the account and its assessments.
pub async fn delete_account(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<()>>, AppError> {
    auth::delete_account(&state.db, user.id).await?;
    Ok(ApiResponse::success(()))
}

/// POST /api/v1/auth/reactivation-request — unauthenticated, for
/// deactivated accounts that cannot obtain a token.
pub async fn reactivation_request(
    State(state): State<AppState>,
    Json(input): Json<ReactivationRequest>,
) -> Result<Json<ApiResponse<Feedback>>, AppError> {
    let feedback = feedback::request_reactivation(&state.db, &input).await?;
    Ok(ApiResponse::success(feedback))
}
