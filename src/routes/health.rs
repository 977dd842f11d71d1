//! Health check routes.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::{ApiResponse, AppError};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub database: &'static str,
}

/// GET /health — liveness probe, no dependencies checked.
pub async fn live() -> Json<ApiResponse<Health>> {
    ApiResponse::success(Health {
        status: "ok",
        database: "unchecked",
    })
}

/// GET /health/ready — readiness probe with a database round trip.
pub async fn ready(State(state): State<AppState>) -> Result<Json<ApiResponse<Health>>, AppError> {
    sqlx::query("SELECT 1").execute(&state.db).await?;
    Ok(ApiResponse::success(Health {
        status: "ok",
        database: "ok",
    }))
}
