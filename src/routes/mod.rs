//! Route definitions for the StrokeGuard API.

use axum::{
    http::{header, Method},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::AppState;

pub mod admin;
pub mod announcements;
pub mod assessments;
pub mod auth;
pub mod feedback;
pub mod health;
pub mod templates;

const MAX_BODY_BYTES: usize = 256 * 1024;

/// Assemble the full application router with middleware layers.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::exact(
            state
                .config
                .frontend_url
                .parse()
                .expect("Invalid frontend URL"),
        ))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1", api_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        // Auth and account
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/me", get(auth::me))
        .route("/auth/profile", put(auth::update_profile))
        .route("/auth/account", delete(auth::delete_account))
        .route("/auth/reactivation-request", post(auth::reactivation_request))
        // Assessments
        .route(
            "/assessments",
            post(assessments::submit).get(assessments::history),
        )
        .route("/assessments/latest", get(assessments::latest))
        .route("/assessments/{id}", get(assessments::get_by_id))
        // Patient-facing notices, feedback and templates
        .route("/announcements", get(announcements::active_notices))
        .route("/feedback", post(feedback::submit).get(feedback::list_own))
        .route("/templates", get(templates::list_active))
        // Admin
        .route("/admin/stats", get(admin::stats))
        .route("/admin/assessments", get(admin::list_assessments))
        .route(
            "/admin/users",
            get(admin::list_users).post(admin::create_user),
        )
        .route(
            "/admin/users/{id}/toggle-active",
            post(admin::toggle_user_active),
        )
        .route("/admin/users/{id}/promote", post(admin::promote_user))
        .route("/admin/users/{id}", delete(admin::delete_user))
        .route("/admin/feedback", get(admin::feedback_overview))
        .route(
            "/admin/feedback/{id}/respond",
            post(admin::respond_feedback),
        )
        .route(
            "/admin/announcements",
            get(announcements::list_all).post(announcements::create),
        )
        .route(
            "/admin/announcements/{id}/toggle-active",
            post(announcements::toggle_active),
        )
        .route(
            "/admin/templates",
            get(templates::list_all).post(templates::create),
        )
        .route("/admin/templates/{id}", put(templates::update))
        .route(
            "/admin/templates/{id}/toggle-active",
            post(templates::toggle_active),
        )
}
