//! Route definitions
//!
//! API routes are mounted under /api/v1; the banner, probes and API docs
//! live at the root.

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{attendance, auth, health, members, users};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Path of the generated OpenAPI document
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Create the main API router (excluding health probes)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(health::root))
        .nest("/api/v1", api_v1_routes())
        .merge(SwaggerUi::new("/docs").url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(member_routes())
        .merge(user_routes())
        .merge(attendance_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/token", post(auth::token))
        .route("/auth/me", get(auth::me))
        .route("/auth/change-password", post(auth::change_password))
}

/// Member directory routes
fn member_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/members",
            post(members::create_member).get(members::list_members),
        )
        .route(
            "/members/:id",
            get(members::get_member)
                .put(members::update_member)
                .delete(members::delete_member),
        )
}

/// User directory routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::create_user).get(users::list_users))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/:id/reset-password", post(users::reset_password))
}

/// Attendance routes; the QR pair is public
fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/attendance/qr/lookup", post(attendance::qr_lookup))
        .route("/attendance/qr/confirm", post(attendance::qr_confirm))
        .route(
            "/attendance",
            post(attendance::mark_attendance).get(attendance::list_attendance),
        )
        .route("/attendance/bulk", post(attendance::bulk_mark_attendance))
        .route(
            "/attendance/:id",
            get(attendance::get_attendance)
                .put(attendance::update_attendance)
                .delete(attendance::delete_attendance),
        )
}
