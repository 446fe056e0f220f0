//! Service banner and health probes

use axum::{extract::State, http::StatusCode, Json};
use church_service::dto::{HealthResponse, ReadinessResponse, RootResponse};

use crate::state::AppState;

/// Service banner
///
/// GET /
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Service is running", body = RootResponse))
)]
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    let app = &state.config().app;
    Json(RootResponse::running(&app.name, &app.version))
}

/// Basic health check (liveness probe)
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Process is alive", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with a database round trip
///
/// GET /health/ready
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Ready to serve", body = ReadinessResponse),
        (status = 503, description = "Database unreachable", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let db_healthy = match church_db::ping(state.service_context().pool()).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness probe: database unreachable");
            false
        }
    };

    let response = ReadinessResponse::ready(db_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
