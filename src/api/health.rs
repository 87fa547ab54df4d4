//! Health check endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
}

impl HealthResponse {
    fn with_status(status: &str) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Liveness probe; always succeeds while the process is up
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::with_status("healthy"))
}

/// Readiness probe; round-trips to the database before reporting ready
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = HealthResponse),
        (status = 503, description = "Database is unreachable", body = HealthResponse)
    )
)]
pub async fn readiness_check(
    State(state): State<crate::AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    match state.services.catalog.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::with_status("ready"))),
        Err(e) => {
            tracing::warn!("readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::with_status("unavailable")),
            )
        }
    }
}
