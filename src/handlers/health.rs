//! Health check endpoint

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use crate::handlers::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
    pub storage_enabled: bool,
    pub issues: Vec<String>,
}

/// GET /health
///
/// Does not require authentication. Returns 503 when the database is unreachable.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let health = state.services.health_check().await;

    let response = HealthResponse {
        status: if health.is_healthy() { "ok" } else { "degraded" },
        version: crate::VERSION,
        database: if health.in_memory { "memory" } else { "postgres" },
        storage_enabled: health.storage_enabled,
        issues: health.get_issues(),
    };

    let status = if health.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}
