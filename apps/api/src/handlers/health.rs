//! Liveness probe.

use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::extract::AppJson;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

/// `GET /health`: 200 when the database answers a ping, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, AppJson<HealthResponse>) {
    if state.db.health_check().await {
        (
            StatusCode::OK,
            AppJson(HealthResponse {
                status: "ok",
                database: "ok",
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            AppJson(HealthResponse {
                status: "degraded",
                database: "unavailable",
            }),
        )
    }
}
