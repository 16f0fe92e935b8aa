//! Health check endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// `GET /health` — liveness probe. Always the same body.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Cortex API is running",
    })
}
