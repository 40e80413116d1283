//! Health check endpoint.

use axum::Json;

use crate::api::types::{endpoint_directory, HealthResponse};
use crate::config;

/// `GET /health` — liveness check with an endpoint directory.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: "Medical Summarizer Backend is running",
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: config::APP_VERSION,
        endpoints: endpoint_directory(),
    })
}
