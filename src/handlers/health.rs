//! Health check handler for load balancers and infrastructure monitoring.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

/// Public health check response
///
/// Simple status indicator; no build or commit information is exposed.
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    /// Status indicator (always "ok")
    pub status: String,
}

/// GET /health
///
/// Does not require authentication.
///
/// ```bash
/// curl http://localhost:8080/health
/// # Returns: {"status":"ok"}
/// ```
pub async fn health_check(State(_state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
    })
}
