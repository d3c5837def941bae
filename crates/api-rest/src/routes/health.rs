//! Health check endpoints.

use crate::{responses::ApiResponse, state::AppState};
use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

/// Health check routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Basic health check
///
/// Returns service status and version information.
async fn health() -> Json<ApiResponse<HealthResponse>> {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    Json(ApiResponse::success(response))
}
