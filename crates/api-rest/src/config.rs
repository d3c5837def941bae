//! API configuration.

use exam_grading_common::AppConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings the HTTP layer reads on every request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Server host to bind to
    pub host: String,

    /// Server port to bind to
    pub port: u16,

    /// HS256 secret used to verify bearer tokens
    pub jwt_secret: String,

    /// Clock skew tolerated on token expiry, in seconds
    pub jwt_leeway_seconds: u64,

    /// CORS allowed origins
    pub cors_allowed_origins: Vec<String>,

    /// Maximum request body size in bytes
    pub max_body_size: usize,

    /// Request timeout in seconds
    pub request_timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from(&AppConfig::development())
    }
}

impl From<&AppConfig> for ApiConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            jwt_secret: config.auth.jwt_secret.clone(),
            jwt_leeway_seconds: config.auth.leeway_seconds,
            cors_allowed_origins: config.http.cors_allowed_origins.clone(),
            max_body_size: config.http.max_body_size,
            request_timeout_seconds: config.http.request_timeout_seconds,
        }
    }
}

impl ApiConfig {
    /// Load the layered application configuration and project the API view
    pub fn load() -> anyhow::Result<Self> {
        Ok(Self::from(&AppConfig::load()?))
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Get server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|origin| origin == "*")
    }
}
