//! Configuration management for the application.
//!
//! This module provides a centralized configuration system that loads settings
//! from configuration files and environment variables.
//!
//! ## Example Configuration
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [auth]
//! jwt_secret = "at-least-thirty-two-characters-long-secret"
//!
//! [telemetry]
//! json_logging = true
//! log_level = "info"
//!
//! [http]
//! cors_allowed_origins = ["https://grading.example.org"]
//! request_timeout_seconds = 30
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (e.g., "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Authentication configuration.
///
/// Tokens are issued elsewhere; this service only verifies them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret shared with the token issuer
    pub jwt_secret: String,

    /// Clock skew tolerated when checking `exp`, in seconds
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Enable JSON logging format
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// HTTP layer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// CORS allowed origins; `*` allows any
    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_leeway() -> u64 {
    30
}

fn default_service_name() -> String {
    "exam-grading".to_string()
}

fn default_json_logging() -> bool {
    false
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_body_size() -> usize {
    1024 * 1024 // 1 MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            json_logging: default_json_logging(),
            log_level: default_log_level(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            cors_allowed_origins: default_cors_origins(),
            request_timeout_seconds: default_request_timeout(),
            max_body_size: default_max_body_size(),
        }
    }
}

impl AppConfig {
    /// Load configuration from configuration files and environment variables.
    ///
    /// The configuration is loaded in the following order (later sources override earlier ones):
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/{environment}.toml (if exists, where environment is from APP_ENV)
    /// 4. Environment variables (prefixed with APP_)
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use exam_grading_common::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load configuration");
    /// println!("Server will run on {}:{}", config.server.host, config.server.port);
    /// ```
    pub fn load() -> Result<Self> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            // Start with default configuration file
            .add_source(config::File::with_name("config/default").required(false))
            // Add environment-specific configuration
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            // Add environment variables (prefix: APP_)
            // Example: APP_SERVER__PORT=3000
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("http.cors_allowed_origins"),
            )
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.auth.jwt_secret.is_empty() {
            anyhow::bail!("JWT secret is required");
        }

        if self.auth.jwt_secret.len() < 32 {
            anyhow::bail!("JWT secret must be at least 32 characters long");
        }

        if self.http.request_timeout_seconds == 0 {
            anyhow::bail!("Request timeout must be greater than 0");
        }

        if self.http.max_body_size == 0 {
            anyhow::bail!("Maximum body size must be greater than 0");
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.telemetry.log_level,
                valid_log_levels.join(", ")
            );
        }

        Ok(())
    }

    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.http.request_timeout_seconds)
    }

    /// Address the server binds to
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Create a development configuration with sensible defaults
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            auth: AuthConfig {
                jwt_secret: "development-secret-key-minimum-32-chars".to_string(),
                leeway_seconds: default_leeway(),
            },
            telemetry: TelemetryConfig {
                service_name: "exam-grading-dev".to_string(),
                json_logging: false,
                log_level: "debug".to_string(),
            },
            http: HttpConfig::default(),
        }
    }
}
