//! Shared infrastructure for the exam grading services.
//!
//! This crate provides the ambient pieces every binary needs:
//! - Configuration management
//! - Logging and tracing setup

pub mod config;
pub mod telemetry;

// Re-export commonly used types
pub use config::{AppConfig, AuthConfig, HttpConfig, ServerConfig, TelemetryConfig};
pub use telemetry::{init_from_config, init_tracing};

/// Common error type used throughout the crate
pub type Result<T> = std::result::Result<T, anyhow::Error>;
