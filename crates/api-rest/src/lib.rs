//! Exam Grading REST API
//!
//! Axum-based HTTP surface over the rubric engine and the grading services.
//!
//! ## Architecture
//!
//! The API is organized into the following modules:
//!
//! - **app**: Router assembly and middleware stack
//! - **routes**: HTTP route handlers (health, rubric, submissions, exam papers,
//!   statistics)
//! - **middleware**: Request ID propagation and request logging
//! - **extractors**: Bearer-token authentication, path parameters and validated
//!   JSON bodies
//! - **responses**: Standardized response wrappers
//! - **error**: HTTP error handling and conversion
//!
//! ## Usage
//!
//! ```rust,no_run
//! use exam_grading_api_rest::{app::create_app, config::ApiConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ApiConfig::load()?;
//!     let address = config.server_address();
//!     let app = create_app(config);
//!
//!     let listener = tokio::net::TcpListener::bind(address).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod routes;
pub mod state;

// Re-export commonly used types
pub use app::{build_router, create_app};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
