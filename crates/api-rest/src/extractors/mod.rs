//! Custom Axum extractors.
//!
//! This module provides reusable extractors for bearer-token authentication,
//! path parameters and validated JSON payloads.

pub mod auth;
pub mod path;
pub mod validated_json;

pub use auth::{AuthenticatedUser, Claims};
pub use path::PathParam;
pub use validated_json::ValidatedJson;
