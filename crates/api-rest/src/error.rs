//! HTTP error handling and conversion.
//!
//! This module provides error types for the REST API and implements
//! conversion from application errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use exam_grading_application::ApplicationError;
use exam_grading_domain::{AuthorizationError, GradingError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use thiserror::Error;
use tracing::error;

/// API-specific error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Application layer error
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Request body failed field validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed body or path parameter
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Application(err) => StatusCode::from_u16(err.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get error code for API response
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Application(err) => err.error_code(),
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::BadRequest(_) => "BAD_REQUEST",
        }
    }

    /// Structured payload for errors that carry more than a message
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Application(ApplicationError::RubricViolation(errors)) => {
                Some(json!({ "errors": errors }))
            }
            _ => None,
        }
    }
}

/// Standardized error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code
    pub error: String,

    /// Human-readable message
    pub message: String,

    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Add details to the error response
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Internal details stay in the logs
        let message = match &self {
            Self::Application(ApplicationError::Internal(detail)) => {
                error!(error_code, detail = %detail, "Request failed with internal error");
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        };

        let mut body = ErrorResponse::new(error_code, message);
        if let Some(details) = self.details() {
            body = body.with_details(details);
        }

        (status, Json(body)).into_response()
    }
}

impl From<GradingError> for ApiError {
    fn from(err: GradingError) -> Self {
        Self::Application(err.into())
    }
}

impl From<AuthorizationError> for ApiError {
    fn from(err: AuthorizationError) -> Self {
        Self::Application(err.into())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
