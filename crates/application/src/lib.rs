//! Application layer for the Exam Grading service
//!
//! This crate orchestrates domain logic and coordinates between layers.
//!
//! ## Architecture
//!
//! The application layer sits between the domain and the API, providing use
//! case orchestration on top of repository ports.
//!
//! ## Modules
//!
//! - `scoring` - Rubric engine (validation, totals, final mark)
//! - `services` - Grading, exam paper and statistics services, ports and authorization
//! - `dto` - Request and response shapes for the API layer

pub mod dto;
pub mod scoring;
pub mod services;

// Re-export commonly used types
pub use scoring::{RubricEngine, TOTAL_EXCEEDED_MESSAGE};
pub use services::{
    AuthorizationResult, Authorizer, DefaultAuthorizer, EventPublisher, ExamPaperRepositoryPort,
    ExamPaperService, GradingRepositoryPort, GradingService, NoOpEventPublisher, ServiceContext,
    ServiceEvent, StatisticsRepositoryPort, StatisticsRow, StatisticsService,
};

use exam_grading_domain::{AuthorizationError, GradingError};
use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplicationError {
    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication required
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Request field validation errors
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Detailed scores broke the rubric; messages in detection order
    #[error("Rubric validation failed")]
    RubricViolation(Vec<String>),

    /// Resource conflict (e.g., wrong lifecycle state)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Get HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            ApplicationError::NotFound(_) => 404,
            ApplicationError::Unauthorized(_) => 401,
            ApplicationError::Forbidden(_) => 403,
            ApplicationError::ValidationFailed(_) => 422,
            ApplicationError::RubricViolation(_) => 400,
            ApplicationError::Conflict(_) => 409,
            ApplicationError::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ApplicationError::NotFound(_) => "NOT_FOUND",
            ApplicationError::Unauthorized(_) => "UNAUTHORIZED",
            ApplicationError::Forbidden(_) => "FORBIDDEN",
            ApplicationError::ValidationFailed(_) => "VALIDATION_FAILED",
            ApplicationError::RubricViolation(_) => "RUBRIC_VIOLATION",
            ApplicationError::Conflict(_) => "CONFLICT",
            ApplicationError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<GradingError> for ApplicationError {
    fn from(err: GradingError) -> Self {
        match err {
            GradingError::SubmissionNotFound(_)
            | GradingError::InitialGradeNotFound(_)
            | GradingError::ExamPaperNotFound(_)
            | GradingError::CentreNotFound(_) => ApplicationError::NotFound(err.to_string()),
            GradingError::InvalidStatusTransition { .. }
            | GradingError::InvalidPaperStatusTransition { .. } => {
                ApplicationError::Conflict(err.to_string())
            }
            GradingError::RubricViolation(errors) => ApplicationError::RubricViolation(errors),
            GradingError::SelfReview => ApplicationError::Forbidden(err.to_string()),
        }
    }
}

impl From<AuthorizationError> for ApplicationError {
    fn from(err: AuthorizationError) -> Self {
        ApplicationError::Unauthorized(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApplicationError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApplicationError::ValidationFailed(err.to_string())
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
