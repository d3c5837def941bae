//! Error types for the exam grading domain.
//!
//! `GradingError` carries a machine-readable error code and the HTTP status it
//! maps to, so outer layers can translate without re-inspecting messages.

use crate::exam_paper::ExamPaperStatus;
use crate::identifiers::{CentreId, ExamPaperId, SubmissionId};
use crate::submission::SubmissionStatus;

/// Grading workflow errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GradingError {
    /// Submission not found
    #[error("Submission not found: {0}")]
    SubmissionNotFound(SubmissionId),

    /// A review was requested before any grade exists
    #[error("Initial grade not found for submission {0}")]
    InitialGradeNotFound(SubmissionId),

    /// Status change outside `pending -> graded -> reviewed`
    #[error("Submission status transition not allowed: {from} -> {to}")]
    InvalidStatusTransition {
        from: SubmissionStatus,
        to: SubmissionStatus,
    },

    /// Scores failed rubric validation; messages are in detection order
    #[error("Rubric validation failed with {} error(s)", .0.len())]
    RubricViolation(Vec<String>),

    /// The original grader tried to review their own grade
    #[error("A grade cannot be reviewed by the teacher who gave it")]
    SelfReview,

    /// Exam paper not found
    #[error("Exam paper not found: {0}")]
    ExamPaperNotFound(ExamPaperId),

    /// Exam centre not found
    #[error("Exam centre not found: {0}")]
    CentreNotFound(CentreId),

    /// Exam paper status change outside `scheduled -> open -> closed`
    #[error("Exam paper status transition not allowed: {from} -> {to}")]
    InvalidPaperStatusTransition {
        from: ExamPaperStatus,
        to: ExamPaperStatus,
    },
}

impl GradingError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SubmissionNotFound(_) => "SUBMISSION_NOT_FOUND",
            Self::InitialGradeNotFound(_) => "GRADE_NOT_FOUND",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::RubricViolation(_) => "RUBRIC_VIOLATION",
            Self::SelfReview => "SELF_REVIEW",
            Self::ExamPaperNotFound(_) => "EXAM_PAPER_NOT_FOUND",
            Self::CentreNotFound(_) => "CENTRE_NOT_FOUND",
            Self::InvalidPaperStatusTransition { .. } => "INVALID_PAPER_STATUS_TRANSITION",
        }
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            Self::SubmissionNotFound(_)
            | Self::InitialGradeNotFound(_)
            | Self::ExamPaperNotFound(_)
            | Self::CentreNotFound(_) => 404,
            Self::InvalidStatusTransition { .. } | Self::InvalidPaperStatusTransition { .. } => 409,
            Self::RubricViolation(_) => 400,
            Self::SelfReview => 403,
        }
    }
}

/// Bearer-token failures; all of them mean the caller is not authenticated
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizationError {
    /// No bearer token on the request
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Token could not be verified
    #[error("Invalid token")]
    InvalidToken,

    /// Token expired
    #[error("Token expired")]
    TokenExpired,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = GradingError::SubmissionNotFound(SubmissionId::new());
        assert_eq!(err.error_code(), "SUBMISSION_NOT_FOUND");
        assert_eq!(err.http_status(), 404);

        let err = GradingError::InvalidStatusTransition {
            from: SubmissionStatus::Graded,
            to: SubmissionStatus::Graded,
        };
        assert_eq!(err.http_status(), 409);
        assert_eq!(
            err.to_string(),
            "Submission status transition not allowed: graded -> graded"
        );

        assert_eq!(GradingError::SelfReview.http_status(), 403);

        let err = GradingError::ExamPaperNotFound(ExamPaperId::new());
        assert_eq!(err.error_code(), "EXAM_PAPER_NOT_FOUND");
        assert_eq!(err.http_status(), 404);

        let err = GradingError::InvalidPaperStatusTransition {
            from: ExamPaperStatus::Closed,
            to: ExamPaperStatus::Open,
        };
        assert_eq!(err.http_status(), 409);
        assert_eq!(
            err.to_string(),
            "Exam paper status transition not allowed: closed -> open"
        );
    }

    #[test]
    fn test_rubric_violation_message() {
        let err = GradingError::RubricViolation(vec!["a".into(), "b".into()]);
        assert_eq!(err.http_status(), 400);
        assert_eq!(err.to_string(), "Rubric validation failed with 2 error(s)");
    }
}
