//! Exam paper submissions and their grading lifecycle.

use crate::identifiers::{ExamPaperId, SubmissionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on the length of an opaque file reference
pub const MAX_FILE_REF_LEN: usize = 512;

/// A student's uploaded exam paper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub student_id: UserId,
    pub exam_paper_id: ExamPaperId,
    /// Opaque reference to wherever the uploaded file is stored
    pub file_ref: String,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    /// Create a new pending submission
    pub fn new(student_id: UserId, exam_paper_id: ExamPaperId, file_ref: impl Into<String>) -> Self {
        Self {
            id: SubmissionId::new(),
            student_id,
            exam_paper_id,
            file_ref: file_ref.into(),
            status: SubmissionStatus::Pending,
            submitted_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.student_id == user_id
    }
}

/// Where a submission is in the grading workflow.
///
/// The only legal path is `pending -> graded -> reviewed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Graded,
    Reviewed,
}

impl SubmissionStatus {
    pub fn can_transition_to(&self, target: SubmissionStatus) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Graded) | (Self::Graded, Self::Reviewed)
        )
    }

    /// Whether a submission in this state appears in a teacher's grading queue
    pub fn awaits_grader(&self) -> bool {
        matches!(self, Self::Pending | Self::Graded)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Graded => "graded",
            Self::Reviewed => "reviewed",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
