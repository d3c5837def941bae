//! Exam papers and the centres that sit them.
//!
//! An exam paper is the administrative record a submission points at: which
//! subject it covers, which session and centre it belongs to, and whether it
//! is still scheduled, open for sitting, or closed.

use crate::identifiers::{CentreId, ExamPaperId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A school hosting an exam session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamCentre {
    pub id: CentreId,
    pub name: String,
    /// Session edition, e.g. "2025"
    pub edition: String,
    /// Exam the centre hosts, e.g. "BAC"
    pub exam: String,
}

impl ExamCentre {
    pub fn new(name: impl Into<String>, edition: impl Into<String>, exam: impl Into<String>) -> Self {
        Self {
            id: CentreId::new(),
            name: name.into(),
            edition: edition.into(),
            exam: exam.into(),
        }
    }
}

/// One subject's paper within an exam session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamPaper {
    pub id: ExamPaperId,
    pub centre_id: CentreId,
    /// Free-form session key, e.g. "bac-2025-summer"
    pub session_id: String,
    pub subject_code: String,
    pub subject_name: String,
    pub exam_date: NaiveDate,
    pub duration_minutes: u32,
    pub total_points: u32,
    pub status: ExamPaperStatus,
    pub created_at: DateTime<Utc>,
}

impl ExamPaper {
    pub fn belongs_to_session(&self, session_id: &str) -> bool {
        self.session_id == session_id
    }
}

/// Administrative state of an exam paper.
///
/// `scheduled -> open -> closed`, and a scheduled paper may be closed
/// without ever opening. Closed is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamPaperStatus {
    Scheduled,
    Open,
    Closed,
}

impl ExamPaperStatus {
    pub fn can_transition_to(&self, target: ExamPaperStatus) -> bool {
        matches!(
            (self, target),
            (Self::Scheduled, Self::Open) | (Self::Scheduled, Self::Closed) | (Self::Open, Self::Closed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for ExamPaperStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_status_transitions() {
        use ExamPaperStatus::*;

        assert!(Scheduled.can_transition_to(Open));
        assert!(Scheduled.can_transition_to(Closed));
        assert!(Open.can_transition_to(Closed));

        assert!(!Open.can_transition_to(Scheduled));
        assert!(!Open.can_transition_to(Open));
        assert!(!Closed.can_transition_to(Open));
        assert!(!Closed.can_transition_to(Scheduled));
    }

    #[test]
    fn test_paper_status_wire_names() {
        let status: ExamPaperStatus = serde_json::from_str("\"open\"").unwrap();
        assert_eq!(status, ExamPaperStatus::Open);
        assert_eq!(ExamPaperStatus::Closed.to_string(), "closed");
    }
}
