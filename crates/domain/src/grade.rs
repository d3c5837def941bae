//! Grade records: the initial grade and its second-reader review.

use crate::identifiers::{GradeId, ReviewId, SubmissionId, UserId};
use crate::scores::DetailedScores;
use crate::submission::SubmissionStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound on feedback and review notes, in characters
pub const MAX_COMMENT_LEN: usize = 5000;

/// The first grade a teacher gives a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub id: GradeId,
    pub submission_id: SubmissionId,
    pub teacher_id: UserId,
    /// Aggregate total, base credit included
    pub score: i64,
    pub detailed_scores: DetailedScores,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub graded_at: DateTime<Utc>,
}

/// A second teacher's review of an initial grade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeReview {
    pub id: ReviewId,
    pub submission_id: SubmissionId,
    pub reviewer_id: UserId,
    pub initial_grade_id: GradeId,
    pub score: i64,
    pub detailed_scores: DetailedScores,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_notes: Option<String>,
    pub reviewed_at: DateTime<Utc>,
}

impl GradeReview {
    /// Difference between the reviewed score and the initial one
    pub fn score_delta(&self, initial: &Grade) -> i64 {
        self.score - initial.score
    }
}

/// Submission counts per status plus the mean grade score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradingOverview {
    pub total_submissions: u64,
    pub pending: u64,
    pub graded: u64,
    pub reviewed: u64,
    /// Mean initial-grade score rounded to two decimals; absent with no grades
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_score: Option<f64>,
}

/// Submission counts and mean grade score for one centre or one subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStatistics {
    /// Centre id or subject code
    pub id: String,
    pub name: String,
    pub total_submissions: u64,
    pub graded: u64,
    pub reviewed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_score: Option<f64>,
}

impl GroupStatistics {
    /// Aggregate the `(status, initial grade score)` pairs of a group's submissions
    pub fn from_submissions<I>(id: impl Into<String>, name: impl Into<String>, submissions: I) -> Self
    where
        I: IntoIterator<Item = (SubmissionStatus, Option<i64>)>,
    {
        let mut total_submissions = 0;
        let mut graded = 0;
        let mut reviewed = 0;
        let mut scores = Vec::new();

        for (status, score) in submissions {
            total_submissions += 1;
            match status {
                SubmissionStatus::Graded => graded += 1,
                SubmissionStatus::Reviewed => reviewed += 1,
                SubmissionStatus::Pending => {}
            }
            scores.extend(score);
        }

        Self {
            id: id.into(),
            name: name.into(),
            total_submissions,
            graded,
            reviewed,
            average_score: average_score(&scores),
        }
    }
}

/// Mean of `scores` rounded to two decimals, `None` when empty
pub fn average_score(scores: &[i64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let sum: f64 = scores.iter().map(|s| *s as f64).sum();
    let mean = sum / scores.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}
