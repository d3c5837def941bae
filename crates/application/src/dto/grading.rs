//! Submission and grading DTOs

use crate::scoring::RubricEngine;
use crate::services::{GradingQueueEntry, SubmissionDetail};
use chrono::{DateTime, Utc};
use exam_grading_domain::{
    DetailedScores, ExamPaperId, Grade, GradeId, GradeReview, GradingOverview, GroupStatistics,
    ReviewId,
    Submission, SubmissionId, SubmissionStatus, UserId,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register an uploaded exam paper
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSubmissionRequest {
    pub exam_paper_id: ExamPaperId,

    /// Opaque reference to the stored file
    #[validate(length(min = 1, max = 512))]
    pub file_ref: String,
}

/// A teacher's initial grade
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GradeRequest {
    pub detailed_scores: DetailedScores,

    #[validate(length(max = 5000))]
    #[serde(default)]
    pub feedback: Option<String>,
}

/// A second teacher's review of an initial grade
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub detailed_scores: DetailedScores,

    #[validate(length(max = 5000))]
    #[serde(default)]
    pub feedback: Option<String>,

    #[validate(length(max = 5000))]
    #[serde(default)]
    pub review_notes: Option<String>,
}

/// Submission response DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: SubmissionId,
    pub student_id: UserId,
    pub exam_paper_id: ExamPaperId,
    pub file_ref: String,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
}

impl From<&Submission> for SubmissionResponse {
    fn from(submission: &Submission) -> Self {
        Self {
            id: submission.id,
            student_id: submission.student_id,
            exam_paper_id: submission.exam_paper_id,
            file_ref: submission.file_ref.clone(),
            status: submission.status,
            submitted_at: submission.submitted_at,
        }
    }
}

/// Grade response DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResponse {
    pub id: GradeId,
    pub submission_id: SubmissionId,
    pub teacher_id: UserId,
    pub score: i64,
    pub final_mark: f64,
    pub detailed_scores: DetailedScores,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub graded_at: DateTime<Utc>,
}

impl From<&Grade> for GradeResponse {
    fn from(grade: &Grade) -> Self {
        Self {
            id: grade.id,
            submission_id: grade.submission_id,
            teacher_id: grade.teacher_id,
            score: grade.score,
            final_mark: RubricEngine::new().final_mark(grade.score),
            detailed_scores: grade.detailed_scores,
            feedback: grade.feedback.clone(),
            graded_at: grade.graded_at,
        }
    }
}

/// Review response DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: ReviewId,
    pub submission_id: SubmissionId,
    pub reviewer_id: UserId,
    pub initial_grade_id: GradeId,
    pub score: i64,
    pub final_mark: f64,
    pub detailed_scores: DetailedScores,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_notes: Option<String>,
    pub reviewed_at: DateTime<Utc>,
}

impl From<&GradeReview> for ReviewResponse {
    fn from(review: &GradeReview) -> Self {
        Self {
            id: review.id,
            submission_id: review.submission_id,
            reviewer_id: review.reviewer_id,
            initial_grade_id: review.initial_grade_id,
            score: review.score,
            final_mark: RubricEngine::new().final_mark(review.score),
            detailed_scores: review.detailed_scores,
            feedback: review.feedback.clone(),
            review_notes: review.review_notes.clone(),
            reviewed_at: review.reviewed_at,
        }
    }
}

/// Submission with its grade and review, if any
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDetailResponse {
    pub submission: SubmissionResponse,
    pub grade: Option<GradeResponse>,
    pub review: Option<ReviewResponse>,
}

impl From<&SubmissionDetail> for SubmissionDetailResponse {
    fn from(detail: &SubmissionDetail) -> Self {
        Self {
            submission: SubmissionResponse::from(&detail.submission),
            grade: detail.grade.as_ref().map(GradeResponse::from),
            review: detail.review.as_ref().map(ReviewResponse::from),
        }
    }
}

/// One row of a teacher's grading queue
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingQueueEntryResponse {
    pub submission: SubmissionResponse,
    pub grade: Option<GradeResponse>,
}

impl From<&GradingQueueEntry> for GradingQueueEntryResponse {
    fn from(entry: &GradingQueueEntry) -> Self {
        Self {
            submission: SubmissionResponse::from(&entry.submission),
            grade: entry.grade.as_ref().map(GradeResponse::from),
        }
    }
}

/// Statistics overview DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub total_submissions: u64,
    pub pending: u64,
    pub graded: u64,
    pub reviewed: u64,
    pub average_score: Option<f64>,
}

impl From<GradingOverview> for OverviewResponse {
    fn from(overview: GradingOverview) -> Self {
        Self {
            total_submissions: overview.total_submissions,
            pending: overview.pending,
            graded: overview.graded,
            reviewed: overview.reviewed,
            average_score: overview.average_score,
        }
    }
}

/// Per-centre or per-subject statistics DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStatisticsResponse {
    pub id: String,
    pub name: String,
    pub total_submissions: u64,
    pub graded: u64,
    pub reviewed: u64,
    pub average_score: Option<f64>,
}

impl From<GroupStatistics> for GroupStatisticsResponse {
    fn from(group: GroupStatistics) -> Self {
        Self {
            id: group.id,
            name: group.name,
            total_submissions: group.total_submissions,
            graded: group.graded,
            reviewed: group.reviewed,
            average_score: group.average_score,
        }
    }
}
