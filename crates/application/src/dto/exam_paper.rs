//! Exam paper and centre DTOs

use chrono::{DateTime, NaiveDate, Utc};
use exam_grading_domain::{CentreId, ExamCentre, ExamPaper, ExamPaperId, ExamPaperStatus};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Create an exam paper
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExamPaperRequest {
    pub centre_id: CentreId,

    #[validate(length(min = 1, max = 64))]
    pub session_id: String,

    #[validate(length(min = 1, max = 32))]
    pub subject_code: String,

    #[validate(length(min = 1, max = 128))]
    pub subject_name: String,

    pub exam_date: NaiveDate,

    #[validate(range(min = 1, max = 600))]
    pub duration_minutes: u32,

    #[validate(range(min = 1, max = 100))]
    pub total_points: u32,
}

/// Move an exam paper to another status
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExamPaperStatusRequest {
    pub status: ExamPaperStatus,
}

/// Exam paper response DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamPaperResponse {
    pub id: ExamPaperId,
    pub centre_id: CentreId,
    pub session_id: String,
    pub subject_code: String,
    pub subject_name: String,
    pub exam_date: NaiveDate,
    pub duration_minutes: u32,
    pub total_points: u32,
    pub status: ExamPaperStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&ExamPaper> for ExamPaperResponse {
    fn from(paper: &ExamPaper) -> Self {
        Self {
            id: paper.id,
            centre_id: paper.centre_id,
            session_id: paper.session_id.clone(),
            subject_code: paper.subject_code.clone(),
            subject_name: paper.subject_name.clone(),
            exam_date: paper.exam_date,
            duration_minutes: paper.duration_minutes,
            total_points: paper.total_points,
            status: paper.status,
            created_at: paper.created_at,
        }
    }
}

/// Exam centre response DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamCentreResponse {
    pub id: CentreId,
    pub name: String,
    pub edition: String,
    pub exam: String,
}

impl From<&ExamCentre> for ExamCentreResponse {
    fn from(centre: &ExamCentre) -> Self {
        Self {
            id: centre.id,
            name: centre.name.clone(),
            edition: centre.edition.clone(),
            exam: centre.exam.clone(),
        }
    }
}
