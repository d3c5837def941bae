//! Test fixtures for score records, submissions and service contexts.

use crate::builders::{DetailedScoresBuilder, ExamPaperBuilder};
use chrono::Utc;
use exam_grading_application::ServiceContext;
use exam_grading_domain::{
    CentreId, DetailedScores, ExamCentre, ExamPaper, ExamPaperId, Grade, GradeId, Section,
    Submission, SubmissionId, UserId, UserRole,
};

/// Every item at zero; totals to the base credit alone
pub fn blank_scores() -> DetailedScores {
    DetailedScores::zero()
}

/// Every item at its rubric maximum
pub fn full_marks() -> DetailedScores {
    DetailedScoresBuilder::full_marks().build()
}

/// A realistic in-range paper (total 72)
pub fn typical_scores() -> DetailedScores {
    DetailedScoresBuilder::new()
        .with_section_1a([6, 5, 4, 6, 3])
        .with_item(Section::Section1B, "opinion", 1)
        .with_item(Section::Section1B, "arguments", 1)
        .with_item(Section::Section1B, "development", 1)
        .with_item(Section::Section1B, "conclusion", 1)
        .with_item(Section::Section1B, "connectors", 2)
        .with_item(Section::Section1B, "spelling", 1)
        .with_item(Section::Section2, "content", 5)
        .with_item(Section::Section2, "composition", 3)
        .with_item(Section::Section3, "characters", 5)
        .with_item(Section::Section3, "relationships", 4)
        .with_item(Section::Section3, "analysis", 4)
        .with_item(Section::Section3, "composition", 10)
        .build()
}

/// Scores with one item over its bound (connectors = 3)
pub fn out_of_range_scores() -> DetailedScores {
    DetailedScoresBuilder::new()
        .with_item(Section::Section1B, "connectors", 3)
        .build()
}

/// The JSON body a grading client would send for `scores`
pub fn scores_json(scores: &DetailedScores) -> serde_json::Value {
    scores.to_json()
}

/// A centre hosting the 2025 BAC session
pub fn create_test_centre(name: &str) -> ExamCentre {
    ExamCentre::new(name, "2025", "BAC")
}

/// A scheduled paper at `centre_id`
pub fn create_test_paper(centre_id: CentreId) -> ExamPaper {
    ExamPaperBuilder::new(centre_id).build()
}

/// A fresh pending submission for a random student
pub fn create_test_submission() -> Submission {
    Submission::new(UserId::new(), ExamPaperId::new(), "uploads/exam-paper.pdf")
}

/// An initial grade for `submission_id` given by `teacher_id`
pub fn create_test_grade(submission_id: SubmissionId, teacher_id: UserId) -> Grade {
    Grade {
        id: GradeId::new(),
        submission_id,
        teacher_id,
        score: 72,
        detailed_scores: typical_scores(),
        feedback: Some("Solid argument, weak conclusion".to_string()),
        graded_at: Utc::now(),
    }
}

/// Context for an authenticated user with `role`
pub fn context_for(user_id: UserId, role: UserRole) -> ServiceContext {
    ServiceContext::authenticated(user_id, role, format!("test-{}", role))
}

pub fn student_context() -> ServiceContext {
    context_for(UserId::new(), UserRole::Student)
}

pub fn teacher_context() -> ServiceContext {
    context_for(UserId::new(), UserRole::Teacher)
}

pub fn admin_context() -> ServiceContext {
    context_for(UserId::new(), UserRole::Admin)
}
