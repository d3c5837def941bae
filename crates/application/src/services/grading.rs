//! Grading Service
//!
//! Business logic for the grading workflow: students register uploaded
//! papers, teachers grade them against the rubric, and a second teacher
//! reviews the initial grade.

use super::{Authorizer, EventPublisher, ServiceContext, ServiceEvent};
use crate::dto::{GradeRequest, RegisterSubmissionRequest, ReviewRequest};
use crate::scoring::RubricEngine;
use crate::ApplicationResult;
use async_trait::async_trait;
use chrono::Utc;
use exam_grading_domain::{
    ExamPaper, ExamPaperId, Grade, GradeId, GradeReview, GradingError, ReviewId, Submission,
    SubmissionId, SubmissionStatus,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// A submission with everything recorded against it
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionDetail {
    pub submission: Submission,
    pub grade: Option<Grade>,
    pub review: Option<GradeReview>,
}

/// One row of a teacher's grading queue
#[derive(Debug, Clone, PartialEq)]
pub struct GradingQueueEntry {
    pub submission: Submission,
    pub grade: Option<Grade>,
}

/// Grading repository trait.
///
/// `record_grade` and `record_review` each persist the record and the status
/// transition together. Implementations re-check the current status as part
/// of that write and fail with [`GradingError::InvalidStatusTransition`] if
/// another writer got there first.
#[async_trait]
pub trait GradingRepositoryPort: Send + Sync {
    async fn get_exam_paper(&self, id: ExamPaperId) -> ApplicationResult<Option<ExamPaper>>;
    async fn create_submission(&self, submission: &Submission) -> ApplicationResult<()>;
    async fn get_submission(&self, id: SubmissionId) -> ApplicationResult<Option<Submission>>;
    async fn list_by_status(&self, statuses: &[SubmissionStatus]) -> ApplicationResult<Vec<Submission>>;
    async fn get_grade(&self, submission_id: SubmissionId) -> ApplicationResult<Option<Grade>>;
    async fn get_review(&self, submission_id: SubmissionId) -> ApplicationResult<Option<GradeReview>>;
    async fn record_grade(&self, grade: &Grade) -> ApplicationResult<()>;
    async fn record_review(&self, review: &GradeReview) -> ApplicationResult<()>;
}

/// Grading service implementation
pub struct GradingService<R, A, E>
where
    R: GradingRepositoryPort,
    A: Authorizer,
    E: EventPublisher,
{
    repository: Arc<R>,
    authorizer: Arc<A>,
    event_publisher: Arc<E>,
    engine: RubricEngine,
}

impl<R, A, E> GradingService<R, A, E>
where
    R: GradingRepositoryPort,
    A: Authorizer,
    E: EventPublisher,
{
    pub fn new(repository: Arc<R>, authorizer: Arc<A>, event_publisher: Arc<E>) -> Self {
        Self {
            repository,
            authorizer,
            event_publisher,
            engine: RubricEngine::new(),
        }
    }

    /// The rubric engine grades are checked with
    pub fn engine(&self) -> &RubricEngine {
        &self.engine
    }

    /// Register an uploaded paper as a pending submission.
    ///
    /// The exam paper it answers must exist.
    #[instrument(skip(self, ctx, request), fields(correlation_id = %ctx.correlation_id))]
    pub async fn register_submission(
        &self,
        ctx: &ServiceContext,
        request: RegisterSubmissionRequest,
    ) -> ApplicationResult<Submission> {
        request.validate()?;

        self.authorizer
            .can_register_submission(ctx)
            .await
            .ensure_allowed()?;
        let student_id = ctx.require_authenticated()?;

        if self
            .repository
            .get_exam_paper(request.exam_paper_id)
            .await?
            .is_none()
        {
            return Err(GradingError::ExamPaperNotFound(request.exam_paper_id).into());
        }

        let submission = Submission::new(student_id, request.exam_paper_id, request.file_ref);
        self.repository.create_submission(&submission).await?;

        info!(submission_id = %submission.id, student_id = %student_id, "Submission registered");

        self.publish(ServiceEvent::SubmissionRegistered {
            submission_id: submission.id,
            student_id,
        })
        .await;

        Ok(submission)
    }

    /// Submissions waiting on a grader or a reviewer, newest first
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn submissions_for_grading(
        &self,
        ctx: &ServiceContext,
    ) -> ApplicationResult<Vec<GradingQueueEntry>> {
        self.authorizer.can_grade(ctx).await.ensure_allowed()?;

        let mut submissions = self
            .repository
            .list_by_status(&[SubmissionStatus::Pending, SubmissionStatus::Graded])
            .await?;
        submissions.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

        let mut entries = Vec::with_capacity(submissions.len());
        for submission in submissions {
            let grade = match submission.status {
                SubmissionStatus::Pending => None,
                _ => self.repository.get_grade(submission.id).await?,
            };
            entries.push(GradingQueueEntry { submission, grade });
        }

        debug!(count = entries.len(), "Listed grading queue");
        Ok(entries)
    }

    /// Submission detail with grade and review
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn get_submission(
        &self,
        ctx: &ServiceContext,
        id: SubmissionId,
    ) -> ApplicationResult<SubmissionDetail> {
        ctx.require_authenticated()?;

        let submission = self.find_submission(id).await?;
        self.authorizer
            .can_view_submission(ctx, &submission)
            .await
            .ensure_allowed()?;

        let grade = self.repository.get_grade(id).await?;
        let review = self.repository.get_review(id).await?;

        Ok(SubmissionDetail {
            submission,
            grade,
            review,
        })
    }

    /// Grade a pending submission.
    ///
    /// Nothing is persisted unless the scores pass the rubric.
    #[instrument(skip(self, ctx, request), fields(correlation_id = %ctx.correlation_id))]
    pub async fn submit_grade(
        &self,
        ctx: &ServiceContext,
        id: SubmissionId,
        request: GradeRequest,
    ) -> ApplicationResult<Grade> {
        request.validate()?;

        self.authorizer.can_grade(ctx).await.ensure_allowed()?;
        let teacher_id = ctx.require_authenticated()?;

        let submission = self.find_submission(id).await?;
        ensure_transition(&submission, SubmissionStatus::Graded)?;

        let score = self.check_scores(id, &request.detailed_scores)?;

        let grade = Grade {
            id: GradeId::new(),
            submission_id: id,
            teacher_id,
            score,
            detailed_scores: request.detailed_scores,
            feedback: request.feedback,
            graded_at: Utc::now(),
        };
        self.repository.record_grade(&grade).await?;

        info!(submission_id = %id, grade_id = %grade.id, score, "Submission graded");

        self.publish(ServiceEvent::SubmissionGraded {
            submission_id: id,
            grade_id: grade.id,
            teacher_id,
            score,
        })
        .await;

        Ok(grade)
    }

    /// Review the initial grade of a graded submission
    #[instrument(skip(self, ctx, request), fields(correlation_id = %ctx.correlation_id))]
    pub async fn submit_review(
        &self,
        ctx: &ServiceContext,
        id: SubmissionId,
        request: ReviewRequest,
    ) -> ApplicationResult<GradeReview> {
        request.validate()?;

        self.authorizer.can_review(ctx).await.ensure_allowed()?;
        let reviewer_id = ctx.require_authenticated()?;

        let submission = self.find_submission(id).await?;
        ensure_transition(&submission, SubmissionStatus::Reviewed)?;

        let initial = self
            .repository
            .get_grade(id)
            .await?
            .ok_or(GradingError::InitialGradeNotFound(id))?;

        if initial.teacher_id == reviewer_id {
            warn!(submission_id = %id, "Grader attempted to review own grade");
            return Err(GradingError::SelfReview.into());
        }

        let score = self.check_scores(id, &request.detailed_scores)?;

        let review = GradeReview {
            id: ReviewId::new(),
            submission_id: id,
            reviewer_id,
            initial_grade_id: initial.id,
            score,
            detailed_scores: request.detailed_scores,
            feedback: request.feedback,
            review_notes: request.review_notes,
            reviewed_at: Utc::now(),
        };
        self.repository.record_review(&review).await?;

        info!(
            submission_id = %id,
            review_id = %review.id,
            score,
            delta = review.score_delta(&initial),
            "Grade reviewed"
        );

        self.publish(ServiceEvent::SubmissionReviewed {
            submission_id: id,
            review_id: review.id,
            reviewer_id,
            score,
        })
        .await;

        Ok(review)
    }

    async fn find_submission(&self, id: SubmissionId) -> ApplicationResult<Submission> {
        self.repository
            .get_submission(id)
            .await?
            .ok_or_else(|| GradingError::SubmissionNotFound(id).into())
    }

    fn check_scores(
        &self,
        id: SubmissionId,
        scores: &exam_grading_domain::DetailedScores,
    ) -> ApplicationResult<i64> {
        self.engine.score(scores).map_err(|err| {
            if let GradingError::RubricViolation(errors) = &err {
                debug!(submission_id = %id, violations = errors.len(), "Rubric validation failed");
            }
            err.into()
        })
    }

    async fn publish(&self, event: ServiceEvent) {
        if let Err(e) = self.event_publisher.publish(event).await {
            warn!(error = %e, "Failed to publish grading event");
        }
    }
}

fn ensure_transition(submission: &Submission, target: SubmissionStatus) -> Result<(), GradingError> {
    if submission.status.can_transition_to(target) {
        Ok(())
    } else {
        Err(GradingError::InvalidStatusTransition {
            from: submission.status,
            to: target,
        })
    }
}
