//! Exam Paper Service
//!
//! Administrative metadata for the papers students submit against, and the
//! centres that host them.

use super::{Authorizer, EventPublisher, ServiceContext, ServiceEvent};
use crate::dto::{CreateExamPaperRequest, UpdateExamPaperStatusRequest};
use crate::ApplicationResult;
use async_trait::async_trait;
use chrono::Utc;
use exam_grading_domain::{
    CentreId, ExamCentre, ExamPaper, ExamPaperId, ExamPaperStatus, GradingError,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Exam paper repository trait.
///
/// `update_status` re-checks the current status as part of the write and
/// fails with [`GradingError::InvalidPaperStatusTransition`] when the move is
/// not allowed from what is stored.
#[async_trait]
pub trait ExamPaperRepositoryPort: Send + Sync {
    async fn list_centres(&self) -> ApplicationResult<Vec<ExamCentre>>;
    async fn get_centre(&self, id: CentreId) -> ApplicationResult<Option<ExamCentre>>;
    async fn create_paper(&self, paper: &ExamPaper) -> ApplicationResult<()>;
    async fn get_paper(&self, id: ExamPaperId) -> ApplicationResult<Option<ExamPaper>>;
    async fn list_by_session(&self, session_id: &str) -> ApplicationResult<Vec<ExamPaper>>;
    async fn update_status(
        &self,
        id: ExamPaperId,
        status: ExamPaperStatus,
    ) -> ApplicationResult<ExamPaper>;
}

/// Exam paper service implementation
pub struct ExamPaperService<R, A, E>
where
    R: ExamPaperRepositoryPort,
    A: Authorizer,
    E: EventPublisher,
{
    repository: Arc<R>,
    authorizer: Arc<A>,
    event_publisher: Arc<E>,
}

impl<R, A, E> ExamPaperService<R, A, E>
where
    R: ExamPaperRepositoryPort,
    A: Authorizer,
    E: EventPublisher,
{
    pub fn new(repository: Arc<R>, authorizer: Arc<A>, event_publisher: Arc<E>) -> Self {
        Self {
            repository,
            authorizer,
            event_publisher,
        }
    }

    /// Every exam centre, ordered by name
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn list_centres(&self, ctx: &ServiceContext) -> ApplicationResult<Vec<ExamCentre>> {
        ctx.require_authenticated()?;

        let mut centres = self.repository.list_centres().await?;
        centres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(centres)
    }

    /// Create a scheduled exam paper at an existing centre (admins)
    #[instrument(skip(self, ctx, request), fields(correlation_id = %ctx.correlation_id))]
    pub async fn create_paper(
        &self,
        ctx: &ServiceContext,
        request: CreateExamPaperRequest,
    ) -> ApplicationResult<ExamPaper> {
        request.validate()?;

        self.authorizer
            .can_manage_exam_papers(ctx)
            .await
            .ensure_allowed()?;
        let admin_id = ctx.require_authenticated()?;

        if self.repository.get_centre(request.centre_id).await?.is_none() {
            return Err(GradingError::CentreNotFound(request.centre_id).into());
        }

        let paper = ExamPaper {
            id: ExamPaperId::new(),
            centre_id: request.centre_id,
            session_id: request.session_id,
            subject_code: request.subject_code,
            subject_name: request.subject_name,
            exam_date: request.exam_date,
            duration_minutes: request.duration_minutes,
            total_points: request.total_points,
            status: ExamPaperStatus::Scheduled,
            created_at: Utc::now(),
        };
        self.repository.create_paper(&paper).await?;

        info!(
            exam_paper_id = %paper.id,
            session_id = %paper.session_id,
            subject = %paper.subject_code,
            "Exam paper created"
        );

        self.publish(ServiceEvent::ExamPaperCreated {
            exam_paper_id: paper.id,
            centre_id: paper.centre_id,
            created_by: admin_id,
        })
        .await;

        Ok(paper)
    }

    /// Papers of one session, by exam date then subject
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn list_by_session(
        &self,
        ctx: &ServiceContext,
        session_id: &str,
    ) -> ApplicationResult<Vec<ExamPaper>> {
        ctx.require_authenticated()?;

        let mut papers = self.repository.list_by_session(session_id).await?;
        papers.sort_by(|a, b| {
            a.exam_date
                .cmp(&b.exam_date)
                .then_with(|| a.subject_code.cmp(&b.subject_code))
        });

        debug!(count = papers.len(), "Listed exam papers");
        Ok(papers)
    }

    /// Move a paper along `scheduled -> open -> closed` (admins)
    #[instrument(skip(self, ctx, request), fields(correlation_id = %ctx.correlation_id))]
    pub async fn update_status(
        &self,
        ctx: &ServiceContext,
        id: ExamPaperId,
        request: UpdateExamPaperStatusRequest,
    ) -> ApplicationResult<ExamPaper> {
        self.authorizer
            .can_manage_exam_papers(ctx)
            .await
            .ensure_allowed()?;

        let current = self
            .repository
            .get_paper(id)
            .await?
            .ok_or(GradingError::ExamPaperNotFound(id))?;

        if !current.status.can_transition_to(request.status) {
            return Err(GradingError::InvalidPaperStatusTransition {
                from: current.status,
                to: request.status,
            }
            .into());
        }

        let updated = self.repository.update_status(id, request.status).await?;

        info!(exam_paper_id = %id, from = %current.status, to = %updated.status, "Exam paper status changed");

        self.publish(ServiceEvent::ExamPaperStatusChanged {
            exam_paper_id: id,
            from: current.status,
            to: updated.status,
        })
        .await;

        Ok(updated)
    }

    async fn publish(&self, event: ServiceEvent) {
        if let Err(e) = self.event_publisher.publish(event).await {
            warn!(error = %e, "Failed to publish exam paper event");
        }
    }
}
