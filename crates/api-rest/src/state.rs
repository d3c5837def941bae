//! Application state and dependency injection.
//!
//! This module defines the shared application state that is passed
//! to all route handlers via Axum's state extraction.

use crate::config::ApiConfig;
use async_trait::async_trait;
use exam_grading_application::{
    services::{GradingQueueEntry, SubmissionDetail},
    dto::{
        CreateExamPaperRequest, GradeRequest, RegisterSubmissionRequest, ReviewRequest,
        UpdateExamPaperStatusRequest,
    },
    ApplicationError, ApplicationResult, Authorizer, DefaultAuthorizer, EventPublisher,
    ExamPaperRepositoryPort, ExamPaperService, GradingRepositoryPort, GradingService,
    NoOpEventPublisher, RubricEngine, ServiceContext, StatisticsRepositoryPort, StatisticsRow,
    StatisticsService,
};
use exam_grading_domain::{
    CentreId, ExamCentre, ExamPaper, ExamPaperId, ExamPaperStatus, Grade, GradeReview,
    GradingError, GradingOverview, GroupStatistics, Submission, SubmissionId, SubmissionStatus,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// API configuration
    pub config: Arc<ApiConfig>,

    /// Rubric engine for the stateless scoring endpoints
    pub engine: RubricEngine,

    /// Grading service (type-erased)
    pub grading_service: Arc<dyn GradingServiceTrait>,

    /// Exam paper service (type-erased)
    pub exam_paper_service: Arc<dyn ExamPaperServiceTrait>,

    /// Statistics service (type-erased)
    pub statistics_service: Arc<dyn StatisticsServiceTrait>,
}

impl AppState {
    /// Create a new application state backed by the in-memory repository,
    /// seeded with the default exam centres
    pub fn new(config: ApiConfig) -> Self {
        let repository = Arc::new(InMemoryGradingRepository::with_centres(default_centres()));
        let authorizer = Arc::new(DefaultAuthorizer);
        let event_publisher = Arc::new(NoOpEventPublisher);

        let grading_service = GradingService::new(
            Arc::clone(&repository),
            Arc::clone(&authorizer),
            Arc::clone(&event_publisher),
        );
        let exam_paper_service = ExamPaperService::new(
            Arc::clone(&repository),
            Arc::clone(&authorizer),
            event_publisher,
        );
        let statistics_service = StatisticsService::new(repository, authorizer);

        Self::with_services(config, grading_service, exam_paper_service, statistics_service)
    }

    /// Create application state with custom service implementations
    pub fn with_services<G, P, S>(
        config: ApiConfig,
        grading_service: G,
        exam_paper_service: P,
        statistics_service: S,
    ) -> Self
    where
        G: GradingServiceTrait + 'static,
        P: ExamPaperServiceTrait + 'static,
        S: StatisticsServiceTrait + 'static,
    {
        Self {
            config: Arc::new(config),
            engine: RubricEngine::new(),
            grading_service: Arc::new(grading_service),
            exam_paper_service: Arc::new(exam_paper_service),
            statistics_service: Arc::new(statistics_service),
        }
    }

    /// Get JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt_secret
    }
}

// ============================================================================
// SERVICE TRAITS (Type-erased interfaces for route handlers)
// ============================================================================

/// Type-erased grading service trait
#[async_trait]
pub trait GradingServiceTrait: Send + Sync {
    async fn register_submission(
        &self,
        ctx: &ServiceContext,
        request: RegisterSubmissionRequest,
    ) -> ApplicationResult<Submission>;

    async fn submissions_for_grading(
        &self,
        ctx: &ServiceContext,
    ) -> ApplicationResult<Vec<GradingQueueEntry>>;

    async fn get_submission(
        &self,
        ctx: &ServiceContext,
        id: SubmissionId,
    ) -> ApplicationResult<SubmissionDetail>;

    async fn submit_grade(
        &self,
        ctx: &ServiceContext,
        id: SubmissionId,
        request: GradeRequest,
    ) -> ApplicationResult<Grade>;

    async fn submit_review(
        &self,
        ctx: &ServiceContext,
        id: SubmissionId,
        request: ReviewRequest,
    ) -> ApplicationResult<GradeReview>;
}

/// Type-erased exam paper service trait
#[async_trait]
pub trait ExamPaperServiceTrait: Send + Sync {
    async fn list_centres(&self, ctx: &ServiceContext) -> ApplicationResult<Vec<ExamCentre>>;

    async fn create_paper(
        &self,
        ctx: &ServiceContext,
        request: CreateExamPaperRequest,
    ) -> ApplicationResult<ExamPaper>;

    async fn list_by_session(
        &self,
        ctx: &ServiceContext,
        session_id: &str,
    ) -> ApplicationResult<Vec<ExamPaper>>;

    async fn update_status(
        &self,
        ctx: &ServiceContext,
        id: ExamPaperId,
        request: UpdateExamPaperStatusRequest,
    ) -> ApplicationResult<ExamPaper>;
}

/// Type-erased statistics service trait
#[async_trait]
pub trait StatisticsServiceTrait: Send + Sync {
    async fn overview(&self, ctx: &ServiceContext) -> ApplicationResult<GradingOverview>;
    async fn by_centre(&self, ctx: &ServiceContext) -> ApplicationResult<Vec<GroupStatistics>>;
    async fn by_subject(&self, ctx: &ServiceContext) -> ApplicationResult<Vec<GroupStatistics>>;
}

// ============================================================================
// SERVICE TRAIT IMPLEMENTATIONS
// ============================================================================

#[async_trait]
impl<R, A, E> GradingServiceTrait for GradingService<R, A, E>
where
    R: GradingRepositoryPort + 'static,
    A: Authorizer + 'static,
    E: EventPublisher + 'static,
{
    async fn register_submission(
        &self,
        ctx: &ServiceContext,
        request: RegisterSubmissionRequest,
    ) -> ApplicationResult<Submission> {
        GradingService::register_submission(self, ctx, request).await
    }

    async fn submissions_for_grading(
        &self,
        ctx: &ServiceContext,
    ) -> ApplicationResult<Vec<GradingQueueEntry>> {
        GradingService::submissions_for_grading(self, ctx).await
    }

    async fn get_submission(
        &self,
        ctx: &ServiceContext,
        id: SubmissionId,
    ) -> ApplicationResult<SubmissionDetail> {
        GradingService::get_submission(self, ctx, id).await
    }

    async fn submit_grade(
        &self,
        ctx: &ServiceContext,
        id: SubmissionId,
        request: GradeRequest,
    ) -> ApplicationResult<Grade> {
        GradingService::submit_grade(self, ctx, id, request).await
    }

    async fn submit_review(
        &self,
        ctx: &ServiceContext,
        id: SubmissionId,
        request: ReviewRequest,
    ) -> ApplicationResult<GradeReview> {
        GradingService::submit_review(self, ctx, id, request).await
    }
}

#[async_trait]
impl<R, A, E> ExamPaperServiceTrait for ExamPaperService<R, A, E>
where
    R: ExamPaperRepositoryPort + 'static,
    A: Authorizer + 'static,
    E: EventPublisher + 'static,
{
    async fn list_centres(&self, ctx: &ServiceContext) -> ApplicationResult<Vec<ExamCentre>> {
        ExamPaperService::list_centres(self, ctx).await
    }

    async fn create_paper(
        &self,
        ctx: &ServiceContext,
        request: CreateExamPaperRequest,
    ) -> ApplicationResult<ExamPaper> {
        ExamPaperService::create_paper(self, ctx, request).await
    }

    async fn list_by_session(
        &self,
        ctx: &ServiceContext,
        session_id: &str,
    ) -> ApplicationResult<Vec<ExamPaper>> {
        ExamPaperService::list_by_session(self, ctx, session_id).await
    }

    async fn update_status(
        &self,
        ctx: &ServiceContext,
        id: ExamPaperId,
        request: UpdateExamPaperStatusRequest,
    ) -> ApplicationResult<ExamPaper> {
        ExamPaperService::update_status(self, ctx, id, request).await
    }
}

#[async_trait]
impl<R, A> StatisticsServiceTrait for StatisticsService<R, A>
where
    R: StatisticsRepositoryPort + 'static,
    A: Authorizer + 'static,
{
    async fn overview(&self, ctx: &ServiceContext) -> ApplicationResult<GradingOverview> {
        StatisticsService::overview(self, ctx).await
    }

    async fn by_centre(&self, ctx: &ServiceContext) -> ApplicationResult<Vec<GroupStatistics>> {
        StatisticsService::by_centre(self, ctx).await
    }

    async fn by_subject(&self, ctx: &ServiceContext) -> ApplicationResult<Vec<GroupStatistics>> {
        StatisticsService::by_subject(self, ctx).await
    }
}

// ============================================================================
// IN-MEMORY REPOSITORY (development and tests)
// ============================================================================

/// Centres the in-memory deployment starts with
pub fn default_centres() -> Vec<ExamCentre> {
    vec![
        ExamCentre::new("Colegiul National 'Andrei Mocanu'", "2025", "BAC"),
        ExamCentre::new("Liceul Jador", "2025", "BAC"),
        ExamCentre::new("Bogdan de la Ploiesti", "2025", "BAC"),
    ]
}

#[derive(Default)]
struct GradingStore {
    centres: HashMap<CentreId, ExamCentre>,
    papers: HashMap<ExamPaperId, ExamPaper>,
    submissions: HashMap<SubmissionId, Submission>,
    grades: HashMap<SubmissionId, Grade>,
    reviews: HashMap<SubmissionId, GradeReview>,
}

impl GradingStore {
    /// Move a submission to `target`, re-checking the current status
    fn transition(
        &mut self,
        id: SubmissionId,
        target: SubmissionStatus,
    ) -> Result<(), GradingError> {
        let submission = self
            .submissions
            .get_mut(&id)
            .ok_or(GradingError::SubmissionNotFound(id))?;

        if !submission.status.can_transition_to(target) {
            return Err(GradingError::InvalidStatusTransition {
                from: submission.status,
                to: target,
            });
        }

        submission.status = target;
        Ok(())
    }

    /// Rows for every group in `groups`, attributing each submission through
    /// the group key of its exam paper
    fn rows_by<K>(&self, groups: HashMap<String, String>, group_of: K) -> Vec<StatisticsRow>
    where
        K: Fn(&ExamPaper) -> String,
    {
        let mut members: HashMap<String, Vec<&Submission>> = HashMap::new();
        for submission in self.submissions.values() {
            if let Some(paper) = self.papers.get(&submission.exam_paper_id) {
                members.entry(group_of(paper)).or_default().push(submission);
            }
        }

        let mut rows = Vec::new();
        for (group_id, group_name) in groups {
            match members.get(&group_id) {
                Some(submissions) => rows.extend(submissions.iter().map(|s| StatisticsRow {
                    group_id: group_id.clone(),
                    group_name: group_name.clone(),
                    status: Some(s.status),
                    score: self.grades.get(&s.id).map(|g| g.score),
                })),
                None => rows.push(StatisticsRow::empty(group_id, group_name)),
            }
        }
        rows
    }
}

/// In-memory grading repository.
///
/// Grade and review writes take the write lock once for both the record and
/// the status change, so concurrent graders of one submission cannot both win.
pub struct InMemoryGradingRepository {
    store: RwLock<GradingStore>,
}

impl InMemoryGradingRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(GradingStore::default()),
        }
    }

    /// Repository that knows `centres` and nothing else
    pub fn with_centres(centres: Vec<ExamCentre>) -> Self {
        let store = GradingStore {
            centres: centres.into_iter().map(|c| (c.id, c)).collect(),
            ..GradingStore::default()
        };
        Self {
            store: RwLock::new(store),
        }
    }
}

impl Default for InMemoryGradingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GradingRepositoryPort for InMemoryGradingRepository {
    async fn get_exam_paper(&self, id: ExamPaperId) -> ApplicationResult<Option<ExamPaper>> {
        Ok(self.store.read().papers.get(&id).cloned())
    }

    async fn create_submission(&self, submission: &Submission) -> ApplicationResult<()> {
        let mut store = self.store.write();
        if store.submissions.contains_key(&submission.id) {
            return Err(ApplicationError::Conflict(format!(
                "Submission {} already exists",
                submission.id
            )));
        }
        store.submissions.insert(submission.id, submission.clone());
        Ok(())
    }

    async fn get_submission(&self, id: SubmissionId) -> ApplicationResult<Option<Submission>> {
        Ok(self.store.read().submissions.get(&id).cloned())
    }

    async fn list_by_status(
        &self,
        statuses: &[SubmissionStatus],
    ) -> ApplicationResult<Vec<Submission>> {
        Ok(self
            .store
            .read()
            .submissions
            .values()
            .filter(|s| statuses.contains(&s.status))
            .cloned()
            .collect())
    }

    async fn get_grade(&self, submission_id: SubmissionId) -> ApplicationResult<Option<Grade>> {
        Ok(self.store.read().grades.get(&submission_id).cloned())
    }

    async fn get_review(
        &self,
        submission_id: SubmissionId,
    ) -> ApplicationResult<Option<GradeReview>> {
        Ok(self.store.read().reviews.get(&submission_id).cloned())
    }

    async fn record_grade(&self, grade: &Grade) -> ApplicationResult<()> {
        let mut store = self.store.write();
        store.transition(grade.submission_id, SubmissionStatus::Graded)?;
        store.grades.insert(grade.submission_id, grade.clone());
        Ok(())
    }

    async fn record_review(&self, review: &GradeReview) -> ApplicationResult<()> {
        let mut store = self.store.write();
        store.transition(review.submission_id, SubmissionStatus::Reviewed)?;
        store.reviews.insert(review.submission_id, review.clone());
        Ok(())
    }
}

#[async_trait]
impl StatisticsRepositoryPort for InMemoryGradingRepository {
    async fn count_by_status(&self, status: SubmissionStatus) -> ApplicationResult<u64> {
        Ok(self
            .store
            .read()
            .submissions
            .values()
            .filter(|s| s.status == status)
            .count() as u64)
    }

    async fn grade_scores(&self) -> ApplicationResult<Vec<i64>> {
        Ok(self.store.read().grades.values().map(|g| g.score).collect())
    }

    async fn centre_rows(&self) -> ApplicationResult<Vec<StatisticsRow>> {
        let store = self.store.read();
        let centres = store
            .centres
            .values()
            .map(|c| (c.id.to_string(), c.name.clone()))
            .collect();
        Ok(store.rows_by(centres, |paper| paper.centre_id.to_string()))
    }

    async fn subject_rows(&self) -> ApplicationResult<Vec<StatisticsRow>> {
        let store = self.store.read();
        let subjects = store
            .papers
            .values()
            .map(|p| (p.subject_code.clone(), p.subject_name.clone()))
            .collect();
        Ok(store.rows_by(subjects, |paper| paper.subject_code.clone()))
    }
}

#[async_trait]
impl ExamPaperRepositoryPort for InMemoryGradingRepository {
    async fn list_centres(&self) -> ApplicationResult<Vec<ExamCentre>> {
        Ok(self.store.read().centres.values().cloned().collect())
    }

    async fn get_centre(&self, id: CentreId) -> ApplicationResult<Option<ExamCentre>> {
        Ok(self.store.read().centres.get(&id).cloned())
    }

    async fn create_paper(&self, paper: &ExamPaper) -> ApplicationResult<()> {
        let mut store = self.store.write();
        if store.papers.contains_key(&paper.id) {
            return Err(ApplicationError::Conflict(format!(
                "Exam paper {} already exists",
                paper.id
            )));
        }
        store.papers.insert(paper.id, paper.clone());
        Ok(())
    }

    async fn get_paper(&self, id: ExamPaperId) -> ApplicationResult<Option<ExamPaper>> {
        Ok(self.store.read().papers.get(&id).cloned())
    }

    async fn list_by_session(&self, session_id: &str) -> ApplicationResult<Vec<ExamPaper>> {
        Ok(self
            .store
            .read()
            .papers
            .values()
            .filter(|p| p.belongs_to_session(session_id))
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: ExamPaperId,
        status: ExamPaperStatus,
    ) -> ApplicationResult<ExamPaper> {
        let mut store = self.store.write();
        let paper = store
            .papers
            .get_mut(&id)
            .ok_or(GradingError::ExamPaperNotFound(id))?;

        if !paper.status.can_transition_to(status) {
            return Err(GradingError::InvalidPaperStatusTransition {
                from: paper.status,
                to: status,
            }
            .into());
        }

        paper.status = status;
        Ok(paper.clone())
    }
}
