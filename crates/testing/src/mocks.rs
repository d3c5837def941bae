//! Mock implementations for repositories and external services.
//!
//! Provides in-memory mocks for testing services without the API layer. One
//! `MockGradingRepository` backs every repository port so tests can seed
//! papers, submissions and grades in one place.

use async_trait::async_trait;
use exam_grading_application::{
    ApplicationError, ApplicationResult, EventPublisher, ExamPaperRepositoryPort,
    GradingRepositoryPort, ServiceEvent, StatisticsRepositoryPort, StatisticsRow,
};
use exam_grading_domain::{
    CentreId, ExamCentre, ExamPaper, ExamPaperId, ExamPaperStatus, Grade, GradeReview,
    GradingError, Submission, SubmissionId, SubmissionStatus,
};
use std::collections::BTreeMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Store {
    centres: HashMap<CentreId, ExamCentre>,
    papers: HashMap<ExamPaperId, ExamPaper>,
    submissions: HashMap<SubmissionId, Submission>,
    grades: HashMap<SubmissionId, Grade>,
    reviews: HashMap<SubmissionId, GradeReview>,
}

/// Mock grading repository that counts grade and review writes
#[derive(Default)]
pub struct MockGradingRepository {
    store: RwLock<Store>,
    writes: AtomicUsize,
}

impl MockGradingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an exam centre
    pub fn insert_centre(&self, centre: ExamCentre) {
        self.store.write().centres.insert(centre.id, centre);
    }

    /// Seed an exam paper directly, bypassing the service
    pub fn insert_exam_paper(&self, paper: ExamPaper) {
        self.store.write().papers.insert(paper.id, paper);
    }

    pub fn exam_paper(&self, id: ExamPaperId) -> Option<ExamPaper> {
        self.store.read().papers.get(&id).cloned()
    }

    /// Seed a submission directly, bypassing the service
    pub fn insert_submission(&self, submission: Submission) {
        self.store.write().submissions.insert(submission.id, submission);
    }

    /// Seed a grade directly, bypassing the service
    pub fn insert_grade(&self, grade: Grade) {
        self.store.write().grades.insert(grade.submission_id, grade);
    }

    pub fn submission(&self, id: SubmissionId) -> Option<Submission> {
        self.store.read().submissions.get(&id).cloned()
    }

    pub fn grade(&self, id: SubmissionId) -> Option<Grade> {
        self.store.read().grades.get(&id).cloned()
    }

    pub fn review(&self, id: SubmissionId) -> Option<GradeReview> {
        self.store.read().reviews.get(&id).cloned()
    }

    /// Number of successful `record_grade`/`record_review` calls
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

fn advance(
    store: &mut Store,
    id: SubmissionId,
    target: SubmissionStatus,
) -> Result<(), GradingError> {
    let submission = store
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

/// Submissions attributed to groups by a key taken from their exam paper
fn grouped_rows<K>(store: &Store, groups: BTreeMap<String, String>, key: K) -> Vec<StatisticsRow>
where
    K: Fn(&ExamPaper) -> String,
{
    let mut rows = Vec::new();
    for (group_id, group_name) in groups {
        let before = rows.len();
        for submission in store.submissions.values() {
            let in_group = store
                .papers
                .get(&submission.exam_paper_id)
                .is_some_and(|paper| key(paper) == group_id);
            if in_group {
                rows.push(StatisticsRow {
                    group_id: group_id.clone(),
                    group_name: group_name.clone(),
                    status: Some(submission.status),
                    score: store.grades.get(&submission.id).map(|g| g.score),
                });
            }
        }
        if rows.len() == before {
            rows.push(StatisticsRow::empty(group_id, group_name));
        }
    }
    rows
}

#[async_trait]
impl GradingRepositoryPort for MockGradingRepository {
    async fn get_exam_paper(&self, id: ExamPaperId) -> ApplicationResult<Option<ExamPaper>> {
        Ok(self.exam_paper(id))
    }

    async fn create_submission(&self, submission: &Submission) -> ApplicationResult<()> {
        self.insert_submission(submission.clone());
        Ok(())
    }

    async fn get_submission(&self, id: SubmissionId) -> ApplicationResult<Option<Submission>> {
        Ok(self.submission(id))
    }

    async fn list_by_status(&self, statuses: &[SubmissionStatus]) -> ApplicationResult<Vec<Submission>> {
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
        Ok(self.grade(submission_id))
    }

    async fn get_review(&self, submission_id: SubmissionId) -> ApplicationResult<Option<GradeReview>> {
        Ok(self.review(submission_id))
    }

    async fn record_grade(&self, grade: &Grade) -> ApplicationResult<()> {
        let mut store = self.store.write();
        advance(&mut store, grade.submission_id, SubmissionStatus::Graded)?;
        store.grades.insert(grade.submission_id, grade.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn record_review(&self, review: &GradeReview) -> ApplicationResult<()> {
        let mut store = self.store.write();
        advance(&mut store, review.submission_id, SubmissionStatus::Reviewed)?;
        store.reviews.insert(review.submission_id, review.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl StatisticsRepositoryPort for MockGradingRepository {
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
        Ok(grouped_rows(&store, centres, |paper| paper.centre_id.to_string()))
    }

    async fn subject_rows(&self) -> ApplicationResult<Vec<StatisticsRow>> {
        let store = self.store.read();
        let subjects = store
            .papers
            .values()
            .map(|p| (p.subject_code.clone(), p.subject_name.clone()))
            .collect();
        Ok(grouped_rows(&store, subjects, |paper| paper.subject_code.clone()))
    }
}

#[async_trait]
impl ExamPaperRepositoryPort for MockGradingRepository {
    async fn list_centres(&self) -> ApplicationResult<Vec<ExamCentre>> {
        Ok(self.store.read().centres.values().cloned().collect())
    }

    async fn get_centre(&self, id: CentreId) -> ApplicationResult<Option<ExamCentre>> {
        Ok(self.store.read().centres.get(&id).cloned())
    }

    async fn create_paper(&self, paper: &ExamPaper) -> ApplicationResult<()> {
        self.insert_exam_paper(paper.clone());
        Ok(())
    }

    async fn get_paper(&self, id: ExamPaperId) -> ApplicationResult<Option<ExamPaper>> {
        Ok(self.exam_paper(id))
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

/// Event publisher that keeps every published event
#[derive(Default)]
pub struct RecordingEventPublisher {
    events: Arc<RwLock<Vec<ServiceEvent>>>,
}

impl RecordingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ServiceEvent> {
        self.events.read().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.read().len()
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(&self, event: ServiceEvent) -> Result<(), ApplicationError> {
        self.events.write().push(event);
        Ok(())
    }
}

/// Event publisher whose every call fails
pub struct FailingEventPublisher;

#[async_trait]
impl EventPublisher for FailingEventPublisher {
    async fn publish(&self, _event: ServiceEvent) -> Result<(), ApplicationError> {
        Err(ApplicationError::Internal("event bus unavailable".to_string()))
    }
}
