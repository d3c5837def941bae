//! Statistics Service
//!
//! Administrative overview of the grading workload, overall and broken down
//! by exam centre and by subject.

use super::{Authorizer, ServiceContext};
use crate::ApplicationResult;
use async_trait::async_trait;
use exam_grading_domain::grade::average_score;
use exam_grading_domain::{GradingOverview, GroupStatistics, SubmissionStatus};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Read-only aggregate queries over submissions and grades
#[async_trait]
pub trait StatisticsRepositoryPort: Send + Sync {
    /// Number of submissions currently in `status`
    async fn count_by_status(&self, status: SubmissionStatus) -> ApplicationResult<u64>;

    /// Score of every initial grade
    async fn grade_scores(&self) -> ApplicationResult<Vec<i64>>;

    /// One row per submission grouped by the centre of its exam paper, plus
    /// one empty row for every centre without submissions
    async fn centre_rows(&self) -> ApplicationResult<Vec<StatisticsRow>>;

    /// One row per submission grouped by the subject of its exam paper, plus
    /// one empty row for every subject without submissions
    async fn subject_rows(&self) -> ApplicationResult<Vec<StatisticsRow>>;
}

/// A submission (or its absence) attributed to a statistics group
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsRow {
    pub group_id: String,
    pub group_name: String,
    /// `None` for a group that has no submissions
    pub status: Option<SubmissionStatus>,
    /// Initial grade score, if the submission has been graded
    pub score: Option<i64>,
}

impl StatisticsRow {
    pub fn empty(group_id: impl Into<String>, group_name: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            group_name: group_name.into(),
            status: None,
            score: None,
        }
    }
}

/// Fold rows into one aggregate per group, ordered by group name
fn aggregate(rows: Vec<StatisticsRow>) -> Vec<GroupStatistics> {
    let mut groups: BTreeMap<String, (String, Vec<(SubmissionStatus, Option<i64>)>)> =
        BTreeMap::new();

    for row in rows {
        let (_, submissions) = groups
            .entry(row.group_id)
            .or_insert_with(|| (row.group_name, Vec::new()));
        if let Some(status) = row.status {
            submissions.push((status, row.score));
        }
    }

    let mut stats: Vec<GroupStatistics> = groups
        .into_iter()
        .map(|(id, (name, submissions))| GroupStatistics::from_submissions(id, name, submissions))
        .collect();
    stats.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    stats
}

/// Statistics service implementation
pub struct StatisticsService<R, A>
where
    R: StatisticsRepositoryPort,
    A: Authorizer,
{
    repository: Arc<R>,
    authorizer: Arc<A>,
}

impl<R, A> StatisticsService<R, A>
where
    R: StatisticsRepositoryPort,
    A: Authorizer,
{
    pub fn new(repository: Arc<R>, authorizer: Arc<A>) -> Self {
        Self {
            repository,
            authorizer,
        }
    }

    /// Submission counts per status and the mean grade score
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn overview(&self, ctx: &ServiceContext) -> ApplicationResult<GradingOverview> {
        self.authorizer.can_view_statistics(ctx).await.ensure_allowed()?;

        let pending = self.repository.count_by_status(SubmissionStatus::Pending).await?;
        let graded = self.repository.count_by_status(SubmissionStatus::Graded).await?;
        let reviewed = self.repository.count_by_status(SubmissionStatus::Reviewed).await?;
        let scores = self.repository.grade_scores().await?;

        let overview = GradingOverview {
            total_submissions: pending + graded + reviewed,
            pending,
            graded,
            reviewed,
            average_score: average_score(&scores),
        };

        debug!(total = overview.total_submissions, "Computed grading overview");
        Ok(overview)
    }

    /// Per-centre counts and mean grade score
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn by_centre(&self, ctx: &ServiceContext) -> ApplicationResult<Vec<GroupStatistics>> {
        self.authorizer.can_view_statistics(ctx).await.ensure_allowed()?;

        let stats = aggregate(self.repository.centre_rows().await?);
        debug!(groups = stats.len(), "Computed centre statistics");
        Ok(stats)
    }

    /// Per-subject counts and mean grade score
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn by_subject(&self, ctx: &ServiceContext) -> ApplicationResult<Vec<GroupStatistics>> {
        self.authorizer.can_view_statistics(ctx).await.ensure_allowed()?;

        let stats = aggregate(self.repository.subject_rows().await?);
        debug!(groups = stats.len(), "Computed subject statistics");
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_groups_and_orders_by_name() {
        let rows = vec![
            StatisticsRow {
                group_id: "MAT".into(),
                group_name: "Mathematics".into(),
                status: Some(SubmissionStatus::Graded),
                score: Some(64),
            },
            StatisticsRow::empty("BIO", "Biology"),
            StatisticsRow {
                group_id: "MAT".into(),
                group_name: "Mathematics".into(),
                status: Some(SubmissionStatus::Pending),
                score: None,
            },
        ];

        let stats = aggregate(rows);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].name, "Biology");
        assert_eq!(stats[0].total_submissions, 0);
        assert_eq!(stats[0].average_score, None);
        assert_eq!(stats[1].id, "MAT");
        assert_eq!(stats[1].total_submissions, 2);
        assert_eq!(stats[1].graded, 1);
        assert_eq!(stats[1].average_score, Some(64.0));
    }
}
