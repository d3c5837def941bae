//! Rubric Engine - validation and aggregation of per-item exam scores
//!
//! The engine walks the static rubric table in declaration order. It is pure
//! and synchronous: no I/O, no shared state, and it never fails. Out-of-range
//! values are reported as messages, never clamped.

use exam_grading_domain::rubric::{self, RubricItem, BASE_CREDIT, MAX_TOTAL};
use exam_grading_domain::{DetailedScores, GradingError, ValidationResult};
use tracing::debug;

/// Message appended when the aggregate total is over [`MAX_TOTAL`]
pub const TOTAL_EXCEEDED_MESSAGE: &str = "Total score cannot exceed 100 points";

/// Validates score records against a rubric table and computes totals
#[derive(Debug, Clone, Copy)]
pub struct RubricEngine {
    items: &'static [RubricItem],
}

impl Default for RubricEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RubricEngine {
    /// Create an engine over the standard exam rubric
    pub fn new() -> Self {
        Self {
            items: rubric::rubric(),
        }
    }

    /// The rubric items this engine checks, in declaration order
    pub fn items(&self) -> &'static [RubricItem] {
        self.items
    }

    /// Check every item against its bound, then the aggregate total.
    ///
    /// One message per out-of-range item in declaration order, followed by
    /// [`TOTAL_EXCEEDED_MESSAGE`] when the total is over the limit.
    pub fn validate(&self, scores: &DetailedScores) -> ValidationResult {
        let mut result = ValidationResult::success();

        for item in self.items {
            let value = item.score(scores);
            if !item.accepts(value) {
                result.add_error(range_violation(item));
            }
        }

        let total = self.total(scores);
        if total > MAX_TOTAL {
            result.add_error(TOTAL_EXCEEDED_MESSAGE);
        }

        debug!(
            total,
            violations = result.errors.len(),
            "Validated detailed scores"
        );
        result
    }

    /// Sum of every item plus the base credit.
    ///
    /// Accumulates in `i64`, so any combination of `i32` item values sums
    /// without overflow.
    pub fn total(&self, scores: &DetailedScores) -> i64 {
        self.items
            .iter()
            .map(|item| i64::from(item.score(scores)))
            .sum::<i64>()
            + BASE_CREDIT
    }

    /// Validate, then total. Violations come back as a grading error.
    pub fn score(&self, scores: &DetailedScores) -> Result<i64, GradingError> {
        let result = self.validate(scores);
        if result.has_errors() {
            return Err(GradingError::RubricViolation(result.into_errors()));
        }
        Ok(self.total(scores))
    }

    /// The exam mark for a total: `total / 10`, unclamped.
    ///
    /// In-range totals map onto 1.0..=10.0; negative totals give negative marks.
    pub fn final_mark(&self, total: i64) -> f64 {
        total as f64 / 10.0
    }

    /// Total of a record with every item at its maximum
    pub fn max_total(&self) -> i64 {
        rubric::max_achievable_total()
    }
}

fn range_violation(item: &RubricItem) -> String {
    format!(
        "{} - {}: score must be between {} and {} points",
        item.section.label(),
        item.label,
        item.min(),
        item.max
    )
}
