//! Property-based strategies for score records.

use crate::builders::item_slot;
use exam_grading_domain::{rubric::RUBRIC, DetailedScores, Score};
use proptest::prelude::*;

fn assemble(values: Vec<Score>) -> DetailedScores {
    let mut scores = DetailedScores::zero();
    for (item, value) in RUBRIC.iter().zip(values) {
        if let Some(slot) = item_slot(&mut scores, item.section, item.key) {
            *slot = value;
        }
    }
    scores
}

/// Records whose every item lies within its rubric bound
pub fn in_range_scores() -> impl Strategy<Value = DetailedScores> {
    RUBRIC
        .iter()
        .map(|item| (item.min()..=item.max).boxed())
        .collect::<Vec<_>>()
        .prop_map(assemble)
}

/// Records with arbitrary item values, `i32` extremes included
pub fn any_scores() -> impl Strategy<Value = DetailedScores> {
    proptest::collection::vec(any::<Score>(), RUBRIC.len()).prop_map(assemble)
}

/// Records with values a little outside the bounds on either side
pub fn near_bound_scores() -> impl Strategy<Value = DetailedScores> {
    RUBRIC
        .iter()
        .map(|item| (item.min() - 3..=item.max + 3).boxed())
        .collect::<Vec<_>>()
        .prop_map(assemble)
}
