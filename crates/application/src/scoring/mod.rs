//! Scoring module - rubric validation and score aggregation
//!
//! Wraps the static rubric table from the domain crate with the checks a
//! grader's submission must pass before it is persisted.

mod engine;

pub use engine::*;
