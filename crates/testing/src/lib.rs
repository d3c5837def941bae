//! Testing utilities for the Exam Grading service
//!
//! This crate provides testing utilities including:
//! - Test fixtures for score records, submissions and service contexts
//! - A fluent builder for `DetailedScores`
//! - Mock implementations of the repository ports and event publisher
//! - Property-based strategies for score records
//!
//! # Examples
//!
//! ```
//! use exam_grading_domain::Section;
//! use exam_grading_testing::builders::DetailedScoresBuilder;
//!
//! let scores = DetailedScoresBuilder::new()
//!     .with_item(Section::Section1B, "connectors", 2)
//!     .build();
//! assert_eq!(scores.section_1b.connectors, 2);
//! ```

pub mod builders;
pub mod fixtures;
pub mod mocks;
pub mod strategies;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

// Re-export testing dependencies for convenience
pub use proptest;
