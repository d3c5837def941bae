//! Exam Grading Domain Types
//!
//! This crate provides the core domain model for grading exam papers against
//! a fixed rubric. It defines the rubric table, the per-item score record,
//! validation results, submission and grade entities, and domain errors.
//!
//! ## Architecture
//!
//! - **identifiers**: Strongly-typed UUID-based identifiers for all entities
//! - **scores**: The fixed-shape `DetailedScores` record
//! - **rubric**: Ordered rubric table with per-item bounds and the base credit
//! - **validation**: Ordered list of violation messages
//! - **submission**: Submissions and the `pending -> graded -> reviewed` lifecycle
//! - **grade**: Initial grades, reviews and the statistics aggregates
//! - **exam_paper**: Exam papers, their status and the hosting centres
//! - **user**: Roles and their permissions
//! - **errors**: Error types with error codes and HTTP status codes
//!
//! ## Usage
//!
//! ```rust
//! use exam_grading_domain::{rubric::{Section, BASE_CREDIT}, DetailedScores};
//!
//! let scores = DetailedScores::zero();
//! assert_eq!(scores.section_1b.connectors, 0);
//! assert_eq!(Section::Section1B.items().count(), 10);
//! assert_eq!(BASE_CREDIT, 10);
//! ```

#![warn(clippy::all)]

pub mod errors;
pub mod exam_paper;
pub mod grade;
pub mod identifiers;
pub mod rubric;
pub mod scores;
pub mod submission;
pub mod user;
pub mod validation;

// Re-export commonly used types
pub use errors::{AuthorizationError, GradingError};
pub use exam_paper::{ExamCentre, ExamPaper, ExamPaperStatus};
pub use grade::{Grade, GradeReview, GradingOverview, GroupStatistics};
pub use identifiers::*;
pub use rubric::{RubricItem, Section, RUBRIC};
pub use scores::{DetailedScores, Score};
pub use submission::{Submission, SubmissionStatus};
pub use user::UserRole;
pub use validation::ValidationResult;
