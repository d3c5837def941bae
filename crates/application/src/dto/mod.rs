//! Data Transfer Objects (DTOs) for API layer
//!
//! DTOs provide a stable API contract separate from internal domain models.
//! Field names follow the grading client (camelCase), and request types
//! carry `validator` annotations so both the API extractor and the services
//! can check them.

mod exam_paper;
mod grading;
mod rubric;

pub use exam_paper::*;
pub use grading::*;
pub use rubric::*;
