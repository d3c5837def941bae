//! API v1 routes.

use crate::state::AppState;
use axum::Router;

pub mod exam_papers;
pub mod rubric;
pub mod statistics;
pub mod submissions;

/// Create all v1 API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(rubric::routes())
        .merge(submissions::routes())
        .merge(exam_papers::routes())
        .merge(statistics::routes())
}
