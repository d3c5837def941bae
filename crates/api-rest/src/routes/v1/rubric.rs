//! Rubric endpoints.
//!
//! Stateless scoring helpers a grading form calls while a teacher types:
//! the bound table, live validation and the running total.

use crate::{error::ApiError, error::ApiResult, responses::ApiResponse, state::AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use exam_grading_application::dto::{RubricResponse, TotalResponse, ValidateResponse};
use exam_grading_domain::DetailedScores;
use tracing::debug;

/// Rubric routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rubric", get(get_rubric))
        .route("/rubric/validate", post(validate_scores))
        .route("/rubric/total", post(compute_total))
}

fn scores_from(payload: Result<Json<DetailedScores>, JsonRejection>) -> ApiResult<DetailedScores> {
    payload
        .map(|Json(scores)| scores)
        .map_err(|e| ApiError::BadRequest(format!("Invalid score record: {}", e.body_text())))
}

/// Bound table with base credit and total limits
async fn get_rubric(State(state): State<AppState>) -> Json<ApiResponse<RubricResponse>> {
    Json(ApiResponse::success(RubricResponse::from_engine(&state.engine)))
}

/// Validate a score record.
///
/// An invalid record is still a successful request; the violations are the data.
async fn validate_scores(
    State(state): State<AppState>,
    payload: Result<Json<DetailedScores>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<ValidateResponse>>> {
    let scores = scores_from(payload)?;

    let result = state.engine.validate(&scores);
    let total = state.engine.total(&scores);
    debug!(is_valid = result.is_valid, total, "Validated score record");

    Ok(Json(ApiResponse::success(ValidateResponse { result, total })))
}

/// Total and final mark of a score record, without validation
async fn compute_total(
    State(state): State<AppState>,
    payload: Result<Json<DetailedScores>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<TotalResponse>>> {
    let scores = scores_from(payload)?;

    let total = state.engine.total(&scores);
    let final_mark = state.engine.final_mark(total);

    Ok(Json(ApiResponse::success(TotalResponse { total, final_mark })))
}
