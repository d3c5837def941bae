//! Submission and grading endpoints.

use crate::{
    error::ApiResult,
    extractors::{AuthenticatedUser, PathParam, ValidatedJson},
    responses::{ApiResponse, Created, CreatedWithMessage},
    state::AppState,
};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use exam_grading_application::dto::{
    GradeRequest, GradeResponse, GradingQueueEntryResponse, RegisterSubmissionRequest,
    ReviewRequest, ReviewResponse, SubmissionDetailResponse, SubmissionResponse,
};
use exam_grading_domain::SubmissionId;
use tracing::instrument;

/// Submission routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/submissions", post(register_submission))
        .route("/submissions/for-grading", get(submissions_for_grading))
        .route("/submissions/:id", get(get_submission))
        .route("/submissions/:id/grade", post(submit_grade))
        .route("/submissions/:id/review", post(submit_review))
}

/// Register an uploaded exam paper (students)
#[instrument(skip(state, user, req), fields(user_id = %user.user_id))]
async fn register_submission(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(req): ValidatedJson<RegisterSubmissionRequest>,
) -> ApiResult<Created<SubmissionResponse>> {
    let submission = state
        .grading_service
        .register_submission(&user.context(), req)
        .await?;

    Ok(Created(SubmissionResponse::from(&submission)))
}

/// Submissions awaiting a grade or a review, newest first (teachers)
async fn submissions_for_grading(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<ApiResponse<Vec<GradingQueueEntryResponse>>>> {
    let entries = state
        .grading_service
        .submissions_for_grading(&user.context())
        .await?;

    let items = entries.iter().map(GradingQueueEntryResponse::from).collect();
    Ok(Json(ApiResponse::success(items)))
}

/// Submission detail with its grade and review
async fn get_submission(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    PathParam(id): PathParam<SubmissionId>,
) -> ApiResult<Json<ApiResponse<SubmissionDetailResponse>>> {
    let detail = state
        .grading_service
        .get_submission(&user.context(), id)
        .await?;

    Ok(Json(ApiResponse::success(SubmissionDetailResponse::from(&detail))))
}

/// Grade a pending submission (teachers).
///
/// Rubric violations come back as 400 with every message under `details.errors`.
#[instrument(skip(state, user, req), fields(user_id = %user.user_id, submission_id = %id))]
async fn submit_grade(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    PathParam(id): PathParam<SubmissionId>,
    ValidatedJson(req): ValidatedJson<GradeRequest>,
) -> ApiResult<CreatedWithMessage<GradeResponse>> {
    let grade = state
        .grading_service
        .submit_grade(&user.context(), id, req)
        .await?;

    Ok(CreatedWithMessage(
        GradeResponse::from(&grade),
        "Grade submitted successfully".to_string(),
    ))
}

/// Review the initial grade of a graded submission (teachers other than the grader)
#[instrument(skip(state, user, req), fields(user_id = %user.user_id, submission_id = %id))]
async fn submit_review(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    PathParam(id): PathParam<SubmissionId>,
    ValidatedJson(req): ValidatedJson<ReviewRequest>,
) -> ApiResult<CreatedWithMessage<ReviewResponse>> {
    let review = state
        .grading_service
        .submit_review(&user.context(), id, req)
        .await?;

    Ok(CreatedWithMessage(
        ReviewResponse::from(&review),
        "Review submitted successfully".to_string(),
    ))
}
