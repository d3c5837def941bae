//! Exam paper and centre endpoints.

use crate::{
    error::ApiResult,
    extractors::{AuthenticatedUser, PathParam, ValidatedJson},
    responses::{ApiResponse, Created},
    state::AppState,
};
use axum::{
    extract::State,
    routing::{get, patch, post},
    Json, Router,
};
use exam_grading_application::dto::{
    CreateExamPaperRequest, ExamCentreResponse, ExamPaperResponse, UpdateExamPaperStatusRequest,
};
use exam_grading_domain::ExamPaperId;
use tracing::instrument;

/// Exam paper and centre routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/centres", get(list_centres))
        .route("/exam-papers", post(create_exam_paper))
        .route("/exam-papers/session/:session_id", get(list_session_papers))
        .route("/exam-papers/:id/status", patch(update_exam_paper_status))
}

/// Every exam centre (any role)
async fn list_centres(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<ApiResponse<Vec<ExamCentreResponse>>>> {
    let centres = state.exam_paper_service.list_centres(&user.context()).await?;

    let items = centres.iter().map(ExamCentreResponse::from).collect();
    Ok(Json(ApiResponse::success(items)))
}

/// Create a scheduled exam paper (admins)
#[instrument(skip(state, user, req), fields(user_id = %user.user_id))]
async fn create_exam_paper(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(req): ValidatedJson<CreateExamPaperRequest>,
) -> ApiResult<Created<ExamPaperResponse>> {
    let paper = state
        .exam_paper_service
        .create_paper(&user.context(), req)
        .await?;

    Ok(Created(ExamPaperResponse::from(&paper)))
}

/// Papers of one exam session
async fn list_session_papers(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    PathParam(session_id): PathParam<String>,
) -> ApiResult<Json<ApiResponse<Vec<ExamPaperResponse>>>> {
    let papers = state
        .exam_paper_service
        .list_by_session(&user.context(), &session_id)
        .await?;

    let items = papers.iter().map(ExamPaperResponse::from).collect();
    Ok(Json(ApiResponse::success(items)))
}

/// Move a paper to another status (admins)
#[instrument(skip(state, user, req), fields(user_id = %user.user_id, exam_paper_id = %id))]
async fn update_exam_paper_status(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    PathParam(id): PathParam<ExamPaperId>,
    ValidatedJson(req): ValidatedJson<UpdateExamPaperStatusRequest>,
) -> ApiResult<Json<ApiResponse<ExamPaperResponse>>> {
    let paper = state
        .exam_paper_service
        .update_status(&user.context(), id, req)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        ExamPaperResponse::from(&paper),
        "Exam paper status updated successfully",
    )))
}
