//! Statistics endpoints (admins only).

use crate::{
    error::ApiResult, extractors::AuthenticatedUser, responses::ApiResponse, state::AppState,
};
use axum::{extract::State, routing::get, Json, Router};
use exam_grading_application::dto::{GroupStatisticsResponse, OverviewResponse};
use exam_grading_domain::GroupStatistics;

/// Statistics routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/statistics/overview", get(overview))
        .route("/statistics/exam-centers", get(exam_centres))
        .route("/statistics/subjects", get(subjects))
}

fn group_responses(groups: Vec<GroupStatistics>) -> Vec<GroupStatisticsResponse> {
    groups.into_iter().map(GroupStatisticsResponse::from).collect()
}

/// Submission counts per status and the average grade
async fn overview(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<ApiResponse<OverviewResponse>>> {
    let overview = state.statistics_service.overview(&user.context()).await?;
    Ok(Json(ApiResponse::success(OverviewResponse::from(overview))))
}

/// The same figures per exam centre, every centre included
async fn exam_centres(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<ApiResponse<Vec<GroupStatisticsResponse>>>> {
    let groups = state.statistics_service.by_centre(&user.context()).await?;
    Ok(Json(ApiResponse::success(group_responses(groups))))
}

/// The same figures per subject
async fn subjects(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<ApiResponse<Vec<GroupStatisticsResponse>>>> {
    let groups = state.statistics_service.by_subject(&user.context()).await?;
    Ok(Json(ApiResponse::success(group_responses(groups))))
}
