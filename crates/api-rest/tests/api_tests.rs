//! HTTP tests for the REST API
//!
//! Drives the full router (middleware included) with `oneshot` requests.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use exam_grading_api_rest::{create_app, extractors::Claims, ApiConfig};
use exam_grading_domain::{UserId, UserRole};
use exam_grading_testing::fixtures::{
    blank_scores, full_marks, out_of_range_scores, scores_json, typical_scores,
};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

fn test_app() -> (Router, ApiConfig) {
    let config = ApiConfig::default();
    (create_app(config.clone()), config)
}

fn token_for(config: &ApiConfig, user_id: UserId, role: UserRole, ttl: Duration) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        role,
        exp: (now + ttl).timestamp() as usize,
        iat: now.timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .unwrap()
}

fn bearer(config: &ApiConfig, user_id: UserId, role: UserRole) -> String {
    token_for(config, user_id, role, Duration::hours(1))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Id of the first seeded exam centre, by name
async fn first_centre(app: &Router, token: &str) -> String {
    let (status, body) = send(app, Method::GET, "/api/v1/centres", Some(token), None).await;
    assert_eq!(status, StatusCode::OK, "centres failed: {}", body);
    body["data"][0]["id"].as_str().unwrap().to_string()
}

/// Create an exam paper as an admin and return its id
async fn create_exam_paper(app: &Router, config: &ApiConfig, subject_code: &str) -> String {
    let admin = bearer(config, UserId::new(), UserRole::Admin);
    let centre_id = first_centre(app, &admin).await;

    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/exam-papers",
        Some(&admin),
        Some(json!({
            "centreId": centre_id,
            "sessionId": "bac-2025-summer",
            "subjectCode": subject_code,
            "subjectName": format!("Subject {}", subject_code),
            "examDate": "2025-06-23",
            "durationMinutes": 180,
            "totalPoints": 100
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create paper failed: {}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn register_for(app: &Router, token: &str, exam_paper_id: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/submissions",
        Some(token),
        Some(json!({
            "examPaperId": exam_paper_id,
            "fileRef": "uploads/2024/paper-17.pdf"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn register_paper(app: &Router, config: &ApiConfig, token: &str) -> String {
    let exam_paper_id = create_exam_paper(app, config, "ROM").await;
    register_for(app, token, &exam_paper_id).await
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let (app, _) = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn test_rubric_table() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::GET, "/api/v1/rubric", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["baseCredit"], 10);
    assert_eq!(data["maxTotal"], 100);
    assert_eq!(data["maxAchievableTotal"], 91);
    assert_eq!(data["items"].as_array().unwrap().len(), 21);
}

#[tokio::test]
async fn test_validate_reports_violations_with_ok_status() {
    let (app, _) = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/rubric/validate",
        None,
        Some(scores_json(&out_of_range_scores())),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["isValid"], false);
    assert_eq!(
        data["errors"],
        json!(["Section I.B - Connectors: score must be between 0 and 2 points"])
    );
    assert_eq!(data["total"], 13);
}

#[tokio::test]
async fn test_validate_accepts_full_marks() {
    let (app, _) = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/rubric/validate",
        None,
        Some(scores_json(&full_marks())),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isValid"], true);
    assert_eq!(body["data"]["errors"], json!([]));
    assert_eq!(body["data"]["total"], 91);
}

#[tokio::test]
async fn test_total_endpoint() {
    let (app, _) = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/rubric/total",
        None,
        Some(scores_json(&typical_scores())),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 72);
    assert_eq!(body["data"]["finalMark"], 7.2);
}

#[tokio::test]
async fn test_malformed_score_record_is_bad_request() {
    let (app, _) = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/rubric/validate",
        None,
        Some(json!({ "section1A": { "item1": 3 } })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let (app, _) = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/submissions",
        None,
        Some(json!({ "examPaperId": Uuid::now_v7(), "fileRef": "uploads/a.pdf" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let (app, config) = test_app();
    let token = token_for(&config, UserId::new(), UserRole::Teacher, Duration::hours(-2));

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/submissions/for-grading",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let (app, _) = test_app();
    let other = ApiConfig {
        jwt_secret: "another-secret-that-is-long-enough-to-pass".to_string(),
        ..ApiConfig::default()
    };
    let token = bearer(&other, UserId::new(), UserRole::Admin);

    let (status, _) = send(&app, Method::GET, "/api/v1/statistics/overview", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_student_cannot_grade() {
    let (app, config) = test_app();
    let student = bearer(&config, UserId::new(), UserRole::Student);
    let submission_id = register_paper(&app, &config, &student).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/submissions/{}/grade", submission_id),
        Some(&student),
        Some(json!({ "detailedScores": scores_json(&typical_scores()) })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_invalid_file_ref_fails_validation() {
    let (app, config) = test_app();
    let student = bearer(&config, UserId::new(), UserRole::Student);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/submissions",
        Some(&student),
        Some(json!({ "examPaperId": Uuid::now_v7(), "fileRef": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn test_grading_unknown_submission_is_not_found() {
    let (app, config) = test_app();
    let teacher = bearer(&config, UserId::new(), UserRole::Teacher);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/v1/submissions/{}/grade", Uuid::now_v7()),
        Some(&teacher),
        Some(json!({ "detailedScores": scores_json(&typical_scores()) })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_grade_and_review_flow() {
    let (app, config) = test_app();
    let student_id = UserId::new();
    let student = bearer(&config, student_id, UserRole::Student);
    let grader = bearer(&config, UserId::new(), UserRole::Teacher);
    let reviewer = bearer(&config, UserId::new(), UserRole::Teacher);
    let admin = bearer(&config, UserId::new(), UserRole::Admin);

    let submission_id = register_paper(&app, &config, &student).await;
    let grade_uri = format!("/api/v1/submissions/{}/grade", submission_id);
    let review_uri = format!("/api/v1/submissions/{}/review", submission_id);

    // Pending paper shows up in the queue
    let (status, body) = send(&app, Method::GET, "/api/v1/submissions/for-grading", Some(&grader), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["submission"]["id"], submission_id.as_str());
    assert_eq!(body["data"][0]["submission"]["status"], "pending");

    // Rubric violations are rejected with every message
    let (status, body) = send(
        &app,
        Method::POST,
        &grade_uri,
        Some(&grader),
        Some(json!({ "detailedScores": scores_json(&out_of_range_scores()) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "RUBRIC_VIOLATION");
    assert_eq!(
        body["details"]["errors"],
        json!(["Section I.B - Connectors: score must be between 0 and 2 points"])
    );

    // A valid grade is stored with the computed total
    let (status, body) = send(
        &app,
        Method::POST,
        &grade_uri,
        Some(&grader),
        Some(json!({
            "detailedScores": scores_json(&typical_scores()),
            "feedback": "Clear structure"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "grade failed: {}", body);
    assert_eq!(body["data"]["score"], 72);
    assert_eq!(body["data"]["finalMark"], 7.2);

    // Grading twice is a conflict
    let (status, _) = send(
        &app,
        Method::POST,
        &grade_uri,
        Some(&reviewer),
        Some(json!({ "detailedScores": scores_json(&typical_scores()) })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // The original grader may not review
    let (status, _) = send(
        &app,
        Method::POST,
        &review_uri,
        Some(&grader),
        Some(json!({ "detailedScores": scores_json(&typical_scores()) })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        Method::POST,
        &review_uri,
        Some(&reviewer),
        Some(json!({
            "detailedScores": scores_json(&full_marks()),
            "reviewNotes": "Raised section III"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "review failed: {}", body);
    assert_eq!(body["data"]["score"], 91);

    // The student sees the whole history of their own paper
    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/submissions/{}", submission_id),
        Some(&student),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["submission"]["status"], "reviewed");
    assert_eq!(body["data"]["grade"]["score"], 72);
    assert_eq!(body["data"]["review"]["score"], 91);

    // Reviewed papers leave the queue
    let (_, body) = send(&app, Method::GET, "/api/v1/submissions/for-grading", Some(&grader), None).await;
    assert_eq!(body["data"], json!([]));

    let (status, body) = send(&app, Method::GET, "/api/v1/statistics/overview", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalSubmissions"], 1);
    assert_eq!(body["data"]["reviewed"], 1);
    assert_eq!(body["data"]["averageScore"], 72.0);
}

#[tokio::test]
async fn test_other_students_cannot_view_submission() {
    let (app, config) = test_app();
    let owner = bearer(&config, UserId::new(), UserRole::Student);
    let stranger = bearer(&config, UserId::new(), UserRole::Student);
    let submission_id = register_paper(&app, &config, &owner).await;

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/v1/submissions/{}", submission_id),
        Some(&stranger),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_statistics_require_admin() {
    let (app, config) = test_app();
    let teacher = bearer(&config, UserId::new(), UserRole::Teacher);

    for uri in [
        "/api/v1/statistics/overview",
        "/api/v1/statistics/exam-centers",
        "/api/v1/statistics/subjects",
    ] {
        let (status, body) = send(&app, Method::GET, uri, Some(&teacher), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", uri);
        assert_eq!(body["error"], "FORBIDDEN");
    }
}

#[tokio::test]
async fn test_malformed_submission_id_is_json_bad_request() {
    let (app, config) = test_app();
    let teacher = bearer(&config, UserId::new(), UserRole::Teacher);

    let (status, body) = send(&app, Method::GET, "/api/v1/submissions/not-a-uuid", Some(&teacher), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");
    assert!(body["message"].as_str().unwrap().contains("Invalid path parameter"));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/submissions/42/grade",
        Some(&teacher),
        Some(json!({ "detailedScores": scores_json(&typical_scores()) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_malformed_authorization_header_is_unauthorized() {
    let (app, _) = test_app();

    let (status, body) = send(&app, Method::GET, "/api/v1/centres", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_total_endpoint_allows_negative_totals() {
    let (app, _) = test_app();
    let mut scores = scores_json(&blank_scores());
    scores["section1A"]["item1"] = json!(-25);

    let (status, body) = send(&app, Method::POST, "/api/v1/rubric/total", None, Some(scores)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], -15);
    assert_eq!(body["data"]["finalMark"], -1.5);
}

#[tokio::test]
async fn test_register_for_unknown_exam_paper_is_not_found() {
    let (app, config) = test_app();
    let student = bearer(&config, UserId::new(), UserRole::Student);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/submissions",
        Some(&student),
        Some(json!({ "examPaperId": Uuid::now_v7(), "fileRef": "uploads/a.pdf" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_exam_paper_management() {
    let (app, config) = test_app();
    let admin = bearer(&config, UserId::new(), UserRole::Admin);
    let teacher = bearer(&config, UserId::new(), UserRole::Teacher);

    // Every role can see the seeded centres
    let (status, body) = send(&app, Method::GET, "/api/v1/centres", Some(&teacher), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    let centre_id = body["data"][0]["id"].clone();

    let paper = json!({
        "centreId": centre_id,
        "sessionId": "bac-2025-summer",
        "subjectCode": "MAT",
        "subjectName": "Mathematics",
        "examDate": "2025-06-25",
        "durationMinutes": 180,
        "totalPoints": 100
    });

    // Teachers cannot create papers
    let (status, _) = send(&app, Method::POST, "/api/v1/exam-papers", Some(&teacher), Some(paper.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::POST, "/api/v1/exam-papers", Some(&admin), Some(paper)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    assert_eq!(body["data"]["status"], "scheduled");
    let paper_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/exam-papers/session/bac-2025-summer",
        Some(&teacher),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], paper_id.as_str());
    assert_eq!(body["data"][0]["subjectName"], "Mathematics");

    let status_uri = format!("/api/v1/exam-papers/{}/status", paper_id);
    let (status, body) = send(&app, Method::PATCH, &status_uri, Some(&admin), Some(json!({ "status": "open" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "open");
    assert_eq!(body["message"], "Exam paper status updated successfully");

    // Papers never move back
    let (status, body) = send(&app, Method::PATCH, &status_uri, Some(&admin), Some(json!({ "status": "scheduled" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");

    let (status, _) = send(&app, Method::PATCH, &status_uri, Some(&teacher), Some(json!({ "status": "closed" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/v1/exam-papers/not-a-uuid/status",
        Some(&admin),
        Some(json!({ "status": "closed" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_centre_and_subject_statistics() {
    let (app, config) = test_app();
    let admin = bearer(&config, UserId::new(), UserRole::Admin);
    let student = bearer(&config, UserId::new(), UserRole::Student);
    let grader = bearer(&config, UserId::new(), UserRole::Teacher);

    let romanian = create_exam_paper(&app, &config, "ROM").await;
    let maths = create_exam_paper(&app, &config, "MAT").await;
    let graded = register_for(&app, &student, &romanian).await;
    register_for(&app, &student, &maths).await;

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/v1/submissions/{}/grade", graded),
        Some(&grader),
        Some(json!({ "detailedScores": scores_json(&typical_scores()) })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::GET, "/api/v1/statistics/exam-centers", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let centres = body["data"].as_array().unwrap();
    assert_eq!(centres.len(), 3);
    let totals: Vec<u64> = centres
        .iter()
        .map(|c| c["totalSubmissions"].as_u64().unwrap())
        .collect();
    assert_eq!(totals.iter().sum::<u64>(), 2);
    let busy = centres
        .iter()
        .find(|c| c["totalSubmissions"] == 2)
        .unwrap();
    assert_eq!(busy["graded"], 1);
    assert_eq!(busy["averageScore"], 72.0);

    let (status, body) = send(&app, Method::GET, "/api/v1/statistics/subjects", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], "MAT");
    assert_eq!(body["data"][0]["totalSubmissions"], 1);
    assert_eq!(body["data"][0]["averageScore"], Value::Null);
    assert_eq!(body["data"][1]["id"], "ROM");
    assert_eq!(body["data"][1]["averageScore"], 72.0);
}
