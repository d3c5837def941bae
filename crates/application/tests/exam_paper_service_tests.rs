//! Tests for the exam paper service
//!
//! Admin-only paper management, session listings and the paper status machine.

use chrono::NaiveDate;
use exam_grading_application::dto::{CreateExamPaperRequest, UpdateExamPaperStatusRequest};
use exam_grading_application::{ApplicationError, DefaultAuthorizer, ExamPaperService, ServiceEvent};
use exam_grading_domain::{CentreId, ExamCentre, ExamPaperId, ExamPaperStatus};
use exam_grading_testing::{builders::*, fixtures::*, mocks::*};
use std::sync::Arc;

type Service = ExamPaperService<MockGradingRepository, DefaultAuthorizer, RecordingEventPublisher>;

fn setup() -> (Service, Arc<MockGradingRepository>, Arc<RecordingEventPublisher>, ExamCentre) {
    let repository = Arc::new(MockGradingRepository::new());
    let events = Arc::new(RecordingEventPublisher::new());
    let centre = create_test_centre("Liceul Jador");
    repository.insert_centre(centre.clone());

    let service = ExamPaperService::new(
        Arc::clone(&repository),
        Arc::new(DefaultAuthorizer),
        Arc::clone(&events),
    );
    (service, repository, events, centre)
}

fn create_request(centre_id: CentreId) -> CreateExamPaperRequest {
    CreateExamPaperRequest {
        centre_id,
        session_id: "bac-2025-summer".to_string(),
        subject_code: "ROM".to_string(),
        subject_name: "Romanian Language and Literature".to_string(),
        exam_date: NaiveDate::from_ymd_opt(2025, 6, 23).unwrap(),
        duration_minutes: 180,
        total_points: 100,
    }
}

fn status(status: ExamPaperStatus) -> UpdateExamPaperStatusRequest {
    UpdateExamPaperStatusRequest { status }
}

#[tokio::test]
async fn test_admin_creates_scheduled_paper() {
    let (service, repository, events, centre) = setup();

    let paper = service
        .create_paper(&admin_context(), create_request(centre.id))
        .await
        .unwrap();

    assert_eq!(paper.status, ExamPaperStatus::Scheduled);
    assert_eq!(paper.centre_id, centre.id);
    assert_eq!(repository.exam_paper(paper.id), Some(paper.clone()));
    assert!(matches!(
        events.events().as_slice(),
        [ServiceEvent::ExamPaperCreated { exam_paper_id, .. }] if *exam_paper_id == paper.id
    ));
}

#[tokio::test]
async fn test_only_admins_create_papers() {
    let (service, _, events, centre) = setup();

    for ctx in [teacher_context(), student_context()] {
        let result = service.create_paper(&ctx, create_request(centre.id)).await;
        assert!(matches!(result, Err(ApplicationError::Forbidden(_))));
    }
    assert_eq!(events.event_count(), 0);
}

#[tokio::test]
async fn test_paper_at_unknown_centre_is_not_found() {
    let (service, _, _, _) = setup();

    let result = service
        .create_paper(&admin_context(), create_request(CentreId::new()))
        .await;

    assert!(matches!(result, Err(ApplicationError::NotFound(_))));
}

#[tokio::test]
async fn test_invalid_paper_request_fails_validation() {
    let (service, _, _, centre) = setup();
    let mut request = create_request(centre.id);
    request.subject_code = String::new();

    let result = service.create_paper(&admin_context(), request).await;
    assert!(matches!(result, Err(ApplicationError::ValidationFailed(_))));
}

#[tokio::test]
async fn test_list_by_session_orders_by_date_then_subject() {
    let (service, repository, _, centre) = setup();
    let june_23 = NaiveDate::from_ymd_opt(2025, 6, 23).unwrap();
    let june_25 = NaiveDate::from_ymd_opt(2025, 6, 25).unwrap();

    let history = ExamPaperBuilder::new(centre.id)
        .with_subject("HIS", "History")
        .on(june_25)
        .build();
    let romanian = ExamPaperBuilder::new(centre.id).on(june_23).build();
    let biology = ExamPaperBuilder::new(centre.id)
        .with_subject("BIO", "Biology")
        .on(june_25)
        .build();
    let autumn = ExamPaperBuilder::new(centre.id)
        .with_session("bac-2025-autumn")
        .build();
    for paper in [history.clone(), romanian.clone(), biology.clone(), autumn] {
        repository.insert_exam_paper(paper);
    }

    let papers = service
        .list_by_session(&teacher_context(), "bac-2025-summer")
        .await
        .unwrap();

    let ids: Vec<_> = papers.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![romanian.id, biology.id, history.id]);

    let empty = service
        .list_by_session(&student_context(), "bac-2024-summer")
        .await
        .unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_paper_status_moves_forward_only() {
    let (service, repository, events, centre) = setup();
    let paper = create_test_paper(centre.id);
    repository.insert_exam_paper(paper.clone());

    let opened = service
        .update_status(&admin_context(), paper.id, status(ExamPaperStatus::Open))
        .await
        .unwrap();
    assert_eq!(opened.status, ExamPaperStatus::Open);

    let result = service
        .update_status(&admin_context(), paper.id, status(ExamPaperStatus::Scheduled))
        .await;
    assert!(matches!(result, Err(ApplicationError::Conflict(_))));

    service
        .update_status(&admin_context(), paper.id, status(ExamPaperStatus::Closed))
        .await
        .unwrap();
    assert_eq!(
        repository.exam_paper(paper.id).map(|p| p.status),
        Some(ExamPaperStatus::Closed)
    );
    assert!(matches!(
        events.events().last(),
        Some(ServiceEvent::ExamPaperStatusChanged {
            from: ExamPaperStatus::Open,
            to: ExamPaperStatus::Closed,
            ..
        })
    ));
}

#[tokio::test]
async fn test_status_update_requires_admin_and_existing_paper() {
    let (service, repository, _, centre) = setup();
    let paper = create_test_paper(centre.id);
    repository.insert_exam_paper(paper.clone());

    let result = service
        .update_status(&teacher_context(), paper.id, status(ExamPaperStatus::Open))
        .await;
    assert!(matches!(result, Err(ApplicationError::Forbidden(_))));

    let result = service
        .update_status(&admin_context(), ExamPaperId::new(), status(ExamPaperStatus::Open))
        .await;
    assert!(matches!(result, Err(ApplicationError::NotFound(_))));
}

#[tokio::test]
async fn test_list_centres_sorted_by_name() {
    let (service, repository, _, _) = setup();
    repository.insert_centre(create_test_centre("Colegiul National 'Andrei Mocanu'"));

    let centres = service.list_centres(&student_context()).await.unwrap();
    let names: Vec<_> = centres.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Colegiul National 'Andrei Mocanu'", "Liceul Jador"]);
}
