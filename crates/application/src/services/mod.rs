//! Application Services
//!
//! Business logic orchestration layer that coordinates domain operations,
//! repository access, and cross-cutting concerns.

mod exam_paper;
mod grading;
mod statistics;

pub use exam_paper::*;
pub use grading::*;
pub use statistics::*;

use crate::ApplicationError;
use async_trait::async_trait;
use exam_grading_domain::{
    CentreId, ExamPaperId, ExamPaperStatus, GradeId, ReviewId, Submission, SubmissionId, UserId,
    UserRole,
};

/// Service context for request handling
#[derive(Debug, Clone)]
pub struct ServiceContext {
    /// The authenticated user ID (if any)
    pub user_id: Option<UserId>,
    /// Role carried by the caller's token (if any)
    pub role: Option<UserRole>,
    /// Request correlation ID for tracing
    pub correlation_id: String,
}

impl ServiceContext {
    pub fn anonymous(correlation_id: String) -> Self {
        Self {
            user_id: None,
            role: None,
            correlation_id,
        }
    }

    pub fn authenticated(user_id: UserId, role: UserRole, correlation_id: String) -> Self {
        Self {
            user_id: Some(user_id),
            role: Some(role),
            correlation_id,
        }
    }

    pub fn require_authenticated(&self) -> Result<UserId, ApplicationError> {
        self.user_id
            .ok_or_else(|| ApplicationError::Unauthorized("Authentication required".to_string()))
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == Some(role)
    }
}

/// Service event for event-driven architecture
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceEvent {
    SubmissionRegistered {
        submission_id: SubmissionId,
        student_id: UserId,
    },
    SubmissionGraded {
        submission_id: SubmissionId,
        grade_id: GradeId,
        teacher_id: UserId,
        score: i64,
    },
    SubmissionReviewed {
        submission_id: SubmissionId,
        review_id: ReviewId,
        reviewer_id: UserId,
        score: i64,
    },
    ExamPaperCreated {
        exam_paper_id: ExamPaperId,
        centre_id: CentreId,
        created_by: UserId,
    },
    ExamPaperStatusChanged {
        exam_paper_id: ExamPaperId,
        from: ExamPaperStatus,
        to: ExamPaperStatus,
    },
}

/// Event publisher trait for service events
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: ServiceEvent) -> Result<(), ApplicationError>;
}

/// No-op event publisher for testing
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: ServiceEvent) -> Result<(), ApplicationError> {
        Ok(())
    }
}

/// Authorization result
#[derive(Debug, Clone)]
pub struct AuthorizationResult {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl AuthorizationResult {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }

    pub fn ensure_allowed(&self) -> Result<(), ApplicationError> {
        if self.allowed {
            Ok(())
        } else {
            Err(ApplicationError::Forbidden(
                self.reason
                    .clone()
                    .unwrap_or_else(|| "Access denied".to_string()),
            ))
        }
    }
}

/// Authorization trait for services
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn can_register_submission(&self, ctx: &ServiceContext) -> AuthorizationResult;
    async fn can_grade(&self, ctx: &ServiceContext) -> AuthorizationResult;
    async fn can_review(&self, ctx: &ServiceContext) -> AuthorizationResult;
    async fn can_view_submission(&self, ctx: &ServiceContext, submission: &Submission) -> AuthorizationResult;
    async fn can_view_statistics(&self, ctx: &ServiceContext) -> AuthorizationResult;
    async fn can_manage_exam_papers(&self, ctx: &ServiceContext) -> AuthorizationResult;
}

/// Role-based authorizer
pub struct DefaultAuthorizer;

#[async_trait]
impl Authorizer for DefaultAuthorizer {
    async fn can_register_submission(&self, ctx: &ServiceContext) -> AuthorizationResult {
        match ctx.role {
            Some(role) if role.can_submit_papers() => AuthorizationResult::allow(),
            _ => AuthorizationResult::deny("Only students can submit exam papers"),
        }
    }

    async fn can_grade(&self, ctx: &ServiceContext) -> AuthorizationResult {
        match ctx.role {
            Some(role) if role.can_grade() => AuthorizationResult::allow(),
            _ => AuthorizationResult::deny("Only teachers can grade submissions"),
        }
    }

    async fn can_review(&self, ctx: &ServiceContext) -> AuthorizationResult {
        match ctx.role {
            Some(role) if role.can_review() => AuthorizationResult::allow(),
            _ => AuthorizationResult::deny("Only teachers can review grades"),
        }
    }

    async fn can_view_submission(&self, ctx: &ServiceContext, submission: &Submission) -> AuthorizationResult {
        match (ctx.role, ctx.user_id) {
            (Some(role), _) if role.can_view_any_submission() => AuthorizationResult::allow(),
            (Some(UserRole::Student), Some(user_id)) if submission.is_owned_by(user_id) => {
                AuthorizationResult::allow()
            }
            _ => AuthorizationResult::deny("Students can only view their own submissions"),
        }
    }

    async fn can_view_statistics(&self, ctx: &ServiceContext) -> AuthorizationResult {
        match ctx.role {
            Some(role) if role.can_view_statistics() => AuthorizationResult::allow(),
            _ => AuthorizationResult::deny("Admin privileges required"),
        }
    }

    async fn can_manage_exam_papers(&self, ctx: &ServiceContext) -> AuthorizationResult {
        match ctx.role {
            Some(role) if role.can_manage_exam_papers() => AuthorizationResult::allow(),
            _ => AuthorizationResult::deny("Only admins can manage exam papers"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_grading_domain::ExamPaperId;

    #[test]
    fn test_service_context() {
        let ctx = ServiceContext::anonymous("corr-123".to_string());
        assert!(ctx.user_id.is_none());
        assert!(ctx.require_authenticated().is_err());

        let user = UserId::new();
        let ctx = ServiceContext::authenticated(user, UserRole::Teacher, "corr-123".to_string());
        assert_eq!(ctx.require_authenticated().unwrap(), user);
        assert!(ctx.has_role(UserRole::Teacher));
        assert!(!ctx.has_role(UserRole::Admin));
    }

    #[test]
    fn test_authorization_result() {
        let allowed = AuthorizationResult::allow();
        assert!(allowed.ensure_allowed().is_ok());

        let denied = AuthorizationResult::deny("Not allowed");
        assert_eq!(
            denied.ensure_allowed(),
            Err(ApplicationError::Forbidden("Not allowed".to_string()))
        );
    }

    #[tokio::test]
    async fn test_default_authorizer_roles() {
        let authorizer = DefaultAuthorizer;
        let student = ServiceContext::authenticated(UserId::new(), UserRole::Student, "c".into());
        let teacher = ServiceContext::authenticated(UserId::new(), UserRole::Teacher, "c".into());
        let admin = ServiceContext::authenticated(UserId::new(), UserRole::Admin, "c".into());

        assert!(authorizer.can_register_submission(&student).await.allowed);
        assert!(!authorizer.can_register_submission(&teacher).await.allowed);
        assert!(authorizer.can_grade(&teacher).await.allowed);
        assert!(!authorizer.can_grade(&student).await.allowed);
        assert!(!authorizer.can_grade(&admin).await.allowed);
        assert!(authorizer.can_view_statistics(&admin).await.allowed);
        assert!(!authorizer.can_view_statistics(&teacher).await.allowed);
        assert!(authorizer.can_manage_exam_papers(&admin).await.allowed);
        assert!(!authorizer.can_manage_exam_papers(&teacher).await.allowed);
    }

    #[tokio::test]
    async fn test_students_see_only_their_own_submissions() {
        let authorizer = DefaultAuthorizer;
        let owner = UserId::new();
        let submission = Submission::new(owner, ExamPaperId::new(), "uploads/a.pdf");

        let as_owner = ServiceContext::authenticated(owner, UserRole::Student, "c".into());
        let as_other = ServiceContext::authenticated(UserId::new(), UserRole::Student, "c".into());
        let as_teacher = ServiceContext::authenticated(UserId::new(), UserRole::Teacher, "c".into());

        assert!(authorizer.can_view_submission(&as_owner, &submission).await.allowed);
        assert!(!authorizer.can_view_submission(&as_other, &submission).await.allowed);
        assert!(authorizer.can_view_submission(&as_teacher, &submission).await.allowed);
    }
}
