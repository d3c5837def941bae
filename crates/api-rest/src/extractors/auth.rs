//! Authentication extractor.
//!
//! Tokens are minted by the identity provider; this service only verifies the
//! HS256 signature and expiry.

use crate::{error::ApiError, middleware::request_id::RequestId, state::AppState};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use exam_grading_application::ServiceContext;
use exam_grading_domain::{AuthorizationError, UserId, UserRole};
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Claims stored in JWT token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// User role
    pub role: UserRole,

    /// Expiration time (as UTC timestamp)
    pub exp: usize,

    /// Issued at (as UTC timestamp)
    pub iat: usize,
}

impl Claims {
    /// Get user ID from claims
    pub fn user_id(&self) -> Result<UserId, AuthorizationError> {
        Uuid::parse_str(&self.sub)
            .map(UserId::from)
            .map_err(|_| AuthorizationError::InvalidToken)
    }
}

/// Authenticated user information extracted from JWT
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// User ID
    pub user_id: UserId,

    /// User role
    pub role: UserRole,

    /// Correlation id of the request that carried the token
    pub request_id: String,

    /// Original claims
    pub claims: Claims,
}

impl AuthenticatedUser {
    /// Service context for calls made on behalf of this user
    pub fn context(&self) -> ServiceContext {
        ServiceContext::authenticated(self.user_id, self.role, self.request_id.clone())
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extract Authorization header
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthorizationError::AuthenticationRequired)?;

        // Extract token from "Bearer <token>"
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthorizationError::InvalidToken)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = state.config.jwt_leeway_seconds;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(state.jwt_secret().as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthorizationError::TokenExpired,
            _ => {
                debug!(error = %e, "Token validation failed");
                AuthorizationError::InvalidToken
            }
        })?;

        let claims = token_data.claims;
        let user_id = claims.user_id()?;

        let request_id = parts
            .extensions
            .get::<RequestId>()
            .map(|id| id.0.clone())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(Self {
            user_id,
            role: claims.role,
            request_id,
            claims,
        })
    }
}
