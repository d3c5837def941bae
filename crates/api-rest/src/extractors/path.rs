//! Path parameter extractor.

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{rejection::PathRejection, FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// `Path` with rejections reported as a JSON `BAD_REQUEST` error body.
///
/// Typed ids deserialize straight from the segment, so
/// `PathParam<SubmissionId>` rejects anything that is not a UUID.
#[derive(Debug, Clone, Copy)]
pub struct PathParam<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: PathRejection| {
                ApiError::BadRequest(format!("Invalid path parameter: {}", e.body_text()))
            })?;

        Ok(PathParam(value))
    }
}
