/// Request extractors
///
/// `JsonBody` parses the request body as JSON whatever `Content-Type` says.
/// A body that can't be read or parsed becomes the usual
/// `{status: 400, message: "Bad Request"}` envelope instead of Axum's
/// plain-text rejection.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e.body_text(), "Unreadable request body");
            ApiError::BadRequest
        })?;

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!(error = %e, "Rejected request body");
            ApiError::BadRequest
        })?;

        Ok(JsonBody(value))
    }
}
