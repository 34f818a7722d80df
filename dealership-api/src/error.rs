/// Error handling for the API server
///
/// Every failure is rendered as the same envelope the frontend already
/// understands:
///
/// ```json
/// { "status": 400, "message": "Bad Request" }
/// ```
///
/// Request-level failures (bad id, missing session, review rejected) keep
/// HTTP 200 and carry their code in `status`. Server-side failures use the
/// matching HTTP status as well. Messages are fixed per variant; whatever
/// caused the failure is logged, never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dealership_shared::{auth::password::PasswordError, catalog::CatalogError};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::client::{UpstreamError, UpstreamErrorKind};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Missing or invalid parameter
    BadRequest,

    /// Request body failed field validation
    ValidationError(Vec<ValidationErrorDetail>),

    /// No authenticated session
    Forbidden,

    /// The dealership service did not accept a review
    ReviewRejected(ReviewFailure),

    /// A required call to an external service failed
    Upstream(UpstreamError),

    /// Anything else on our side
    InternalError(String),
}

/// Why a review submission failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewFailure {
    /// Body was not JSON
    InvalidPayload,

    /// Dealership service call failed
    Upstream(UpstreamErrorKind),
}

impl ReviewFailure {
    fn public_message(&self) -> &'static str {
        match self {
            ReviewFailure::InvalidPayload => "invalid review payload",
            ReviewFailure::Upstream(kind) => kind.public_message(),
        }
    }
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Response envelope for failures
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Application-level status code
    pub status: u16,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest => write!(f, "Bad request"),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::Forbidden => write!(f, "Unauthorized"),
            ApiError::ReviewRejected(failure) => {
                write!(f, "Review rejected: {}", failure.public_message())
            }
            ApiError::Upstream(err) => write!(f, "Upstream error: {}", err),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Transport status, application status and client message
    fn parts(&self) -> (StatusCode, u16, String) {
        match self {
            ApiError::BadRequest | ApiError::ValidationError(_) => {
                (StatusCode::OK, 400, "Bad Request".to_string())
            }
            ApiError::Forbidden => (StatusCode::OK, 403, "Unauthorized".to_string()),
            ApiError::ReviewRejected(failure) => (
                StatusCode::OK,
                401,
                format!("Error in posting review: {}", failure.public_message()),
            ),
            ApiError::Upstream(_) => (StatusCode::BAD_GATEWAY, 502, "Bad Gateway".to_string()),
            ApiError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                500,
                "Internal Server Error".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (http_status, status, message) = self.parts();

        let details = match self {
            ApiError::ValidationError(errors) => Some(errors),
            ApiError::ReviewRejected(ReviewFailure::Upstream(kind)) => {
                tracing::warn!(kind = ?kind, "Review submission failed upstream");
                None
            }
            ApiError::Upstream(err) => {
                tracing::error!(
                    service = err.service,
                    kind = ?err.kind,
                    detail = %err.detail,
                    "Upstream call failed"
                );
                None
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                None
            }
            _ => None,
        };

        let body = Json(ErrorResponse {
            status,
            message,
            details,
        });

        (http_status, body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::InternalError(format!("Database error: {}", err))
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::InternalError(format!("Catalog seeding failed: {}", err))
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        ApiError::Upstream(err)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::InternalError(format!("Blocking task failed: {}", err))
    }
}
