/// Review endpoints
///
/// - `GET /djangoapp/reviews/dealer/:dealer_id`
/// - `POST /djangoapp/add_review`

use crate::{
    app::AppState,
    client::{
        annotate_reviews,
        dealers::dealer_reviews_endpoint,
        UpstreamError, UpstreamErrorKind,
    },
    error::{ApiError, ApiResult, ReviewFailure},
    routes::dealers::DealerId,
    session::CurrentSession,
};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
pub struct ReviewsResponse {
    pub status: u16,
    pub reviews: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct AddReviewResponse {
    pub status: u16,
}

/// Reviews of one dealer, each with a `sentiment` label
///
/// Sentiment calls run with bounded concurrency; one failed analysis marks
/// that review `neutral` and the listing still succeeds.
pub async fn get_dealer_reviews(
    State(state): State<AppState>,
    dealer_id: Option<Path<String>>,
) -> ApiResult<Json<ReviewsResponse>> {
    let dealer_id = DealerId::parse(dealer_id.as_ref().map(|Path(id)| id.as_str()))?;

    let body = state
        .dealers
        .get(&dealer_reviews_endpoint(dealer_id.get()))
        .await?;

    let Value::Array(reviews) = body else {
        return Err(UpstreamError::new(
            "dealers",
            UpstreamErrorKind::InvalidResponse,
            format!("expected a review array for dealer {}", dealer_id),
        )
        .into());
    };

    let reviews = annotate_reviews(
        state.sentiment.as_ref(),
        reviews,
        state.config.services.sentiment_concurrency,
    )
    .await;

    Ok(Json(ReviewsResponse {
        status: 200,
        reviews,
    }))
}

/// Submits a review on behalf of the logged-in user
///
/// The session is checked before the body is looked at, so an anonymous
/// caller always gets `{status: 403}`, even for a body over the size limit.
/// The payload is forwarded verbatim.
pub async fn add_review(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<AddReviewResponse>> {
    let Some(session) = session else {
        return Err(ApiError::Forbidden);
    };

    let body = body.map_err(|e| {
        warn!(user_id = %session.user_id, error = %e.body_text(), "Review body unreadable");
        ApiError::ReviewRejected(ReviewFailure::InvalidPayload)
    })?;

    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        warn!(user_id = %session.user_id, error = %e, "Review payload is not JSON");
        ApiError::ReviewRejected(ReviewFailure::InvalidPayload)
    })?;

    state.dealers.post_review(&payload).await.map_err(|e| {
        warn!(user_id = %session.user_id, error = %e, "Posting review failed");
        ApiError::ReviewRejected(ReviewFailure::Upstream(e.kind))
    })?;

    info!(user_id = %session.user_id, username = %session.username, "Review posted");
    Ok(Json(AddReviewResponse { status: 200 }))
}
