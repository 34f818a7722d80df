/// Dealer endpoints
///
/// - `GET /djangoapp/get_dealers` and `/get_dealers/:state`
/// - `GET /djangoapp/dealer/:dealer_id`
///
/// Dealer records belong to the dealership service and are passed through
/// as received.

use crate::{
    app::AppState,
    client::dealers::{dealer_endpoint, dealers_endpoint},
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Validated dealer identifier (positive integer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealerId(u64);

impl DealerId {
    /// Parses a path parameter
    ///
    /// A missing, empty, non-numeric or zero id is a `BadRequest`.
    pub fn parse(raw: Option<&str>) -> Result<Self, ApiError> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or(ApiError::BadRequest)?;

        match raw.parse::<u64>() {
            Ok(id) if id > 0 => Ok(DealerId(id)),
            _ => Err(ApiError::BadRequest),
        }
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for DealerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Serialize)]
pub struct DealersResponse {
    pub status: u16,
    pub dealers: Value,
}

#[derive(Debug, Serialize)]
pub struct DealerResponse {
    pub status: u16,
    pub dealer: Value,
}

/// All dealers
pub async fn get_dealerships(State(state): State<AppState>) -> ApiResult<Json<DealersResponse>> {
    fetch_dealerships(&state, None).await
}

/// Dealers in one state; `All` means no filter
pub async fn get_dealerships_by_state(
    State(state): State<AppState>,
    Path(us_state): Path<String>,
) -> ApiResult<Json<DealersResponse>> {
    fetch_dealerships(&state, Some(&us_state)).await
}

async fn fetch_dealerships(
    state: &AppState,
    us_state: Option<&str>,
) -> ApiResult<Json<DealersResponse>> {
    let dealers = state.dealers.get(&dealers_endpoint(us_state)).await?;

    Ok(Json(DealersResponse {
        status: 200,
        dealers,
    }))
}

/// One dealer by id
pub async fn get_dealer_details(
    State(state): State<AppState>,
    dealer_id: Option<Path<String>>,
) -> ApiResult<Json<DealerResponse>> {
    let dealer_id = DealerId::parse(dealer_id.as_ref().map(|Path(id)| id.as_str()))?;

    let dealer = state.dealers.get(&dealer_endpoint(dealer_id.get())).await?;

    Ok(Json(DealerResponse {
        status: 200,
        dealer,
    }))
}
