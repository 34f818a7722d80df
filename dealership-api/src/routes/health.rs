/// Health check endpoint
///
/// ```text
/// GET /health
/// ```
///
/// ```json
/// { "status": "healthy", "version": "0.1.0", "database": "connected" }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use dealership_shared::db::pool;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,

    pub version: String,

    /// `connected` or `disconnected`
    pub database: String,
}

pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let connected = pool::health_check(&state.db).await.is_ok();

    Ok(Json(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
    }))
}
