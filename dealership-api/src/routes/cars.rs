/// Car catalog endpoint
///
/// ```text
/// GET /djangoapp/get_cars
/// ```
///
/// ```json
/// { "CarModels": [{ "CarModel": "Camry", "CarMake": "Toyota" }] }
/// ```
///
/// The first request in a process makes sure the bundled catalog is in the
/// database; later requests only read.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use dealership_shared::models::car::{CarModel, CarModelWithMake};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct CarsResponse {
    #[serde(rename = "CarModels")]
    pub car_models: Vec<CarModelWithMake>,
}

pub async fn get_cars(State(state): State<AppState>) -> ApiResult<Json<CarsResponse>> {
    state.catalog.ensure_seeded(&state.db).await?;

    let car_models = CarModel::list_with_makes(&state.db).await?;

    Ok(Json(CarsResponse { car_models }))
}
