/// Catalog fixture format
///
/// ```json
/// {
///   "car_makes": [{ "name": "Toyota", "description": "..." }],
///   "car_models": [{ "name": "Camry", "make": "Toyota", "model_type": "Sedan", "year": 2023, "dealer_id": 5 }]
/// }
/// ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::CatalogError;
use crate::models::car::CarType;

const BUILTIN_FIXTURE: &str = include_str!("../../fixtures/car_catalog.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakeFixture {
    pub name: String,

    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFixture {
    pub name: String,

    /// Name of the owning make
    pub make: String,

    pub model_type: CarType,
    pub year: i32,

    #[serde(default)]
    pub dealer_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFixture {
    pub car_makes: Vec<MakeFixture>,
    pub car_models: Vec<ModelFixture>,
}

impl CatalogFixture {
    /// Parses and validates a fixture document
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_json::from_str(json)?;
        fixture.validate()?;
        Ok(fixture)
    }

    /// The dataset bundled with the crate
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_FIXTURE)
    }

    /// Checks every model points at a make defined in the same fixture
    pub fn validate(&self) -> Result<(), CatalogError> {
        let makes: HashSet<&str> = self.car_makes.iter().map(|m| m.name.as_str()).collect();

        for model in &self.car_models {
            if !makes.contains(model.make.as_str()) {
                return Err(CatalogError::UnknownMake {
                    model: model.name.clone(),
                    make: model.make.clone(),
                });
            }
        }

        Ok(())
    }
}
