/// Car makes and models
///
/// # Schema
///
/// ```sql
/// CREATE TABLE car_makes (
///     id SERIAL PRIMARY KEY,
///     name VARCHAR(100) NOT NULL UNIQUE,
///     description TEXT NOT NULL DEFAULT ''
/// );
///
/// CREATE TABLE car_models (
///     id SERIAL PRIMARY KEY,
///     car_make_id INTEGER NOT NULL REFERENCES car_makes(id) ON DELETE CASCADE,
///     name VARCHAR(100) NOT NULL,
///     dealer_id INTEGER,
///     model_type VARCHAR(10) NOT NULL DEFAULT 'SUV',
///     year INTEGER NOT NULL DEFAULT 2023,
///     UNIQUE (car_make_id, name)
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CarMake {
    pub id: i32,
    pub name: String,
    pub description: String,
}

/// Body style of a car model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarType {
    Sedan,
    #[serde(rename = "SUV")]
    Suv,
    Wagon,
}

impl CarType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarType::Sedan => "Sedan",
            CarType::Suv => "SUV",
            CarType::Wagon => "Wagon",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CarModel {
    pub id: i32,
    pub car_make_id: i32,
    pub name: String,
    pub dealer_id: Option<i32>,
    pub model_type: String,
    pub year: i32,
}

/// Flattened model/make pair as served by the catalog endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CarModelWithMake {
    #[serde(rename = "CarModel")]
    pub model_name: String,

    #[serde(rename = "CarMake")]
    pub make_name: String,
}

impl CarMake {
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, CarMake>("SELECT id, name, description FROM car_makes ORDER BY id")
            .fetch_all(pool)
            .await
    }
}

impl CarModel {
    /// Every model joined with its make, in insertion order
    pub async fn list_with_makes(pool: &PgPool) -> Result<Vec<CarModelWithMake>, sqlx::Error> {
        sqlx::query_as::<_, CarModelWithMake>(
            r#"
            SELECT m.name AS model_name, mk.name AS make_name
            FROM car_models m
            JOIN car_makes mk ON mk.id = m.car_make_id
            ORDER BY m.id
            "#,
        )
        .fetch_all(pool)
        .await
    }
}
