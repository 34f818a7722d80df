/// Car catalog reference data
///
/// The catalog (makes and models) ships with the binary as a JSON fixture
/// and is written to the database by an idempotent upsert.
///
/// - `fixture`: Fixture format and the bundled dataset
/// - `seed`: Seeding under an advisory lock, plus a once-per-process guard

pub mod fixture;
pub mod seed;

pub use fixture::{CatalogFixture, MakeFixture, ModelFixture};
pub use seed::{seed_catalog, CatalogSeeder, SeedReport};

/// Error type for catalog operations
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Fixture JSON could not be parsed
    #[error("Invalid catalog fixture: {0}")]
    Fixture(#[from] serde_json::Error),

    /// A model references a make the fixture doesn't define
    #[error("Car model '{model}' references unknown make '{make}'")]
    UnknownMake { model: String, make: String },

    /// Database failure while seeding
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
