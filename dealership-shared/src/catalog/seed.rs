/// Idempotent catalog seeding
///
/// Seeding never decides anything from a row count. Every make and model is
/// written with `ON CONFLICT DO NOTHING` inside a single transaction that
/// first takes a transaction-scoped advisory lock, so concurrent seeders
/// (several requests, several processes) serialize and the second one
/// inserts nothing.
///
/// `CatalogSeeder` adds a per-process guard on top so the request path only
/// pays for the round trips once.

use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::{CatalogError, CatalogFixture};

/// Advisory lock key reserved for catalog seeding
const SEED_LOCK_KEY: i64 = 0x6361_7263_6174;

/// Rows written by one seeding pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub makes_inserted: u64,
    pub models_inserted: u64,
}

impl SeedReport {
    pub fn is_noop(&self) -> bool {
        self.makes_inserted == 0 && self.models_inserted == 0
    }
}

/// Writes the fixture into `car_makes` / `car_models`
///
/// Existing rows (matched by make name, and by make + model name) are left
/// untouched.
pub async fn seed_catalog(
    pool: &PgPool,
    fixture: &CatalogFixture,
) -> Result<SeedReport, CatalogError> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SEED_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    let mut report = SeedReport::default();

    for make in &fixture.car_makes {
        let result = sqlx::query(
            r#"
            INSERT INTO car_makes (name, description)
            VALUES ($1, $2)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(&make.name)
        .bind(&make.description)
        .execute(&mut *tx)
        .await?;

        report.makes_inserted += result.rows_affected();
    }

    for model in &fixture.car_models {
        let result = sqlx::query(
            r#"
            INSERT INTO car_models (car_make_id, name, dealer_id, model_type, year)
            SELECT id, $2, $3, $4, $5 FROM car_makes WHERE name = $1
            ON CONFLICT (car_make_id, name) DO NOTHING
            "#,
        )
        .bind(&model.make)
        .bind(&model.name)
        .bind(model.dealer_id)
        .bind(model.model_type.as_str())
        .bind(model.year)
        .execute(&mut *tx)
        .await?;

        report.models_inserted += result.rows_affected();
    }

    tx.commit().await?;

    if report.is_noop() {
        debug!("Car catalog already seeded");
    } else {
        info!(
            makes_inserted = report.makes_inserted,
            models_inserted = report.models_inserted,
            "Seeded car catalog"
        );
    }

    Ok(report)
}

/// Seeds the catalog at most once per process
///
/// A failed attempt leaves the guard unset, so the next caller retries.
#[derive(Debug, Clone)]
pub struct CatalogSeeder {
    fixture: Arc<CatalogFixture>,
    seeded: Arc<OnceCell<SeedReport>>,
}

impl CatalogSeeder {
    pub fn new(fixture: CatalogFixture) -> Self {
        Self {
            fixture: Arc::new(fixture),
            seeded: Arc::new(OnceCell::new()),
        }
    }

    /// Seeder over the bundled fixture
    pub fn builtin() -> Result<Self, CatalogError> {
        Ok(Self::new(CatalogFixture::builtin()?))
    }

    pub fn is_seeded(&self) -> bool {
        self.seeded.initialized()
    }

    /// Returns the report of the pass that ran in this process
    pub async fn ensure_seeded(&self, pool: &PgPool) -> Result<SeedReport, CatalogError> {
        let report = self
            .seeded
            .get_or_try_init(|| seed_catalog(pool, &self.fixture))
            .await?;

        Ok(*report)
    }
}
