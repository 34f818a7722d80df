/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use dealership_api::{app::{build_router, AppState}, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::from_config(pool, config)?;
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
/// axum::serve(listener, build_router(state)).await?;
/// # Ok(())
/// # }
/// ```

use crate::{
    client::{build_http_client, DealerService, RestDealerClient, RestSentimentClient, SentimentAnalyzer},
    config::Config,
    middleware::security::SecurityHeadersLayer,
};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use dealership_shared::catalog::CatalogSeeder;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler through Axum's `State` extractor; everything
/// inside is reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Dealership/review service
    pub dealers: Arc<dyn DealerService>,

    /// Sentiment analyzer
    pub sentiment: Arc<dyn SentimentAnalyzer>,

    /// Once-per-process catalog seeding
    pub catalog: CatalogSeeder,
}

impl AppState {
    pub fn new(
        db: PgPool,
        config: Config,
        dealers: Arc<dyn DealerService>,
        sentiment: Arc<dyn SentimentAnalyzer>,
        catalog: CatalogSeeder,
    ) -> Self {
        Self {
            db,
            config: Arc::new(config),
            dealers,
            sentiment,
            catalog,
        }
    }

    /// Wires the HTTP clients and the bundled catalog from configuration
    pub fn from_config(db: PgPool, config: Config) -> anyhow::Result<Self> {
        let http = build_http_client(config.outbound_timeout())?;

        let dealers = RestDealerClient::new(http.clone(), config.services.dealer_api_url.clone());
        let sentiment = RestSentimentClient::new(http, &config.services.sentiment_api_url)?;
        let catalog = CatalogSeeder::builtin()?;

        Ok(Self::new(
            db,
            config,
            Arc::new(dealers),
            Arc::new(sentiment),
            catalog,
        ))
    }
}

/// Builds the complete Axum router
///
/// ```text
/// /
/// ├── GET /health
/// └── /djangoapp/
///     ├── POST     /login
///     ├── GET|POST /logout
///     ├── POST     /register
///     ├── GET      /get_cars
///     ├── GET      /get_dealers[/:state]
///     ├── GET      /dealer[/:dealer_id]
///     ├── GET      /reviews/dealer[/:dealer_id]
///     └── POST     /add_review
/// ```
///
/// Routes without an id exist so a missing id gets the 400 envelope rather
/// than a bare 404.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let app_routes = Router::new()
        .route("/login", post(routes::auth::login))
        .route("/logout", get(routes::auth::logout).post(routes::auth::logout))
        .route("/register", post(routes::auth::register))
        .route("/get_cars", get(routes::cars::get_cars))
        .route("/get_dealers", get(routes::dealers::get_dealerships))
        .route("/get_dealers/:state", get(routes::dealers::get_dealerships_by_state))
        .route("/dealer", get(routes::dealers::get_dealer_details))
        .route("/dealer/:dealer_id", get(routes::dealers::get_dealer_details))
        .route("/reviews/dealer", get(routes::reviews::get_dealer_reviews))
        .route("/reviews/dealer/:dealer_id", get(routes::reviews::get_dealer_reviews))
        .route("/add_review", post(routes::reviews::add_review));

    // Wildcard CORS can't carry cookies; sessions then need a Bearer header
    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/djangoapp", app_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}
