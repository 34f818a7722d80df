/// Configuration management for the API server
///
/// Configuration comes from environment variables (a `.env` file is honored
/// in development).
///
/// # Environment Variables
///
/// - `API_HOST` (default `0.0.0.0`), `API_PORT` (default `8000`)
/// - `API_CORS_ORIGINS`: comma separated origins, `*` for any (default `*`).
///   `*` never allows credentials, so a browser frontend on another origin
///   can't send the `sessionid` cookie. List the frontend origins explicitly,
///   or have the client send `Authorization: Bearer <token>`.
/// - `API_PRODUCTION`: enables HSTS and `Secure` cookies (default `false`)
/// - `DATABASE_URL` (required), `DATABASE_MAX_CONNECTIONS` (default 10)
/// - `DEALER_API_URL` (default `http://localhost:3030`)
/// - `SENTIMENT_API_URL` (default `http://localhost:5050/`)
/// - `OUTBOUND_TIMEOUT_SECS` (default 10)
/// - `SENTIMENT_CONCURRENCY` (default 4)
/// - `SESSION_TTL_HOURS` (default 336)
///
/// # Example
///
/// ```no_run
/// use dealership_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::{env, str::FromStr, time::Duration};

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub services: ServicesConfig,
    pub session: SessionConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,

    /// Allowed CORS origins; `*` means any
    pub cors_origins: Vec<String>,

    /// Production mode (HTTPS assumed)
    pub production: bool,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// External service endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Base URL of the dealership/review service
    pub dealer_api_url: String,

    /// Base URL of the sentiment analyzer
    pub sentiment_api_url: String,

    /// Per-request timeout for outbound calls
    pub timeout_secs: u64,

    /// Maximum sentiment calls in flight for one review listing
    pub sentiment_concurrency: usize,
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session lifetime in hours
    pub ttl_hours: i64,
}

impl Config {
    /// Loads configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a variable holds an
    /// unparseable value.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let cors_origins = lookup("API_CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let sentiment_concurrency: usize = parse_or(&lookup, "SENTIMENT_CONCURRENCY", 4)?;
        if sentiment_concurrency == 0 {
            anyhow::bail!("SENTIMENT_CONCURRENCY must be at least 1");
        }

        let ttl_hours: i64 = parse_or(&lookup, "SESSION_TTL_HOURS", 336)?;
        if ttl_hours <= 0 {
            anyhow::bail!("SESSION_TTL_HOURS must be positive");
        }

        Ok(Self {
            api: ApiConfig {
                host: lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(&lookup, "API_PORT", 8000)?,
                cors_origins,
                production: parse_or(&lookup, "API_PRODUCTION", false)?,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            },
            services: ServicesConfig {
                dealer_api_url: lookup("DEALER_API_URL")
                    .unwrap_or_else(|| "http://localhost:3030".to_string()),
                sentiment_api_url: lookup("SENTIMENT_API_URL")
                    .unwrap_or_else(|| "http://localhost:5050/".to_string()),
                timeout_secs: parse_or(&lookup, "OUTBOUND_TIMEOUT_SECS", 10)?,
                sentiment_concurrency,
            },
            session: SessionConfig { ttl_hours },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    pub fn outbound_timeout(&self) -> Duration {
        Duration::from_secs(self.services.timeout_secs)
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session.ttl_hours)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e)),
        None => Ok(default),
    }
}
