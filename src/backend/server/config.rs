//! Server Configuration
//!
//! Loads server settings from environment variables and connects the
//! database. Unlike a cache or a metrics sink, the store is not optional
//! here; startup fails if `DATABASE_URL` is missing or unreachable.

use sqlx::PgPool;
use thiserror::Error;

/// Server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Postgres connection string (`DATABASE_URL`)
    pub database_url: String,
    /// Listen port (`SERVER_PORT`, default 3000)
    pub port: u16,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let port = match std::env::var("SERVER_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: "SERVER_PORT",
                value: raw,
            })?,
            Err(_) => 3000,
        };

        // The token module reads JWT_SECRET at call time and only debug
        // builds have a development fallback; catch the misconfiguration
        // here instead of at the first login.
        if !cfg!(debug_assertions) && std::env::var("JWT_SECRET").is_err() {
            return Err(ConfigError::MissingVar("JWT_SECRET"));
        }

        Ok(Self { database_url, port })
    }
}

/// Connect the database pool and run migrations
pub async fn connect_database(config: &ServerConfig) -> Result<PgPool, sqlx::Error> {
    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed");

    Ok(pool)
}
