//! Receipt persistence: the [`ReceiptStore`] trait and its backends.
//!
//! The backend is picked at startup from `DATA_BACKEND`:
//! - `memory`: [`MemoryReceiptStore`], process-local
//! - `postgres`: [`PgReceiptStore`], backed by [`repositories::ReceiptRepo`]

use std::sync::Arc;

use receipts_core::config::{env_or, env_required, ConfigError};
use sqlx::postgres::PgPoolOptions;

pub mod memory;
pub mod models;
pub mod postgres;
pub mod repositories;
pub mod store;

pub use memory::MemoryReceiptStore;
pub use postgres::PgReceiptStore;
pub use store::{ReceiptStore, StoreError};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations under `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Which receipt store the server uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataBackend {
    Memory,
    Postgres { database_url: String },
}

impl DataBackend {
    /// Load from environment variables.
    ///
    /// | Env Var        | Default                         |
    /// |----------------|---------------------------------|
    /// | `DATA_BACKEND` | `memory` (`memory`, `postgres`) |
    /// | `DATABASE_URL` | required for `postgres`         |
    pub fn from_env() -> Result<Self, ConfigError> {
        let name = env_or("DATA_BACKEND", "memory");
        match name.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres {
                database_url: env_required("DATABASE_URL")?,
            }),
            _ => Err(ConfigError::Invalid {
                key: "DATA_BACKEND",
                value: name,
                reason: "expected one of: memory, postgres".into(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres { .. } => "postgres",
        }
    }

    /// Build the configured store, connecting and migrating when needed.
    pub async fn connect(&self) -> Result<Arc<dyn ReceiptStore>, StoreError> {
        match self {
            Self::Memory => Ok(Arc::new(MemoryReceiptStore::new())),
            Self::Postgres { database_url } => {
                let pool = create_pool(database_url).await?;
                tracing::info!("Database connection pool created");

                health_check(&pool).await?;
                tracing::info!("Database health check passed");

                run_migrations(&pool).await.map_err(sqlx::Error::from)?;
                tracing::info!("Database migrations applied");

                Ok(Arc::new(PgReceiptStore::new(pool)))
            }
        }
    }
}
