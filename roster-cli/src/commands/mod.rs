//! Command implementations for the roster CLI

pub mod records;
pub mod serve;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use roster_server::db::{create_pool_with_options, migrations, DEFAULT_MAX_CONNECTIONS};
use roster_server::{PgRecordStore, RecordStore};

pub use records::run_records;
pub use serve::run_serve;

/// Database connection arguments shared by every store-backed command
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Database URL (overrides .env files)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl DatabaseArgs {
    /// Open the pool, run migrations, and wrap it as the record store.
    pub async fn connect(&self) -> Result<Arc<dyn RecordStore>> {
        let database_url = self.database_url.as_deref().context(
            "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or ~/.roster/.env",
        )?;

        let pool = create_pool_with_options(database_url, self.max_connections)
            .await
            .context("Failed to create database pool")?;

        migrations::run(&pool)
            .await
            .context("Failed to run database migrations")?;

        Ok(Arc::new(PgRecordStore::new(pool)))
    }
}
