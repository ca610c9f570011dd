//! Database connection setup

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tubely_core::Config;

/// Connect to the configured database and apply pending migrations.
pub async fn setup_database(config: &Config) -> Result<SqlitePool> {
    let pool = tubely_db::connect_pool(config.database_url())
        .await
        .context("Failed to connect to database")?;

    tubely_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database connected and migrations applied");
    Ok(pool)
}
