//! Database connection and schema initialization

use std::str::FromStr;

use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::{config::DatabaseConfig, error::AppResult};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open a connection pool on the configured SQLite file, creating the file if missing.
pub async fn connect(config: &DatabaseConfig) -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Create all catalog tables that do not exist yet. Existing tables and rows
/// are left as they are.
pub async fn init_schema(pool: &SqlitePool) -> AppResult<()> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database schema ready");
    Ok(())
}
