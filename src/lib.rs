//! Book Catalog
//!
//! A small library catalog web application: books, authors, the links between
//! them and files attached to books, kept in a SQLite database.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod repository;
pub mod services;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Connect to the database, create missing tables and the upload
    /// directory, and wire up the services.
    pub async fn build(config: AppConfig) -> AppResult<Self> {
        let pool = db::connect(&config.database).await?;
        tracing::info!("Connected to database {}", config.database.url);

        db::init_schema(&pool).await?;

        let repository = repository::Repository::new(pool);
        let services = services::Services::new(repository, &config.uploads).await?;
        tracing::info!("Upload directory: {}", services.uploads.dir().display());

        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }
}
