//! Business logic services
//!
//! Every mutating call is one unit of work: it opens a transaction, runs its
//! statements and commits. An error anywhere drops the transaction, which
//! rolls it back.

pub mod authors;
pub mod catalog;
pub mod uploads;

use crate::{config::UploadsConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub authors: authors::AuthorsService,
    pub uploads: uploads::UploadStore,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub async fn new(repository: Repository, uploads_config: &UploadsConfig) -> AppResult<Self> {
        let uploads = uploads::UploadStore::new(uploads_config.dir.clone());
        uploads.ensure_dir().await?;

        Ok(Self {
            catalog: catalog::CatalogService::new(repository.clone(), uploads.clone()),
            authors: authors::AuthorsService::new(repository.clone()),
            uploads,
            repository,
        })
    }

    /// Check that the database answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
