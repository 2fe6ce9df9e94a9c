//! Author management service

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        book::non_empty,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    /// Create an author. Names are not deduplicated here.
    pub async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        let mut tx = self.repository.begin().await?;
        let author = self.repository.authors.create(&mut tx, &data.name).await?;
        tx.commit().await?;

        tracing::info!("Created author id={} name={:?}", author.id, author.name);
        Ok(author)
    }

    /// Rename an author when a non-empty name is given
    pub async fn update(&self, id: i64, data: UpdateAuthor) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;
        match non_empty(data.name) {
            Some(name) => self.repository.authors.rename(&mut tx, id, &name).await?,
            None => {
                if !self.repository.authors.exists(&mut tx, id).await? {
                    return Err(AppError::NotFound(format!("Author {} not found", id)));
                }
            }
        }
        tx.commit().await?;

        tracing::info!("Updated author id={}", id);
        Ok(())
    }

    /// Delete an author; linked books are kept
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;
        self.repository.authors.delete(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!("Deleted author id={}", id);
        Ok(())
    }
}
