//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{non_empty, Book, CreateBook, SearchFilter, SearchForm, UpdateBook},
    },
    repository::Repository,
};

use super::uploads::UploadStore;

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    uploads: UploadStore,
}

impl CatalogService {
    pub fn new(repository: Repository, uploads: UploadStore) -> Self {
        Self { repository, uploads }
    }

    /// All books and all authors, for the home page
    pub async fn overview(&self) -> AppResult<(Vec<Book>, Vec<Author>)> {
        let books = self.repository.books.list().await?;
        let authors = self.repository.authors.list().await?;
        Ok((books, authors))
    }

    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a book, storing its file and linking its author if given.
    ///
    /// An author with exactly the submitted name is reused; otherwise a new
    /// one is created.
    pub async fn create_book(&self, data: CreateBook) -> AppResult<i64> {
        let file_path = match data.file {
            Some(ref file) => Some(self.uploads.store(file).await?),
            None => None,
        };

        let result = self
            .insert_book(&data.title, &data.genre, data.author, file_path.as_deref())
            .await;
        if result.is_err() {
            self.discard_upload(file_path.as_deref()).await;
        }
        let book_id = result?;

        tracing::info!("Created book id={} title={:?}", book_id, data.title);
        Ok(book_id)
    }

    async fn insert_book(
        &self,
        title: &str,
        genre: &str,
        author: Option<String>,
        file_path: Option<&str>,
    ) -> AppResult<i64> {
        let mut tx = self.repository.begin().await?;
        let book_id = self.repository.books.create(&mut tx, title, genre, file_path).await?;

        if let Some(name) = non_empty(author) {
            let author = match self.repository.authors.find_by_name(&mut tx, &name).await? {
                Some(existing) => existing,
                None => self.repository.authors.create(&mut tx, &name).await?,
            };
            self.repository.books.add_author(&mut tx, book_id, author.id).await?;
            tracing::debug!("Linked book id={} to author id={}", book_id, author.id);
        }

        tx.commit().await?;
        Ok(book_id)
    }

    /// Update a book. Empty title/genre keep the stored values; a new file
    /// replaces the stored reference (the old file stays on disk).
    pub async fn update_book(&self, id: i64, data: UpdateBook) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;
        if !self.repository.books.exists(&mut tx, id).await? {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }

        let file_path = match data.file {
            Some(ref file) => Some(self.uploads.store(file).await?),
            None => None,
        };
        let title = non_empty(data.title);
        let genre = non_empty(data.genre);

        let result = async {
            self.repository
                .books
                .update(&mut tx, id, title.as_deref(), genre.as_deref(), file_path.as_deref())
                .await?;
            tx.commit().await?;
            Ok::<_, AppError>(())
        }
        .await;
        if result.is_err() {
            self.discard_upload(file_path.as_deref()).await;
        }
        result?;

        tracing::info!("Updated book id={}", id);
        Ok(())
    }

    /// Remove a file stored for a request whose database work failed
    async fn discard_upload(&self, stored_name: Option<&str>) {
        if let Some(name) = stored_name {
            if let Err(e) = self.uploads.remove(name).await {
                tracing::warn!("Failed to remove orphaned upload {}: {}", name, e);
            }
        }
    }

    /// Delete a book. Its author links are removed, its authors and its
    /// uploaded file are kept.
    pub async fn delete_book(&self, id: i64) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;
        self.repository.books.delete(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!("Deleted book id={}", id);
        Ok(())
    }

    /// Exact-match search on book title or linked author name
    pub async fn search(&self, form: &SearchForm) -> AppResult<Vec<Book>> {
        tracing::debug!("Search {:?} = {:?}", form.filter, form.title);
        match form.filter {
            SearchFilter::Book => self.repository.books.search_by_title(&form.title).await,
            SearchFilter::Author => self.repository.books.search_by_author(&form.title).await,
        }
    }
}
