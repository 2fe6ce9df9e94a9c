//! Books repository

use std::collections::HashMap;

use sqlx::{Pool, QueryBuilder, Row, Sqlite, SqliteConnection};

use crate::{
    error::{AppError, AppResult},
    models::{author::Author, book::Book},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// List all books with their authors
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, genre, file_path FROM books ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        self.with_authors(books).await
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        let mut book = sqlx::query_as::<_, Book>(
            "SELECT id, title, genre, file_path FROM books WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        book.authors = self.get_book_authors(id).await?;
        Ok(book)
    }

    /// Load all authors for a book via the book_authors junction table
    async fn get_book_authors(&self, book_id: i64) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(
            r#"
            SELECT a.id, a.name
            FROM book_authors ba
            JOIN authors a ON a.id = ba.author_id
            WHERE ba.book_id = ?
            ORDER BY a.id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Attach authors to a batch of books with a single query
    async fn with_authors(&self, mut books: Vec<Book>) -> AppResult<Vec<Book>> {
        if books.is_empty() {
            return Ok(books);
        }

        let mut query = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT ba.book_id, a.id, a.name
            FROM book_authors ba
            JOIN authors a ON a.id = ba.author_id
            WHERE ba.book_id IN ("#,
        );
        let mut ids = query.separated(", ");
        for book in &books {
            ids.push_bind(book.id);
        }
        query.push(") ORDER BY a.id");

        let rows = query.build().fetch_all(&self.pool).await?;

        let mut by_book: HashMap<i64, Vec<Author>> = HashMap::new();
        for r in &rows {
            by_book.entry(r.get("book_id")).or_default().push(Author {
                id: r.get("id"),
                name: r.get("name"),
            });
        }

        for book in &mut books {
            book.authors = by_book.remove(&book.id).unwrap_or_default();
        }
        Ok(books)
    }

    // =========================================================================
    // SEARCH
    // =========================================================================

    /// Books whose title equals `title` exactly
    pub async fn search_by_title(&self, title: &str) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, genre, file_path FROM books WHERE title = ? ORDER BY id",
        )
        .bind(title)
        .fetch_all(&self.pool)
        .await?;
        self.with_authors(books).await
    }

    /// Books linked to at least one author named exactly `name`
    pub async fn search_by_author(&self, name: &str) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT b.id, b.title, b.genre, b.file_path
            FROM books b
            WHERE EXISTS (
                SELECT 1 FROM book_authors ba
                JOIN authors a ON a.id = ba.author_id
                WHERE ba.book_id = b.id AND a.name = ?
            )
            ORDER BY b.id
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;
        self.with_authors(books).await
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Check that a book row exists
    pub async fn exists(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(found.is_some())
    }

    /// Insert a book, returning its new ID
    pub async fn create(
        &self,
        conn: &mut SqliteConnection,
        title: &str,
        genre: &str,
        file_path: Option<&str>,
    ) -> AppResult<i64> {
        let id = sqlx::query("INSERT INTO books (title, genre, file_path) VALUES (?, ?, ?)")
            .bind(title)
            .bind(genre)
            .bind(file_path)
            .execute(&mut *conn)
            .await?
            .last_insert_rowid();
        Ok(id)
    }

    /// Update a book. `None` keeps the stored value.
    pub async fn update(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        title: Option<&str>,
        genre: Option<&str>,
        file_path: Option<&str>,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = COALESCE(?, title),
                genre = COALESCE(?, genre),
                file_path = COALESCE(?, file_path)
            WHERE id = ?
            "#,
        )
        .bind(title)
        .bind(genre)
        .bind(file_path)
        .bind(id)
        .execute(&mut *conn)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }

    /// Link a book to an author (no-op if already linked)
    pub async fn add_author(&self, conn: &mut SqliteConnection, book_id: i64, author_id: i64) -> AppResult<()> {
        sqlx::query("INSERT OR IGNORE INTO book_authors (book_id, author_id) VALUES (?, ?)")
            .bind(book_id)
            .bind(author_id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Delete a book. Links to authors go with it, the authors stay.
    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }
}
