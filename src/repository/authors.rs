//! Authors repository

use sqlx::{Pool, Sqlite, SqliteConnection};

use crate::{
    error::{AppError, AppResult},
    models::author::Author,
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Sqlite>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List all authors
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>("SELECT id, name FROM authors ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("SELECT id, name FROM authors WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    /// Find the first author whose name matches exactly (case-sensitive)
    pub async fn find_by_name(&self, conn: &mut SqliteConnection, name: &str) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>(
            "SELECT id, name FROM authors WHERE name = ? ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row)
    }

    /// Create an author
    pub async fn create(&self, conn: &mut SqliteConnection, name: &str) -> AppResult<Author> {
        let id = sqlx::query("INSERT INTO authors (name) VALUES (?)")
            .bind(name)
            .execute(&mut *conn)
            .await?
            .last_insert_rowid();
        Ok(Author {
            id,
            name: name.to_string(),
        })
    }

    /// Rename an author
    pub async fn rename(&self, conn: &mut SqliteConnection, id: i64, name: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE authors SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&mut *conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author {} not found", id)));
        }
        Ok(())
    }

    /// Check that an author row exists
    pub async fn exists(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM authors WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(found.is_some())
    }

    /// Delete an author. Links to books go with it, the books stay.
    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author {} not found", id)));
        }
        Ok(())
    }
}
