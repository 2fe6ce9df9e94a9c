//! Book model and related types

use axum::body::Bytes;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::author::Author;

/// Book record, with its linked authors
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub genre: String,
    /// Name of the attached file inside the upload directory
    pub file_path: Option<String>,
    #[sqlx(skip)]
    #[serde(default)]
    pub authors: Vec<Author>,
}

/// A file received through a multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File name as submitted by the client (untrusted)
    pub file_name: String,
    pub bytes: Bytes,
}

/// New book submission
#[derive(Debug)]
pub struct CreateBook {
    pub title: String,
    pub genre: String,
    /// Author name; reused when an author with exactly this name exists
    pub author: Option<String>,
    pub file: Option<UploadedFile>,
}

/// Book edit submission. `None` fields leave the stored value untouched.
#[derive(Debug, Default)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub file: Option<UploadedFile>,
}

/// What the search term is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchFilter {
    /// Exact book title
    Book,
    /// Exact name of a linked author
    Author,
}

/// Search form
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub filter: SearchFilter,
    pub title: String,
}

/// Treat empty form values as absent
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
