//! Data models for the book catalog

pub mod author;
pub mod book;

// Re-export commonly used types
pub use author::{Author, CreateAuthor, UpdateAuthor};
pub use book::{Book, CreateBook, SearchFilter, SearchForm, UpdateBook, UploadedFile};
