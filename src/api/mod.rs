//! HTTP handlers: HTML pages for the catalog plus a small JSON API

pub mod authors;
pub mod books;
pub mod catalog;
pub mod downloads;
pub mod health;
pub mod openapi;
pub mod search;

use std::collections::HashMap;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use axum_extra::extract::Multipart;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::{
    error::{AppError, AppResult},
    models::book::UploadedFile,
    AppState,
};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.uploads.max_body_bytes;

    // HTML pages
    let pages = Router::new()
        .route("/", get(books::index))
        // Books
        .route("/books/new/", get(books::new_book_form).post(books::create_book))
        .route("/books/:id/edit/", get(books::edit_book_form).post(books::update_book))
        .route("/books/:id/delete/", get(books::delete_book_form).post(books::delete_book))
        .route(
            "/download/:filename",
            get(downloads::download_file).post(downloads::download_file),
        )
        // Authors
        .route("/author/new/", get(authors::new_author_form).post(authors::create_author))
        .route("/author/:id/edit/", get(authors::edit_author_form).post(authors::update_author))
        .route("/author/:id/delete/", get(authors::delete_author_form).post(authors::delete_author))
        // Search (POST only, GET answers 405)
        .route("/search/", post(search::search_books))
        .layer(DefaultBodyLimit::max(body_limit));

    // JSON API v1 routes
    let api_v1 = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/books", get(catalog::list_books))
        .route("/books/:id", get(catalog::get_book))
        .route("/authors", get(catalog::list_authors));

    Router::new()
        .merge(pages)
        .nest("/api/v1", api_v1)
        .with_state(state)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}

/// Text fields and files collected from a multipart body
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    /// Drain a multipart body. File inputs submitted without a file name
    /// (the browser's "no file chosen") are ignored.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field.bytes().await?;
                    if !file_name.is_empty() {
                        form.files.insert(name, UploadedFile { file_name, bytes });
                    }
                }
                None => {
                    let text = field.text().await?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    /// Take an optional text field
    pub fn text(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    /// Take a text field that must be present
    pub fn required(&mut self, name: &str) -> AppResult<String> {
        self.text(name)
            .ok_or_else(|| AppError::BadRequest(format!("Missing form field '{}'", name)))
    }

    /// Take an uploaded file
    pub fn file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}
