//! Book pages: listing, create, edit, delete

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
};
use axum_extra::extract::Multipart;

use crate::{
    error::PageResult,
    models::book::{CreateBook, UpdateBook},
    views,
};

use super::MultipartForm;

/// Home page: all books and all authors
pub async fn index(State(state): State<crate::AppState>) -> PageResult<Html<String>> {
    let (books, authors) = state.services.catalog.overview().await?;
    Ok(Html(views::index(&books, &authors)))
}

/// Blank new-book form
pub async fn new_book_form() -> Html<String> {
    Html(views::books::new_book_form())
}

/// Create a book from a multipart form (`name`, `genre`, `author`, `file`)
pub async fn create_book(
    State(state): State<crate::AppState>,
    multipart: Multipart,
) -> PageResult<Redirect> {
    let mut form = MultipartForm::read(multipart).await?;

    let data = CreateBook {
        title: form.required("name")?,
        genre: form.required("genre")?,
        author: form.text("author"),
        file: form.file("file"),
    };
    state.services.catalog.create_book(data).await?;

    Ok(Redirect::to("/"))
}

/// Edit form pre-filled with the current values
pub async fn edit_book_form(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> PageResult<Html<String>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Html(views::books::edit_book_form(&book)))
}

/// Apply an edit (`title`, `genre`, `file`); empty fields keep current values
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> PageResult<Redirect> {
    let mut form = MultipartForm::read(multipart).await?;

    let data = UpdateBook {
        title: form.text("title"),
        genre: form.text("genre"),
        file: form.file("file"),
    };
    state.services.catalog.update_book(id, data).await?;

    Ok(Redirect::to("/"))
}

/// Delete confirmation page
pub async fn delete_book_form(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> PageResult<Html<String>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Html(views::books::delete_book_form(&book)))
}

pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> PageResult<Redirect> {
    state.services.catalog.delete_book(id).await?;
    Ok(Redirect::to("/"))
}
