//! Author pages: create, edit, delete

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};

use crate::{
    error::PageResult,
    models::author::{CreateAuthor, UpdateAuthor},
    views,
};

pub async fn new_author_form() -> Html<String> {
    Html(views::authors::new_author_form())
}

pub async fn create_author(
    State(state): State<crate::AppState>,
    Form(data): Form<CreateAuthor>,
) -> PageResult<Redirect> {
    state.services.authors.create(&data).await?;
    Ok(Redirect::to("/"))
}

pub async fn edit_author_form(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> PageResult<Html<String>> {
    let author = state.services.authors.get_by_id(id).await?;
    Ok(Html(views::authors::edit_author_form(&author)))
}

/// Rename an author; an empty name keeps the current one
pub async fn update_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Form(data): Form<UpdateAuthor>,
) -> PageResult<Redirect> {
    state.services.authors.update(id, data).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete_author_form(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> PageResult<Html<String>> {
    let author = state.services.authors.get_by_id(id).await?;
    Ok(Html(views::authors::delete_author_form(&author)))
}

pub async fn delete_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> PageResult<Redirect> {
    state.services.authors.delete(id).await?;
    Ok(Redirect::to("/"))
}
