//! Catalog search

use axum::{extract::State, response::Html, Form};

use crate::{error::PageResult, models::book::SearchForm, views};

/// Exact-match search by book title (`filter=book`) or author name (`filter=author`)
pub async fn search_books(
    State(state): State<crate::AppState>,
    Form(form): Form<SearchForm>,
) -> PageResult<Html<String>> {
    let books = state.services.catalog.search(&form).await?;
    Ok(Html(views::search_results(&form.title, &books)))
}
