//! Route-level tests for the catalog pages and JSON API

use reqwest::{header, StatusCode};
use serde_json::Value;

use crate::{assert_see_other, TestApp};

/// Make every insert into `book_authors` fail
async fn reject_author_links(app: &TestApp) {
    sqlx::query(
        "CREATE TRIGGER reject_links BEFORE INSERT ON book_authors \
         BEGIN SELECT RAISE(ABORT, 'links disabled'); END",
    )
    .execute(&app.pool().await)
    .await
    .unwrap();
}

/// Make every update of `books` fail
async fn reject_book_updates(app: &TestApp) {
    sqlx::query(
        "CREATE TRIGGER reject_updates BEFORE UPDATE ON books \
         BEGIN SELECT RAISE(ABORT, 'updates disabled'); END",
    )
    .execute(&app.pool().await)
    .await
    .unwrap();
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/v1/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");

    let response = app.get("/api/v1/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_home_page_lists_books_and_authors() {
    let app = TestApp::spawn().await;
    app.create_book("Dune", "SF", "Herbert").await;
    app.post_form("/author/new/", &[("name", "Le Guin")]).await;

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = response.text().await.unwrap();
    assert!(page.contains("Dune"));
    assert!(page.contains("Herbert"));
    assert!(page.contains("Le Guin"));
}

#[tokio::test]
async fn test_new_book_form() {
    let app = TestApp::spawn().await;

    let response = app.get("/books/new/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = response.text().await.unwrap();
    assert!(page.contains(r#"name="name""#));
    assert!(page.contains(r#"enctype="multipart/form-data""#));
}

#[tokio::test]
async fn test_create_book_without_author() {
    let app = TestApp::spawn().await;

    let id = app.create_book("Dune", "SF", "").await;

    let books = app.books_json().await;
    assert_eq!(books.as_array().unwrap().len(), 1);
    let book = app.book_json(id).await;
    assert_eq!(book["title"], "Dune");
    assert_eq!(book["genre"], "SF");
    assert!(book["file_path"].is_null());
    assert!(book["authors"].as_array().unwrap().is_empty());
    assert!(app.authors_json().await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_book_reuses_existing_author() {
    let app = TestApp::spawn().await;

    let first = app.create_book("Dune", "SF", "Herbert").await;
    let second = app.create_book("Dune Messiah", "SF", "Herbert").await;

    let authors = app.authors_json().await;
    assert_eq!(authors.as_array().unwrap().len(), 1);
    let author_id = authors[0]["id"].as_i64().unwrap();

    assert_eq!(app.book_json(first).await["authors"][0]["id"], author_id);
    assert_eq!(app.book_json(second).await["authors"][0]["id"], author_id);
}

#[tokio::test]
async fn test_create_book_missing_field_is_bad_request() {
    let app = TestApp::spawn().await;

    let response = app
        .post_multipart("/books/new/", &[("name", "Dune")], None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.books_json().await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_create_leaves_nothing_behind() {
    let app = TestApp::spawn().await;
    reject_author_links(&app).await;

    // The book and author inserts succeed, the link insert fails
    let response = app
        .post_multipart(
            "/books/new/",
            &[("name", "Dune"), ("genre", "SF"), ("author", "Herbert")],
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let pool = app.pool().await;
    let books: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(&pool)
        .await
        .unwrap();
    let authors: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!((books, authors), (0, 0));

    // Later requests see a clean catalog
    assert!(app.books_json().await.as_array().unwrap().is_empty());
    assert!(app.authors_json().await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_create_removes_uploaded_file() {
    let app = TestApp::spawn().await;
    reject_author_links(&app).await;

    let response = app
        .post_multipart(
            "/books/new/",
            &[("name", "Dune"), ("genre", "SF"), ("author", "Herbert")],
            Some(("file", "dune.pdf", b"spice")),
        )
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn test_failed_edit_removes_uploaded_file() {
    let app = TestApp::spawn().await;
    let id = app.create_book("Dune", "SF", "").await;
    reject_book_updates(&app).await;

    let response = app
        .post_multipart(
            &format!("/books/{}/edit/", id),
            &[("title", "Children of Dune")],
            Some(("file", "cover.png", b"png")),
        )
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(app.uploaded_files().is_empty());

    let book = app.book_json(id).await;
    assert_eq!(book["title"], "Dune");
    assert!(book["file_path"].is_null());
}

#[tokio::test]
async fn test_create_book_with_file_and_download() {
    let app = TestApp::spawn().await;

    let response = app
        .post_multipart(
            "/books/new/",
            &[("name", "Dune"), ("genre", "SF"), ("author", "")],
            Some(("file", "../dune notes.txt", b"spice")),
        )
        .await;
    assert_see_other(&response);

    let books = app.books_json().await;
    let file_path = books[0]["file_path"].as_str().unwrap().to_string();
    assert!(file_path.ends_with("_dune_notes.txt"));
    assert_eq!(app.uploaded_files(), vec![file_path.clone()]);

    let response = app.get(&format!("/download/{}", file_path)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"spice");
}

#[tokio::test]
async fn test_download_unknown_file_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app.get("/download/missing.pdf").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Decodes to "../secret" on the server side
    let response = app.get("/download/..%2Fsecret").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_book_form_is_prefilled() {
    let app = TestApp::spawn().await;
    let id = app.create_book("Dune", "SF", "").await;

    let response = app.get(&format!("/books/{}/edit/", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains(r#"value="Dune""#));
}

#[tokio::test]
async fn test_edit_book_empty_fields_keep_values() {
    let app = TestApp::spawn().await;
    let id = app.create_book("Dune", "SF", "").await;

    let response = app
        .post_multipart(&format!("/books/{}/edit/", id), &[("title", ""), ("genre", "")], None)
        .await;
    assert_see_other(&response);

    let book = app.book_json(id).await;
    assert_eq!(book["title"], "Dune");
    assert_eq!(book["genre"], "SF");
}

#[tokio::test]
async fn test_edit_book_overwrites_non_empty_fields() {
    let app = TestApp::spawn().await;
    let id = app.create_book("Dune", "SF", "").await;

    let response = app
        .post_multipart(
            &format!("/books/{}/edit/", id),
            &[("title", "Children of Dune"), ("genre", "")],
            Some(("file", "cover.png", b"png")),
        )
        .await;
    assert_see_other(&response);

    let book = app.book_json(id).await;
    assert_eq!(book["title"], "Children of Dune");
    assert_eq!(book["genre"], "SF");

    // Stored reference is a bare file name, downloadable as is
    let file_path = book["file_path"].as_str().unwrap();
    assert!(file_path.ends_with("_cover.png"));
    assert!(!file_path.contains('/'));
    let response = app.get(&format!("/download/{}", file_path)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_book_is_not_found() {
    let app = TestApp::spawn().await;

    assert_eq!(app.get("/books/42/edit/").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.get("/books/42/delete/").await.status(), StatusCode::NOT_FOUND);

    let response = app.get("/api/v1/books/42").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], 20);
    assert_eq!(body["error"], "NoSuchData");

    let response = app
        .post_multipart("/books/42/edit/", &[("title", "Dune")], Some(("file", "x.txt", b"x")))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(app.uploaded_files().is_empty());

    let response = app.post_form("/books/42/delete/", &[]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_book_keeps_author() {
    let app = TestApp::spawn().await;
    let id = app.create_book("Dune", "SF", "Herbert").await;

    let response = app.get(&format!("/books/{}/delete/", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("Dune"));

    let response = app.post_form(&format!("/books/{}/delete/", id), &[]).await;
    assert_see_other(&response);

    assert!(app.books_json().await.as_array().unwrap().is_empty());
    let authors = app.authors_json().await;
    assert_eq!(authors[0]["name"], "Herbert");

    let pool = app.pool().await;
    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_authors")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(links, 0);
}

#[tokio::test]
async fn test_author_crud() {
    let app = TestApp::spawn().await;

    assert_eq!(app.get("/author/new/").await.status(), StatusCode::OK);

    let response = app.post_form("/author/new/", &[("name", "Herbert")]).await;
    assert_see_other(&response);
    let id = app.authors_json().await[0]["id"].as_i64().unwrap();

    let response = app.get(&format!("/author/{}/edit/", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains(r#"value="Herbert""#));

    // Empty name keeps the current one
    let response = app.post_form(&format!("/author/{}/edit/", id), &[("name", "")]).await;
    assert_see_other(&response);
    assert_eq!(app.authors_json().await[0]["name"], "Herbert");

    let response = app
        .post_form(&format!("/author/{}/edit/", id), &[("name", "Frank Herbert")])
        .await;
    assert_see_other(&response);
    assert_eq!(app.authors_json().await[0]["name"], "Frank Herbert");

    assert_eq!(app.get(&format!("/author/{}/delete/", id)).await.status(), StatusCode::OK);
    let response = app.post_form(&format!("/author/{}/delete/", id), &[]).await;
    assert_see_other(&response);
    assert!(app.authors_json().await.as_array().unwrap().is_empty());

    assert_eq!(app.get(&format!("/author/{}/edit/", id)).await.status(), StatusCode::NOT_FOUND);
    let response = app.post_form(&format!("/author/{}/edit/", id), &[("name", "x")]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_author_keeps_books() {
    let app = TestApp::spawn().await;
    let book_id = app.create_book("Dune", "SF", "Herbert").await;
    let author_id = app.authors_json().await[0]["id"].as_i64().unwrap();

    let response = app.post_form(&format!("/author/{}/delete/", author_id), &[]).await;
    assert_see_other(&response);

    let book = app.book_json(book_id).await;
    assert_eq!(book["title"], "Dune");
    assert!(book["authors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_by_title_is_exact() {
    let app = TestApp::spawn().await;
    app.create_book("Dune", "SF", "Herbert").await;
    app.create_book("Dune Messiah", "SF", "").await;
    app.create_book("dune", "SF", "").await;
    app.create_book("The Dispossessed", "SF", "Le Guin").await;

    let response = app
        .post_form("/search/", &[("filter", "book"), ("title", "Dune")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = response.text().await.unwrap();
    assert_eq!(page.matches("<td>Dune</td>").count(), 1);
    assert!(!page.contains("Dune Messiah"));
    assert!(!page.contains("<td>dune</td>"));

    // Only the matching book's authors are attached
    assert!(page.contains("<td>Herbert</td>"));
    assert!(!page.contains("Le Guin"));
}

#[tokio::test]
async fn test_search_by_author() {
    let app = TestApp::spawn().await;
    app.create_book("Dune", "SF", "Herbert").await;
    app.create_book("Dune Messiah", "SF", "Herbert").await;
    app.create_book("The Dispossessed", "SF", "Le Guin").await;
    app.create_book("Whipping Star", "SF", "Frank Herbert").await;

    let response = app
        .post_form("/search/", &[("filter", "author"), ("title", "Herbert")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = response.text().await.unwrap();
    assert!(page.contains("<td>Dune</td>"));
    assert!(page.contains("<td>Dune Messiah</td>"));
    assert_eq!(page.matches("<td>Herbert</td>").count(), 2);
    assert!(!page.contains("The Dispossessed"));
    assert!(!page.contains("Whipping Star"));
}

#[tokio::test]
async fn test_search_rejects_get_and_bad_forms() {
    let app = TestApp::spawn().await;

    assert_eq!(app.get("/search/").await.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = app.post_form("/search/", &[("filter", "isbn"), ("title", "x")]).await;
    assert!(response.status().is_client_error());

    let response = app.post_form("/search/", &[("filter", "book")]).await;
    assert!(response.status().is_client_error());
}
