//! HTML pages

pub mod authors;
pub mod books;

use axum::http::StatusCode;

use crate::models::{author::Author, book::Book};

/// Escape text for use in HTML content and double-quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap page content in the common document shell
pub fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<header>
<h1><a href="/">Book catalog</a></h1>
<nav><a href="/books/new/">New book</a> | <a href="/author/new/">New author</a></nav>
</header>
<main>
{content}
</main>
</body>
</html>
"#,
        title = escape(title),
        content = content
    )
}

/// Home page: every book and every author
pub fn index(books: &[Book], authors: &[Author]) -> String {
    let content = format!(
        r#"{search}
<h2>Books</h2>
{books}
<h2>Authors</h2>
{authors}"#,
        search = search_form(),
        books = books::book_table(books),
        authors = authors::author_list(authors),
    );
    layout("Book catalog", &content)
}

fn search_form() -> &'static str {
    r#"<form action="/search/" method="post">
<select name="filter">
<option value="book">Title</option>
<option value="author">Author</option>
</select>
<input type="text" name="title" required>
<button type="submit">Search</button>
</form>"#
}

/// Search results page
pub fn search_results(term: &str, books: &[Book]) -> String {
    let content = format!(
        "<h2>Results for &quot;{}&quot;</h2>\n{}\n<p><a href=\"/\">Back</a></p>",
        escape(term),
        books::book_table(books)
    );
    layout("Search results", &content)
}

/// Error page shown by HTML routes
pub fn error_page(status: StatusCode, message: &str) -> String {
    let content = format!(
        "<h2>{}</h2>\n<p>{}</p>\n<p><a href=\"/\">Back to catalog</a></p>",
        status,
        escape(message)
    );
    layout(&status.to_string(), &content)
}
