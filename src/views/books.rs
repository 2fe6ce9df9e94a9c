//! Book pages

use crate::models::book::Book;

use super::{escape, layout};

/// Table of books with their authors, file link and actions
pub fn book_table(books: &[Book]) -> String {
    if books.is_empty() {
        return "<p>No books.</p>".to_string();
    }

    let rows: String = books
        .iter()
        .map(|book| {
            let authors = book
                .authors
                .iter()
                .map(|a| escape(&a.name))
                .collect::<Vec<_>>()
                .join(", ");
            let file = match book.file_path {
                Some(ref name) => format!(
                    r#"<a href="/download/{0}">{0}</a>"#,
                    escape(name)
                ),
                None => String::new(),
            };
            format!(
                r#"<tr><td>{title}</td><td>{genre}</td><td>{authors}</td><td>{file}</td><td><a href="/books/{id}/edit/">Edit</a> <a href="/books/{id}/delete/">Delete</a></td></tr>
"#,
                id = book.id,
                title = escape(&book.title),
                genre = escape(&book.genre),
                authors = authors,
                file = file,
            )
        })
        .collect();

    format!(
        "<table>\n<tr><th>Title</th><th>Genre</th><th>Authors</th><th>File</th><th></th></tr>\n{}</table>",
        rows
    )
}

pub fn new_book_form() -> String {
    let content = r#"<h2>New book</h2>
<form action="/books/new/" method="post" enctype="multipart/form-data">
<p><label>Title <input type="text" name="name" required></label></p>
<p><label>Genre <input type="text" name="genre" required></label></p>
<p><label>Author <input type="text" name="author"></label></p>
<p><label>File <input type="file" name="file"></label></p>
<button type="submit">Create</button>
</form>"#;
    layout("New book", content)
}

pub fn edit_book_form(book: &Book) -> String {
    let content = format!(
        r#"<h2>Edit book</h2>
<form action="/books/{id}/edit/" method="post" enctype="multipart/form-data">
<p><label>Title <input type="text" name="title" value="{title}"></label></p>
<p><label>Genre <input type="text" name="genre" value="{genre}"></label></p>
<p><label>File <input type="file" name="file"></label></p>
<button type="submit">Save</button>
<a href="/">Cancel</a>
</form>"#,
        id = book.id,
        title = escape(&book.title),
        genre = escape(&book.genre),
    );
    layout("Edit book", &content)
}

pub fn delete_book_form(book: &Book) -> String {
    let content = format!(
        r#"<h2>Delete &quot;{title}&quot;?</h2>
<form action="/books/{id}/delete/" method="post">
<button type="submit">Delete</button>
<a href="/">Cancel</a>
</form>"#,
        id = book.id,
        title = escape(&book.title),
    );
    layout("Delete book", &content)
}
