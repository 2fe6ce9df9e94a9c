//! Author pages

use crate::models::author::Author;

use super::{escape, layout};

pub fn author_list(authors: &[Author]) -> String {
    if authors.is_empty() {
        return "<p>No authors.</p>".to_string();
    }

    let items: String = authors
        .iter()
        .map(|a| {
            format!(
                "<li>{name} <a href=\"/author/{id}/edit/\">Edit</a> <a href=\"/author/{id}/delete/\">Delete</a></li>\n",
                id = a.id,
                name = escape(&a.name),
            )
        })
        .collect();

    format!("<ul>\n{}</ul>", items)
}

pub fn new_author_form() -> String {
    let content = r#"<h2>New author</h2>
<form action="/author/new/" method="post">
<p><label>Name <input type="text" name="name" required></label></p>
<button type="submit">Create</button>
</form>"#;
    layout("New author", content)
}

pub fn edit_author_form(author: &Author) -> String {
    let content = format!(
        r#"<h2>Edit author</h2>
<form action="/author/{id}/edit/" method="post">
<p><label>Name <input type="text" name="name" value="{name}"></label></p>
<button type="submit">Save</button>
<a href="/">Cancel</a>
</form>"#,
        id = author.id,
        name = escape(&author.name),
    );
    layout("Edit author", &content)
}

pub fn delete_author_form(author: &Author) -> String {
    let content = format!(
        r#"<h2>Delete &quot;{name}&quot;?</h2>
<p>Books by this author are kept.</p>
<form action="/author/{id}/delete/" method="post">
<button type="submit">Delete</button>
<a href="/">Cancel</a>
</form>"#,
        id = author.id,
        name = escape(&author.name),
    );
    layout("Delete author", &content)
}
