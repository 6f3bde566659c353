// handlers/protected/notes/mod.rs - Note pages
//
// list, success and add only need a session. detail, edit and delete address a note by
// slug and answer 404 unless the session user wrote it.
use serde::Serialize;

use crate::database::Note;
use crate::middleware::AuthUser;
use crate::routes::paths;

pub mod add;
pub mod delete;
pub mod detail;
pub mod edit;
pub mod list;
pub mod success;

pub use add::{add_get, add_post};
pub use delete::{delete_get, delete_post};
pub use detail::detail;
pub use edit::{edit_get, edit_post};
pub use list::list;
pub use success::success;

/// A note as pages render it
#[derive(Debug, Clone, Serialize)]
pub struct NoteView {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author: String,
    pub links: NoteLinks,
}

#[derive(Debug, Clone, Serialize)]
pub struct NoteLinks {
    pub detail: String,
    pub edit: String,
    pub delete: String,
}

impl NoteView {
    /// Only ever built for the author, so the author name is the session user's
    pub fn new(note: Note, author: &AuthUser) -> Self {
        let links = NoteLinks {
            detail: paths::detail(&note.slug),
            edit: paths::edit(&note.slug),
            delete: paths::delete(&note.slug),
        };
        Self {
            id: note.id,
            title: note.title,
            text: note.text,
            slug: note.slug,
            author: author.username.clone(),
            links,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NoteContext {
    pub note: NoteView,
}
