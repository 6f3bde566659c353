use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Longest title accepted by the note form and the `notes.title` column.
pub const MAX_TITLE_LENGTH: usize = 100;
/// Longest slug accepted by the note form and the `notes.slug` column.
pub const MAX_SLUG_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: Uuid,
}

/// Validated fields of a note about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: Uuid,
}

/// The mutable part of a note. Author and id never change after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteChanges {
    pub title: String,
    pub text: String,
    pub slug: String,
}

impl Note {
    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }
}
