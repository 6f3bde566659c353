pub mod note;
pub mod user;

pub use note::{NewNote, Note, NoteChanges, MAX_SLUG_LENGTH, MAX_TITLE_LENGTH};
pub use user::{User, UNUSABLE_PASSWORD};
