use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::models::{NewNote, Note, NoteChanges, User};

/// Errors raised by a [`NoteStore`] backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Another note already uses this slug (global uniqueness, any author)
    #[error("Slug already taken: {0}")]
    SlugTaken(String),

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Storage for users and their notes.
///
/// Implementations must enforce both uniqueness constraints (`notes.slug` across all
/// notes, `users.username`) atomically with the write, so that of two concurrent writers
/// claiming one slug exactly one succeeds and the other sees [`StoreError::SlugTaken`].
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn create_user(&self, user: User) -> Result<User, StoreError>;

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn create_note(&self, note: NewNote) -> Result<Note, StoreError>;

    async fn find_note_by_slug(&self, slug: &str) -> Result<Option<Note>, StoreError>;

    /// True when some note other than `exclude` uses `slug`
    async fn slug_exists(&self, slug: &str, exclude: Option<i64>) -> Result<bool, StoreError>;

    /// Notes written by `author_id`, oldest first
    async fn list_notes_by_author(&self, author_id: Uuid) -> Result<Vec<Note>, StoreError>;

    async fn update_note(&self, id: i64, changes: NoteChanges) -> Result<Note, StoreError>;

    async fn delete_note(&self, id: i64) -> Result<(), StoreError>;

    async fn count_notes(&self) -> Result<i64, StoreError>;

    /// Cheap liveness probe for `/health`
    async fn health_check(&self) -> Result<(), StoreError>;
}
