use uuid::Uuid;

use crate::database::{NewNote, Note, NoteStore, StoreError};
use crate::error::ApiError;
use crate::forms::{FormError, NoteForm, WARNING};

/// Message of the 404 returned for missing notes and for notes owned by someone else
pub const NOTE_NOT_FOUND: &str = "No note found matching the query";

/// Look up a note the requester is allowed to touch.
///
/// A note written by another user is reported exactly like a missing one, so object routes
/// never reveal that a slug exists.
pub async fn owned_note(store: &dyn NoteStore, slug: &str, user_id: Uuid) -> Result<Note, ApiError> {
    match store.find_note_by_slug(slug).await? {
        Some(note) if note.is_authored_by(user_id) => Ok(note),
        Some(_) => {
            tracing::warn!("User {} addressed note '{}' owned by someone else", user_id, slug);
            Err(ApiError::not_found(NOTE_NOT_FOUND))
        }
        None => Err(ApiError::not_found(NOTE_NOT_FOUND)),
    }
}

pub async fn list_notes(store: &dyn NoteStore, user_id: Uuid) -> Result<Vec<Note>, ApiError> {
    Ok(store.list_notes_by_author(user_id).await?)
}

/// Validate and insert a note written by `author_id`
pub async fn create_note(store: &dyn NoteStore, form: &NoteForm, author_id: Uuid) -> Result<Note, FormError> {
    let changes = form.clean(store, None).await?;
    let note = store
        .create_note(NewNote {
            title: changes.title,
            text: changes.text,
            slug: changes.slug,
            author_id,
        })
        .await
        .map_err(slug_conflict)?;

    tracing::info!("Note '{}' created by {}", note.slug, author_id);
    Ok(note)
}

/// Validate and apply new title, text and slug to `note`
pub async fn update_note(store: &dyn NoteStore, note: &Note, form: &NoteForm) -> Result<Note, FormError> {
    let changes = form.clean(store, Some(note)).await?;
    let updated = store.update_note(note.id, changes).await.map_err(slug_conflict)?;

    tracing::info!("Note '{}' updated (was '{}')", updated.slug, note.slug);
    Ok(updated)
}

pub async fn delete_note(store: &dyn NoteStore, note: &Note) -> Result<(), ApiError> {
    store.delete_note(note.id).await?;
    tracing::info!("Note '{}' deleted", note.slug);
    Ok(())
}

// A concurrent writer claimed the slug between validation and commit
fn slug_conflict(err: StoreError) -> FormError {
    match err {
        StoreError::SlugTaken(slug) => FormError::field("slug", format!("{}{}", slug, WARNING)),
        other => FormError::Store(other),
    }
}
