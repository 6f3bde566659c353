use axum::{
    extract::{Path, State},
    response::Response,
    Extension,
};

use super::{NoteContext, NoteView};
use crate::error::ApiError;
use crate::middleware::{found, AuthUser, Page};
use crate::routes::{paths, AppState};
use crate::services::notes;

/// GET /delete/:slug/ - confirmation page
pub async fn delete_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(slug): Path<String>,
) -> Result<Page<NoteContext>, ApiError> {
    let note = notes::owned_note(state.store.as_ref(), &slug, user.id).await?;
    Ok(Page::ok(NoteContext {
        note: NoteView::new(note, &user),
    }))
}

/// POST /delete/:slug/ - remove the note
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    let note = notes::owned_note(state.store.as_ref(), &slug, user.id).await?;
    notes::delete_note(state.store.as_ref(), &note).await?;
    Ok(found(paths::SUCCESS))
}
