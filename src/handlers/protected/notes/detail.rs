use axum::{
    extract::{Path, State},
    Extension,
};

use super::{NoteContext, NoteView};
use crate::error::ApiError;
use crate::middleware::{AuthUser, Page};
use crate::routes::AppState;
use crate::services::notes;

/// GET /note/:slug/
pub async fn detail(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(slug): Path<String>,
) -> Result<Page<NoteContext>, ApiError> {
    let note = notes::owned_note(state.store.as_ref(), &slug, user.id).await?;
    Ok(Page::ok(NoteContext {
        note: NoteView::new(note, &user),
    }))
}
