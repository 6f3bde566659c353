use axum::{extract::State, Extension};
use serde::Serialize;

use super::NoteView;
use crate::error::ApiError;
use crate::middleware::{AuthUser, Page};
use crate::routes::AppState;
use crate::services::notes;

#[derive(Debug, Serialize)]
pub struct ListContext {
    pub object_list: Vec<NoteView>,
}

/// GET /notes/ - the session user's notes, oldest first
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Page<ListContext>, ApiError> {
    let object_list = notes::list_notes(state.store.as_ref(), user.id)
        .await?
        .into_iter()
        .map(|note| NoteView::new(note, &user))
        .collect();

    Ok(Page::ok(ListContext { object_list }))
}
