use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::{IntoResponse, Response},
    Extension, Form,
};
use serde::Serialize;

use super::NoteView;
use crate::error::ApiError;
use crate::forms::{FormContext, NoteForm};
use crate::handlers::rejected;
use crate::middleware::{found, AuthUser, Page};
use crate::routes::{paths, AppState};
use crate::services::notes;

#[derive(Debug, Serialize)]
pub struct EditContext {
    pub form: FormContext,
    pub note: NoteView,
}

/// GET /edit/:slug/ - form prefilled with the note
pub async fn edit_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(slug): Path<String>,
) -> Result<Page<EditContext>, ApiError> {
    let note = notes::owned_note(state.store.as_ref(), &slug, user.id).await?;
    Ok(Page::ok(EditContext {
        form: NoteForm::from_note(&note).context(),
        note: NoteView::new(note, &user),
    }))
}

/// POST /edit/:slug/ - replace title, text and slug
///
/// Ownership is checked before the body, so a non-owner gets 404 whatever they submit.
pub async fn edit_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(slug): Path<String>,
    form: Result<Form<NoteForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let note = notes::owned_note(state.store.as_ref(), &slug, user.id).await?;
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return Ok(rejection.into_response()),
    };

    match notes::update_note(state.store.as_ref(), &note, &form).await {
        Ok(_) => Ok(found(paths::SUCCESS)),
        Err(err) => rejected(err, |errors| {
            Page::invalid(EditContext {
                form: form.context().with_errors(errors),
                note: NoteView::new(note, &user),
            })
        }),
    }
}
