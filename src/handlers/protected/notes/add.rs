use axum::{extract::State, response::Response, Extension, Form};
use serde::Serialize;

use crate::error::ApiError;
use crate::forms::{FormContext, NoteForm};
use crate::handlers::rejected;
use crate::middleware::{found, AuthUser, Page};
use crate::routes::{paths, AppState};
use crate::services::notes;

#[derive(Debug, Serialize)]
pub struct AddContext {
    pub form: FormContext,
}

/// GET /add/ - empty note form
pub async fn add_get() -> Page<AddContext> {
    Page::ok(AddContext {
        form: NoteForm::default().context(),
    })
}

/// POST /add/ - create a note owned by the session user
pub async fn add_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Form(form): Form<NoteForm>,
) -> Result<Response, ApiError> {
    match notes::create_note(state.store.as_ref(), &form, user.id).await {
        Ok(_) => Ok(found(paths::SUCCESS)),
        Err(err) => rejected(err, |errors| {
            Page::invalid(AddContext {
                form: form.context().with_errors(errors),
            })
        }),
    }
}
