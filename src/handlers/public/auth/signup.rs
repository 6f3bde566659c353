use axum::{extract::State, response::Response, Form};
use serde::Serialize;

use crate::error::ApiError;
use crate::forms::user::username_taken;
use crate::forms::{FormContext, SignupForm};
use crate::handlers::rejected;
use crate::middleware::{found, Page};
use crate::routes::{paths, AppState};

#[derive(Debug, Serialize)]
pub struct SignupContext {
    pub form: FormContext,
}

/// GET /auth/signup/ - registration form
pub async fn signup_get() -> Page<SignupContext> {
    Page::ok(SignupContext {
        form: SignupForm::default().context(),
    })
}

/// POST /auth/signup/ - create the account, then send the user to the login page
pub async fn signup_post(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Response, ApiError> {
    let created = match form.clean(state.store.as_ref()).await {
        Ok(user) => state.store.create_user(user).await.map_err(username_taken),
        Err(err) => Err(err),
    };

    match created {
        Ok(user) => {
            tracing::info!("User '{}' signed up", user.username);
            Ok(found(paths::LOGIN))
        }
        Err(err) => rejected(err, |errors| {
            Page::invalid(SignupContext {
                form: form.context().with_errors(errors),
            })
        }),
    }
}
