use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::auth::{generate_jwt, Claims};
use crate::error::ApiError;
use crate::forms::{FormContext, LoginForm};
use crate::handlers::rejected;
use crate::middleware::auth::{is_safe_redirect, session_cookie};
use crate::middleware::{found, Page};
use crate::routes::{paths, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginContext {
    pub form: FormContext,
    pub next: Option<String>,
}

/// GET /auth/login/ - login form
pub async fn login_get(Query(query): Query<NextQuery>) -> Page<LoginContext> {
    Page::ok(LoginContext {
        form: LoginForm::default().context(),
        next: query.next,
    })
}

/// POST /auth/login/ - check credentials, set the session cookie, follow `next`
pub async fn login_post(
    State(state): State<AppState>,
    Query(query): Query<NextQuery>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    let next = form.next.clone().filter(|n| !n.is_empty()).or(query.next);

    let user = match form.clean(state.store.as_ref()).await {
        Ok(user) => user,
        Err(err) => {
            tracing::warn!("Failed login attempt for '{}'", form.username.trim());
            return rejected(err, |errors| {
                Page::invalid(LoginContext {
                    form: form.context().with_errors(errors),
                    next,
                })
            });
        }
    };

    let token = generate_jwt(&Claims::for_user(&user))?;
    tracing::info!("User '{}' logged in", user.username);

    let target = next
        .as_deref()
        .filter(|n| is_safe_redirect(n))
        .unwrap_or(paths::HOME);
    Ok((jar.add(session_cookie(token)), found(target)).into_response())
}
