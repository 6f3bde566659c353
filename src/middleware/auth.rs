use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use uuid::Uuid;

use super::response::found;
use crate::auth::validate_jwt;
use crate::config;
use crate::error::ApiError;
use crate::routes::{paths, AppState};

/// Characters escaped in the `next` parameter; path separators stay readable
const NEXT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// The logged-in user, injected into request extensions by [`require_login`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

/// Gate for protected routes.
///
/// Without a valid session the request is answered with a 302 to the login page carrying
/// `next=<requested path>`; the handler does not run.
pub async fn require_login(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&state, &jar, &headers).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(None) => redirect_to_login(request.uri()),
        Err(e) => e.into_response(),
    }
}

/// Resolve the session user, if any.
///
/// The token comes from the session cookie, or an `Authorization: Bearer` header. Bad,
/// expired or orphaned tokens count as anonymous.
pub async fn authenticate(
    state: &AppState,
    jar: &CookieJar,
    headers: &HeaderMap,
) -> Result<Option<AuthUser>, ApiError> {
    let Some(token) = session_token(jar, headers) else {
        return Ok(None);
    };

    let claims = match validate_jwt(&token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("Ignoring session token: {}", e);
            return Ok(None);
        }
    };

    match state.store.find_user(claims.sub).await? {
        Some(user) if user.username == claims.username => Ok(Some(AuthUser {
            id: user.id,
            username: user.username,
        })),
        _ => {
            tracing::warn!("Session token for unknown user '{}' ({})", claims.username, claims.sub);
            Ok(None)
        }
    }
}

fn session_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    let cookie_name = &config::config().security.session_cookie_name;
    if let Some(cookie) = jar.get(cookie_name) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// 302 to the login page, remembering where the user was going
pub fn redirect_to_login(uri: &Uri) -> Response {
    let requested = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    found(&login_url(requested))
}

pub fn login_url(next: &str) -> String {
    format!("{}?next={}", paths::LOGIN, utf8_percent_encode(next, NEXT_ENCODE_SET))
}

/// Only local absolute paths are followed after login
pub fn is_safe_redirect(next: &str) -> bool {
    next.starts_with('/')
        && !next.starts_with("//")
        && !next.starts_with("/\\")
        && url::Url::parse(next).is_err()
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    let security = &config::config().security;
    Cookie::build((security.session_cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(security.secure_cookies)
        .build()
}

/// Cookie that, when removed from a jar, clears the session on the client
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((config::config().security.session_cookie_name.clone(), ""))
        .path("/")
        .build()
}
