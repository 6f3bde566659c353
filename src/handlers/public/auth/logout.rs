use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use crate::middleware::auth::expired_session_cookie;
use crate::middleware::Page;

#[derive(Debug, Serialize)]
pub struct LogoutContext {
    pub message: &'static str,
}

/// GET|POST /auth/logout/ - drop the session cookie
pub async fn logout(jar: CookieJar) -> (CookieJar, Page<LogoutContext>) {
    (
        jar.remove(expired_session_cookie()),
        Page::ok(LogoutContext {
            message: "You have been logged out.",
        }),
    )
}
