use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use serde_json::json;

use crate::error::ApiError;
use crate::middleware::{authenticate, Page};
use crate::routes::{paths, AppState};

#[derive(Debug, Serialize)]
pub struct HomeContext {
    pub name: &'static str,
    pub version: &'static str,
    /// Username of the visitor, when logged in
    pub user: Option<String>,
    pub links: HomeLinks,
}

#[derive(Debug, Serialize)]
pub struct HomeLinks {
    pub list: &'static str,
    pub add: &'static str,
    pub login: &'static str,
    pub signup: &'static str,
    pub logout: &'static str,
}

/// GET / - public landing page
pub async fn home(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<Page<HomeContext>, ApiError> {
    let user = authenticate(&state, &jar, &headers).await?;

    Ok(Page::ok(HomeContext {
        name: "Notes",
        version: env!("CARGO_PKG_VERSION"),
        user: user.map(|u| u.username),
        links: HomeLinks {
            list: paths::LIST,
            add: paths::ADD,
            login: paths::LOGIN,
            signup: paths::SIGNUP,
            logout: paths::LOGOUT,
        },
    }))
}

/// GET /health - storage liveness
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
