use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config;
use crate::database::NoteStore;
use crate::error::ApiError;
use crate::handlers::{protected, public};
use crate::middleware::require_login;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn NoteStore>,
}

impl AppState {
    pub fn new(store: impl NoteStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Route paths, one per named endpoint
pub mod paths {
    pub const HOME: &str = "/";
    pub const HEALTH: &str = "/health";
    pub const LOGIN: &str = "/auth/login/";
    pub const SIGNUP: &str = "/auth/signup/";
    pub const LOGOUT: &str = "/auth/logout/";
    pub const LIST: &str = "/notes/";
    pub const SUCCESS: &str = "/done/";
    pub const ADD: &str = "/add/";

    pub fn detail(slug: &str) -> String {
        format!("/note/{}/", slug)
    }

    pub fn edit(slug: &str) -> String {
        format!("/edit/{}/", slug)
    }

    pub fn delete(slug: &str) -> String {
        format!("/delete/{}/", slug)
    }
}

pub fn app(state: AppState) -> Router {
    let settings = config::config();

    let router = Router::new()
        .merge(public_routes())
        .merge(note_routes(state.clone()))
        .fallback(not_found)
        .with_state(state);

    let router = if settings.security.enable_cors {
        router.layer(cors_layer(&settings.security.cors_origins))
    } else {
        router
    };

    if settings.server.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn public_routes() -> Router<AppState> {
    use public::{auth, home};

    Router::new()
        .route(paths::HOME, get(home::home))
        .route(paths::HEALTH, get(home::health))
        .route(paths::LOGIN, get(auth::login_get).post(auth::login_post))
        .route(paths::SIGNUP, get(auth::signup_get).post(auth::signup_post))
        .route(paths::LOGOUT, get(auth::logout).post(auth::logout))
}

fn note_routes(state: AppState) -> Router<AppState> {
    use protected::notes;

    Router::new()
        .route(paths::LIST, get(notes::list))
        .route(paths::SUCCESS, get(notes::success))
        .route(paths::ADD, get(notes::add_get).post(notes::add_post))
        .route("/note/:slug/", get(notes::detail))
        .route("/edit/:slug/", get(notes::edit_get).post(notes::edit_post))
        .route("/delete/:slug/", get(notes::delete_get).post(notes::delete_post))
        .route_layer(middleware::from_fn_with_state(state, require_login))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<_> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new().allow_origin(AllowOrigin::list(origins))
}

async fn not_found() -> ApiError {
    ApiError::not_found("Page not found")
}
