#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE, LOCATION};
use reqwest::redirect::Policy;
use reqwest::{Client, Response, StatusCode};
use tokio::task::JoinHandle;

use notes_service::auth::{generate_jwt, Claims};
use notes_service::config;
use notes_service::database::models::UNUSABLE_PASSWORD;
use notes_service::database::{MemoryStore, NewNote, Note, NoteStore, User};
use notes_service::{app, AppState};

/// The router served on a free local port, backed by its own empty in-memory store.
/// Each test gets a fresh server, so tests never see each other's rows.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: MemoryStore,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let store = MemoryStore::new();
        let router = app(AppState::new(store.clone()));
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let server = Self {
            port,
            base_url,
            store,
            handle,
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn create_user(&self, username: &str) -> Result<User> {
        Ok(self.store.create_user(User::new(username, UNUSABLE_PASSWORD)).await?)
    }

    pub async fn create_note(&self, author: &User, title: &str, text: &str, slug: &str) -> Result<Note> {
        Ok(self
            .store
            .create_note(NewNote {
                title: title.to_string(),
                text: text.to_string(),
                slug: slug.to_string(),
                author_id: author.id,
            })
            .await?)
    }

    pub async fn note_count(&self) -> Result<i64> {
        Ok(self.store.count_notes().await?)
    }

    /// Client without a session. Redirects are returned, not followed.
    pub fn anonymous(&self) -> Result<Client> {
        Ok(Client::builder().redirect(Policy::none()).build()?)
    }

    /// Client already logged in as `user`, like a forced login
    pub fn client_for(&self, user: &User) -> Result<Client> {
        let token = generate_jwt(&Claims::for_user(user))?;
        let cookie = format!("{}={}", config::config().security.session_cookie_name, token);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(&cookie)?);
        Ok(Client::builder()
            .redirect(Policy::none())
            .default_headers(headers)
            .build()?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Two users and one note written by the first, mirroring the usual page fixtures
pub struct Fixture {
    pub server: TestServer,
    pub author: User,
    pub not_author: User,
    pub note: Note,
}

pub async fn fixture() -> Result<Fixture> {
    let server = TestServer::spawn().await?;
    let author = server.create_user("Author").await?;
    let not_author = server.create_user("Not Author").await?;
    let note = server
        .create_note(&author, "Note title", "Note text", "note-slug")
        .await?;
    Ok(Fixture {
        server,
        author,
        not_author,
        note,
    })
}

/// Assert a 302 to `expected` and nothing else
pub fn assert_redirects(response: &Response, expected: &str) {
    assert_eq!(
        response.status(),
        StatusCode::FOUND,
        "expected redirect to {} from {}",
        expected,
        response.url()
    );
    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, expected);
}

pub fn login_redirect(path: &str) -> String {
    format!("/auth/login/?next={}", path)
}
