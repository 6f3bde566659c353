use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use super::models::{NewNote, Note, NoteChanges, User};
use super::store::{NoteStore, StoreError};
use crate::config::DatabaseConfig;

/// Table definitions applied by `notes-admin migrate` and on server start.
/// Each statement is idempotent.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        username VARCHAR(150) NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        date_joined TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS notes (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(100) NOT NULL,
        text TEXT NOT NULL DEFAULT '',
        slug VARCHAR(100) NOT NULL UNIQUE,
        author_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS notes_author_id_idx ON notes (author_id)",
];

/// PostgreSQL-backed store
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `url` using the configured limits
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Created database pool (max {} connections)", config.max_connections);
        Ok(Self::new(pool))
    }

    /// Create tables and indexes if missing
    pub async fn migrate(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Database schema is up to date");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Translate a unique violation into the matching domain error
fn map_unique(err: sqlx::Error, on_conflict: impl FnOnce() -> StoreError) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => on_conflict(),
        _ => StoreError::Sqlx(err),
    }
}

#[async_trait]
impl NoteStore for PgStore {
    async fn create_user(&self, user: User) -> Result<User, StoreError> {
        let username = user.username.clone();
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, password_hash, date_joined)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password_hash, date_joined
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.date_joined)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, || StoreError::UsernameTaken(username)))
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, date_joined FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, date_joined FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_note(&self, note: NewNote) -> Result<Note, StoreError> {
        let slug = note.slug.clone();
        sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (title, text, slug, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, text, slug, author_id
            "#,
        )
        .bind(&note.title)
        .bind(&note.text)
        .bind(&note.slug)
        .bind(note.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, || StoreError::SlugTaken(slug)))
    }

    async fn find_note_by_slug(&self, slug: &str) -> Result<Option<Note>, StoreError> {
        let note = sqlx::query_as::<_, Note>(
            "SELECT id, title, text, slug, author_id FROM notes WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(note)
    }

    async fn slug_exists(&self, slug: &str, exclude: Option<i64>) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM notes WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn list_notes_by_author(&self, author_id: Uuid) -> Result<Vec<Note>, StoreError> {
        let notes = sqlx::query_as::<_, Note>(
            "SELECT id, title, text, slug, author_id FROM notes WHERE author_id = $1 ORDER BY id",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(notes)
    }

    async fn update_note(&self, id: i64, changes: NoteChanges) -> Result<Note, StoreError> {
        let slug = changes.slug.clone();
        sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes SET title = $2, text = $3, slug = $4
            WHERE id = $1
            RETURNING id, title, text, slug, author_id
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.text)
        .bind(&changes.slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique(e, || StoreError::SlugTaken(slug)))?
        .ok_or_else(|| StoreError::NotFound(format!("note {}", id)))
    }

    async fn delete_note(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("note {}", id)));
        }
        Ok(())
    }

    async fn count_notes(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
