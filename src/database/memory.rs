use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{NewNote, Note, NoteChanges, User};
use super::store::{NoteStore, StoreError};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    // Keyed by id so iteration follows insertion order
    notes: BTreeMap<i64, Note>,
    next_note_id: i64,
}

/// In-process store used when no `DATABASE_URL` is configured and by the test suite.
///
/// Every write takes the single write lock, so uniqueness checks and the insert or update
/// they guard happen atomically.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create_user(&self, user: User) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::UsernameTaken(user.username));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn create_note(&self, note: NewNote) -> Result<Note, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&note.author_id) {
            return Err(StoreError::NotFound(format!("user {}", note.author_id)));
        }
        if tables.notes.values().any(|n| n.slug == note.slug) {
            return Err(StoreError::SlugTaken(note.slug));
        }

        tables.next_note_id += 1;
        let created = Note {
            id: tables.next_note_id,
            title: note.title,
            text: note.text,
            slug: note.slug,
            author_id: note.author_id,
        };
        tables.notes.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_note_by_slug(&self, slug: &str) -> Result<Option<Note>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.notes.values().find(|n| n.slug == slug).cloned())
    }

    async fn slug_exists(&self, slug: &str, exclude: Option<i64>) -> Result<bool, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .notes
            .values()
            .any(|n| n.slug == slug && Some(n.id) != exclude))
    }

    async fn list_notes_by_author(&self, author_id: Uuid) -> Result<Vec<Note>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .notes
            .values()
            .filter(|n| n.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn update_note(&self, id: i64, changes: NoteChanges) -> Result<Note, StoreError> {
        let mut tables = self.tables.write().await;
        if tables
            .notes
            .values()
            .any(|n| n.slug == changes.slug && n.id != id)
        {
            return Err(StoreError::SlugTaken(changes.slug));
        }

        let note = tables
            .notes
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("note {}", id)))?;
        note.title = changes.title;
        note.text = changes.text;
        note.slug = changes.slug;
        Ok(note.clone())
    }

    async fn delete_note(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables
            .notes
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("note {}", id)))
    }

    async fn count_notes(&self) -> Result<i64, StoreError> {
        Ok(self.tables.read().await.notes.len() as i64)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::UNUSABLE_PASSWORD;

    fn new_note(slug: &str, author_id: Uuid) -> NewNote {
        NewNote {
            title: "Note title".to_string(),
            text: "Note text".to_string(),
            slug: slug.to_string(),
            author_id,
        }
    }

    #[tokio::test]
    async fn assigns_increasing_ids() {
        let store = MemoryStore::new();
        let author = store.create_user(User::new("Author", UNUSABLE_PASSWORD)).await.unwrap();

        let first = store.create_note(new_note("first", author.id)).await.unwrap();
        let second = store.create_note(new_note("second", author.id)).await.unwrap();
        assert!(second.id > first.id);
        assert_eq!(store.count_notes().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn rejects_duplicate_slug_across_authors() {
        let store = MemoryStore::new();
        let author = store.create_user(User::new("Author", UNUSABLE_PASSWORD)).await.unwrap();
        let other = store.create_user(User::new("Not Author", UNUSABLE_PASSWORD)).await.unwrap();

        store.create_note(new_note("note-slug", author.id)).await.unwrap();
        let err = store.create_note(new_note("note-slug", other.id)).await.unwrap_err();
        assert!(matches!(err, StoreError::SlugTaken(slug) if slug == "note-slug"));
        assert_eq!(store.count_notes().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn slug_comparison_is_case_sensitive() {
        let store = MemoryStore::new();
        let author = store.create_user(User::new("Author", UNUSABLE_PASSWORD)).await.unwrap();
        store.create_note(new_note("note-slug", author.id)).await.unwrap();

        assert!(store.create_note(new_note("Note-Slug", author.id)).await.is_ok());
    }

    #[tokio::test]
    async fn update_may_keep_its_own_slug() {
        let store = MemoryStore::new();
        let author = store.create_user(User::new("Author", UNUSABLE_PASSWORD)).await.unwrap();
        let note = store.create_note(new_note("note-slug", author.id)).await.unwrap();

        let updated = store
            .update_note(
                note.id,
                NoteChanges {
                    title: "New title".to_string(),
                    text: String::new(),
                    slug: "note-slug".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "New title");
        assert!(!store.slug_exists("note-slug", Some(note.id)).await.unwrap());
        assert!(store.slug_exists("note-slug", None).await.unwrap());
    }

    #[tokio::test]
    async fn lists_only_the_authors_notes() {
        let store = MemoryStore::new();
        let author = store.create_user(User::new("Author", UNUSABLE_PASSWORD)).await.unwrap();
        let other = store.create_user(User::new("Not Author", UNUSABLE_PASSWORD)).await.unwrap();
        store.create_note(new_note("a", author.id)).await.unwrap();
        store.create_note(new_note("b", other.id)).await.unwrap();
        store.create_note(new_note("c", author.id)).await.unwrap();

        let slugs: Vec<String> = store
            .list_notes_by_author(author.id)
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.slug)
            .collect();
        assert_eq!(slugs, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn rejects_duplicate_username() {
        let store = MemoryStore::new();
        store.create_user(User::new("Author", UNUSABLE_PASSWORD)).await.unwrap();
        let err = store.create_user(User::new("Author", UNUSABLE_PASSWORD)).await.unwrap_err();
        assert!(matches!(err, StoreError::UsernameTaken(_)));
    }

    #[tokio::test]
    async fn delete_missing_note_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(store.delete_note(42).await, Err(StoreError::NotFound(_))));
    }
}
