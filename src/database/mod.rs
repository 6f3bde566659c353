pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use memory::MemoryStore;
pub use models::{NewNote, Note, NoteChanges, User};
pub use postgres::PgStore;
pub use store::{NoteStore, StoreError};
