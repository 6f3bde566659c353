// handlers/protected/mod.rs - Protected handlers (session required)
//
// Every route here sits behind middleware::require_login, which injects the AuthUser
// extension. Object routes additionally go through services::notes::owned_note.
pub mod notes;
