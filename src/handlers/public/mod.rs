// handlers/public/mod.rs - Public handlers (no session required)
//
// Home page, health probe and the account pages used to obtain a session.
pub mod auth;
pub mod home;
