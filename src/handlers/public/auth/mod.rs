// handlers/public/auth/mod.rs - Account pages
//
// Login issues the session cookie, logout clears it, signup creates the account.
pub mod login;
pub mod logout;
pub mod signup;

pub use login::{login_get, login_post};
pub use logout::logout;
pub use signup::{signup_get, signup_post};
