pub mod auth;
pub mod response;

pub use auth::{authenticate, require_login, AuthUser};
pub use response::{found, Page};
