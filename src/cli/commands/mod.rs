pub mod migrate;
pub mod notes;
pub mod user;
