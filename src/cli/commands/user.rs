use serde_json::json;

use crate::auth::hash_password;
use crate::cli::OutputFormat;
use crate::database::models::UNUSABLE_PASSWORD;
use crate::database::{NoteStore, PgStore, User};
use crate::forms::user::{validate_password, validate_username};
use crate::forms::FieldErrors;

/// Create an account with the same rules the signup form applies
pub async fn create(
    store: &PgStore,
    username: &str,
    password: Option<&str>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let username = username.trim();
    let mut errors = FieldErrors::new();
    validate_username(&mut errors, username);
    if let Some(password) = password {
        validate_password(&mut errors, "password", password);
    }
    if !errors.is_empty() {
        anyhow::bail!("invalid account: {}", serde_json::to_string(&errors)?);
    }

    let password_hash = match password {
        Some(password) => hash_password(password).map_err(anyhow::Error::msg)?,
        None => UNUSABLE_PASSWORD.to_string(),
    };

    let user = store.create_user(User::new(username, password_hash)).await?;

    match output_format {
        OutputFormat::Json => println!(
            "{}",
            json!({ "id": user.id, "username": user.username, "date_joined": user.date_joined })
        ),
        OutputFormat::Text => println!("Created user '{}' ({})", user.username, user.id),
    }
    Ok(())
}
