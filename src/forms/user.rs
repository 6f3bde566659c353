use serde::Deserialize;

use super::{check_max_length, FieldErrors, FormContext, FormError, NON_FIELD_ERRORS, REQUIRED};
use crate::auth::{hash_password, verify_password};
use crate::database::{NoteStore, StoreError, User};

pub const MAX_USERNAME_LENGTH: usize = 150;
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub const INVALID_LOGIN: &str = "Please enter a correct username and password.";
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";
pub const PASSWORD_MISMATCH: &str = "The two password fields didn't match.";
const INVALID_USERNAME: &str =
    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub next: Option<String>,
}

impl LoginForm {
    /// The password is never sent back
    pub fn context(&self) -> FormContext {
        FormContext::new([("username", self.username.as_str()), ("password", "")])
    }

    /// Authenticate against the store. Unknown user and wrong password produce the same error.
    pub async fn clean(&self, store: &dyn NoteStore) -> Result<User, FormError> {
        let username = self.username.trim();
        let mut errors = FieldErrors::new();
        if username.is_empty() {
            errors.add("username", REQUIRED);
        }
        if self.password.is_empty() {
            errors.add("password", REQUIRED);
        }
        errors.into_result()?;

        match store.find_user_by_username(username).await? {
            Some(user) if verify_password(&self.password, &user.password_hash) => Ok(user),
            _ => Err(FormError::field(NON_FIELD_ERRORS, INVALID_LOGIN)),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

impl SignupForm {
    pub fn context(&self) -> FormContext {
        FormContext::new([
            ("username", self.username.as_str()),
            ("password1", ""),
            ("password2", ""),
        ])
    }

    /// Validate and build the account to insert, password already hashed
    pub async fn clean(&self, store: &dyn NoteStore) -> Result<User, FormError> {
        let username = self.username.trim();
        let mut errors = FieldErrors::new();

        validate_username(&mut errors, username);
        if !errors.has("username") && store.find_user_by_username(username).await?.is_some() {
            errors.add("username", USERNAME_TAKEN);
        }

        validate_password(&mut errors, "password1", &self.password1);
        if self.password2.is_empty() {
            errors.add("password2", REQUIRED);
        } else if !errors.has("password1") && self.password1 != self.password2 {
            errors.add("password2", PASSWORD_MISMATCH);
        }

        errors.into_result()?;

        let password_hash = hash_password(&self.password1).map_err(|e| {
            tracing::error!("{}", e);
            FormError::field("password1", "This password could not be stored.")
        })?;
        Ok(User::new(username, password_hash))
    }
}

/// Field-level errors for a signup attempt that lost a race on the username
pub fn username_taken(err: StoreError) -> FormError {
    match err {
        StoreError::UsernameTaken(_) => FormError::field("username", USERNAME_TAKEN),
        other => FormError::Store(other),
    }
}

pub fn validate_username(errors: &mut FieldErrors, username: &str) {
    if username.is_empty() {
        errors.add("username", REQUIRED);
        return;
    }
    check_max_length(errors, "username", username, MAX_USERNAME_LENGTH);
    if !username
        .chars()
        .all(|ch| ch.is_alphanumeric() || matches!(ch, '@' | '.' | '+' | '-' | '_'))
    {
        errors.add("username", INVALID_USERNAME);
    }
}

pub fn validate_password(errors: &mut FieldErrors, field: &str, password: &str) {
    if password.is_empty() {
        errors.add(field, REQUIRED);
        return;
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.add(
            field,
            format!(
                "This password is too short. It must contain at least {} characters.",
                MIN_PASSWORD_LENGTH
            ),
        );
    }
    if password.chars().all(|ch| ch.is_ascii_digit()) {
        errors.add(field, "This password is entirely numeric.");
    }
}
