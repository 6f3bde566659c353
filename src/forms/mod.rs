//! Submitted forms and their validation.
//!
//! Each form deserializes from an urlencoded body, validates into a typed value, and can
//! describe itself as a [`FormContext`] for rendering, with field-keyed error messages when
//! validation failed.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use crate::database::StoreError;

pub mod note;
pub mod user;

pub use note::{NoteForm, WARNING};
pub use user::{LoginForm, SignupForm};

/// Key for errors that belong to the form as a whole rather than one field
pub const NON_FIELD_ERRORS: &str = "__all__";

pub const REQUIRED: &str = "This field is required.";

/// Field name → first error message for that field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(HashMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error; the first error reported for a field wins
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), FormError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(FormError::Invalid(self))
        }
    }
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("submitted form is invalid")]
    Invalid(FieldErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl FormError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        FormError::Invalid(errors)
    }
}

/// What a page needs to render a form: current values and any errors
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormContext {
    pub fields: BTreeMap<String, String>,
    pub errors: FieldErrors,
}

impl FormContext {
    pub fn new<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            errors: FieldErrors::new(),
        }
    }

    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = errors;
        self
    }
}

/// Reject values longer than `max` characters
pub(crate) fn check_max_length(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
    let length = value.chars().count();
    if length > max {
        errors.add(
            field,
            format!(
                "Ensure this value has at most {} characters (it has {}).",
                max, length
            ),
        );
    }
}
