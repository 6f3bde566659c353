use serde::Deserialize;

use super::{check_max_length, FieldErrors, FormContext, FormError, REQUIRED};
use crate::database::models::{Note, NoteChanges, MAX_SLUG_LENGTH, MAX_TITLE_LENGTH};
use crate::database::NoteStore;
use crate::slug::{is_valid_slug, slugify};

/// Appended to a slug that is already taken to form the `slug` field error
pub const WARNING: &str = " - such a slug already exists, choose a unique value!";

const INVALID_SLUG: &str =
    "Enter a valid \"slug\" consisting of letters, numbers, underscores or hyphens.";
const UNDERIVABLE_SLUG: &str = "Could not build a slug from the title, enter one manually.";

/// Create/edit form for a note.
///
/// Anything else in the submission (an `author` field, for instance) is ignored: the author
/// always comes from the session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub slug: String,
}

impl NoteForm {
    /// Prefill from an existing note (edit page)
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            text: note.text.clone(),
            slug: note.slug.clone(),
        }
    }

    pub fn context(&self) -> FormContext {
        FormContext::new([
            ("title", self.title.as_str()),
            ("text", self.text.as_str()),
            ("slug", self.slug.as_str()),
        ])
    }

    /// Validate the submission.
    ///
    /// `instance` is the note being edited, if any; its own slug does not count as taken.
    /// A blank slug is derived from the title. The uniqueness check runs last, after the
    /// field checks, and applies to derived slugs as well.
    pub async fn clean(
        &self,
        store: &dyn NoteStore,
        instance: Option<&Note>,
    ) -> Result<NoteChanges, FormError> {
        let title = self.title.trim();
        let text = self.text.trim();
        let submitted_slug = self.slug.trim();
        let mut errors = FieldErrors::new();

        if title.is_empty() {
            errors.add("title", REQUIRED);
        } else {
            check_max_length(&mut errors, "title", title, MAX_TITLE_LENGTH);
        }

        let slug = if submitted_slug.is_empty() {
            if errors.has("title") {
                None
            } else {
                let derived = slugify(title);
                if derived.is_empty() {
                    errors.add("slug", UNDERIVABLE_SLUG);
                    None
                } else {
                    Some(derived)
                }
            }
        } else {
            check_max_length(&mut errors, "slug", submitted_slug, MAX_SLUG_LENGTH);
            if !is_valid_slug(submitted_slug) {
                errors.add("slug", INVALID_SLUG);
            }
            (!errors.has("slug")).then(|| submitted_slug.to_string())
        };

        if let Some(slug) = &slug {
            if store.slug_exists(slug, instance.map(|n| n.id)).await? {
                errors.add("slug", format!("{}{}", slug, WARNING));
            }
        }

        errors.into_result()?;

        Ok(NoteChanges {
            title: title.to_string(),
            text: text.to_string(),
            // Present whenever no slug error was recorded
            slug: slug.unwrap_or_default(),
        })
    }
}
