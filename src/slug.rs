//! Slug derivation and validation for notes.
//!
//! A slug is the URL-safe key a note is addressed by. Users may type one; when they leave
//! it blank it is derived from the title by transliterating to ASCII and hyphenating.

use crate::database::models::MAX_SLUG_LENGTH;

/// Derive a slug from free text: transliterate to ASCII, lowercase, collapse every run of
/// other characters into a single `-`, cut to [`MAX_SLUG_LENGTH`].
///
/// Returns an empty string when nothing slug-worthy is left (for example a title made of
/// punctuation only).
pub fn slugify(title: &str) -> String {
    let slug = ::slug::slugify(title);
    truncate(&slug, MAX_SLUG_LENGTH)
}

/// True for non-empty strings made of ASCII letters, digits, `-` and `_`
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

fn truncate(slug: &str, max: usize) -> String {
    if slug.len() <= max {
        return slug.to_string();
    }
    // Slugs are ASCII, so byte slicing is on a char boundary
    slug[..max].trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugifies_plain_title() {
        assert_eq!(slugify("Note title"), "note-title");
        assert_eq!(slugify("New note title"), "new-note-title");
    }

    #[test]
    fn collapses_punctuation_and_whitespace() {
        assert_eq!(slugify("  Hello,   World!  "), "hello-world");
        assert_eq!(slugify("a -- b"), "a-b");
    }

    #[test]
    fn transliterates_non_latin_titles() {
        assert_eq!(slugify("Заметка"), "zametka");
        assert_eq!(slugify("Crème brûlée"), "creme-brulee");
    }

    #[test]
    fn punctuation_only_title_gives_empty_slug() {
        assert_eq!(slugify("!!! ???"), "");
    }

    #[test]
    fn long_titles_are_cut_without_trailing_hyphen() {
        let title = "word ".repeat(40);
        let slug = slugify(&title);
        assert!(slug.len() <= MAX_SLUG_LENGTH);
        assert!(!slug.ends_with('-'));
        assert!(slug.starts_with("word-word"));
    }

    #[test]
    fn validates_slug_syntax() {
        assert!(is_valid_slug("note-slug"));
        assert!(is_valid_slug("Note_Slug_2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("with space"));
        assert!(!is_valid_slug("заметка"));
        assert!(!is_valid_slug("a/b"));
    }
}
