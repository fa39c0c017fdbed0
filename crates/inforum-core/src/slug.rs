//! Slug generation for blog posts.
//!
//! A slug is the cleaned, hyphenated title followed by `-<id>`, e.g.
//! `"Hello, World!"` with id 5 becomes `hello-world-5`. The id suffix keeps
//! slugs unique, so a slug can only be derived once the store has assigned
//! the post its id.

use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").expect("Invalid slug character regex pattern"));
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex pattern"));
static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s").expect("Invalid whitespace regex pattern"));

/// Derive the slug for a post from its title and store-assigned id.
///
/// Never fails: a title with nothing left after cleaning yields `-<id>`.
/// The function is not meant to be applied to its own output, which would
/// append a second id suffix.
pub fn generate_slug(title: &str, id: i64) -> String {
    let lowered = title.to_lowercase();
    let cleaned = DISALLOWED.replace_all(&lowered, "");
    let collapsed = WHITESPACE_RUN.replace_all(&cleaned, " ");
    let hyphenated = WHITESPACE.replace_all(collapsed.trim(), "-");
    let slug = format!("{hyphenated}-{id}");

    tracing::debug!(title, id, slug = %slug, "Slug generated");

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_is_stripped() {
        assert_eq!(generate_slug("Hello, World!", 5), "hello-world-5");
    }

    #[test]
    fn test_blank_title_degenerates_to_id() {
        assert_eq!(generate_slug("   ", 9), "-9");
        assert_eq!(generate_slug("", 1), "-1");
        assert_eq!(generate_slug("?!*", 3), "-3");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(
            generate_slug("  Rust \t is\n\nfast  ", 42),
            "rust-is-fast-42"
        );
    }

    #[test]
    fn test_existing_hyphens_and_digits_kept() {
        assert_eq!(generate_slug("Top-10 Tips for 2024", 7), "top-10-tips-for-2024-7");
    }

    #[test]
    fn test_non_ascii_letters_removed() {
        assert_eq!(generate_slug("Café Crème", 2), "caf-crme-2");
    }

    #[test]
    fn test_chained_generation_appends_again() {
        let once = generate_slug("Hello World", 4);
        assert_eq!(generate_slug(&once, 4), "hello-world-4-4");
    }
}
