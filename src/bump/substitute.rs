//! Literal template substitution.

use crate::registry::Location;

/// Result of substituting one location in a file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Text of the location rendered with the old version.
    pub old_text: String,
    /// Text of the location rendered with the new version.
    pub new_text: String,
    /// New file content.
    pub content: String,
    /// Number of occurrences of `old_text` that were replaced.
    pub matches: usize,
}

/// Replaces every occurrence of `location` rendered with `old` by the same
/// template rendered with `new`.
///
/// Unrelated text that happens to contain the rendered old template is
/// replaced as well; callers that need exactly one hit check `matches`.
pub fn replace_version(content: &str, location: &Location, old: &str, new: &str) -> Substitution {
    let old_text = location.render(old);
    let new_text = location.render(new);
    let matches = content.matches(old_text.as_str()).count();

    let content = if matches == 0 {
        content.to_string()
    } else {
        content.replace(&old_text, &new_text)
    };

    Substitution {
        old_text,
        new_text,
        content,
        matches,
    }
}
