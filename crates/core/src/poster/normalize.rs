//! String helpers shared by the matching tiers.
//!
//! All matching is case-insensitive: callers lowercase both the title and
//! the candidate before comparing. These helpers never change casing on
//! their own so the original text stays available for display.

/// Trim surrounding whitespace from a title.
pub fn normalize(s: &str) -> &str {
    s.trim()
}

/// The last path segment (everything after the final `/`).
///
/// Returns the whole input when it contains no `/`.
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Copy of `s` keeping only letters, digits and whitespace.
pub fn strip_non_alnum_whitespace(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Split a cleaned title into fallback tokens.
///
/// Separators are space, hyphen, colon, underscore, period and comma.
/// Tokens shorter than `min_len` characters are dropped; the rest are
/// ordered longest first, keeping title order between equal lengths.
pub fn fallback_tokens(cleaned: &str, min_len: usize) -> Vec<String> {
    let mut tokens: Vec<String> = cleaned
        .split(|c: char| matches!(c, ' ' | '-' | ':' | '_' | '.' | ','))
        .filter(|t| t.chars().count() >= min_len)
        .map(|t| t.to_lowercase())
        .collect();
    tokens.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    tokens
}
