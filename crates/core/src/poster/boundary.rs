//! Whole-segment matching of a title against a poster path.

use super::normalize::file_name;

/// Directory segment the poster storage layout files every poster under.
pub const POSTER_DIR_MARKER: &str = "movie posters/";

/// Returns true when `term` appears in `candidate` as a whole path segment
/// or as a whole filename stem, ignoring case.
///
/// This is what keeps "Up" from matching "Up and Away.jpg".
pub fn is_boundary_match(candidate: &str, term: &str) -> bool {
    let path = candidate.to_lowercase();
    let term = term.to_lowercase();
    is_boundary_match_lowered(&path, file_name(&path), &term)
}

/// Same as [`is_boundary_match`] for inputs that are already lowercased.
///
/// `name` must be `file_name(path)`.
pub(crate) fn is_boundary_match_lowered(path: &str, name: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    if is_filename_match_lowered(name, term) {
        return true;
    }

    if path.contains(&format!("/{term}.")) {
        return true;
    }
    if path.contains(&format!("/{term}/")) {
        return true;
    }
    path.contains(&format!("{POSTER_DIR_MARKER}{term}."))
}

/// True when `term` is the whole filename or its stem. Both lowercased.
pub(crate) fn is_filename_match_lowered(name: &str, term: &str) -> bool {
    !term.is_empty()
        && (name == term
            || name
                .strip_prefix(term)
                .is_some_and(|rest| rest.starts_with('.')))
}
