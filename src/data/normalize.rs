//! Text normalisation shared by the vocabulary and document loaders.

/// Collapse whitespace runs to single spaces, trim, and lower-case.
///
/// Matching is case-sensitive and offset-based, so terms and documents must go
/// through the same normalisation before they meet.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whether a normalised term is long enough to be searched for.
pub fn meets_min_length(term: &str, min_length: usize) -> bool {
    term.chars().count() >= min_length
}
