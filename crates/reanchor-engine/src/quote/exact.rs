use crate::matching::{Match, search_chars};

/// Every verbatim occurrence of `pattern`, overlapping ones included.
pub fn exact_occurrences(text: &[char], pattern: &[char]) -> Vec<Match> {
    if pattern.is_empty() || pattern.len() > text.len() {
        return Vec::new();
    }
    text.windows(pattern.len())
        .enumerate()
        .filter(|(_, window)| *window == pattern)
        .map(|(start, _)| Match {
            start,
            end: start + pattern.len(),
            errors: 0,
        })
        .collect()
}

/// Verbatim occurrences if there are any, otherwise the cheapest approximate
/// ones within `max_errors`.
pub fn find_candidates(text: &[char], pattern: &[char], max_errors: usize) -> Vec<Match> {
    let exact = exact_occurrences(text, pattern);
    if !exact.is_empty() {
        log::debug!("quote search: {} verbatim occurrences", exact.len());
        return exact;
    }
    search_chars(text, pattern, max_errors)
}

/// Similarity in `[0, 1]` of the best match of `pattern` anywhere in `text`:
/// `1 - errors / pattern.len()`. Empty input on either side scores 0.
pub fn text_match_score(text: &[char], pattern: &[char]) -> f64 {
    if pattern.is_empty() || text.is_empty() {
        return 0.0;
    }
    // With a budget of the whole pattern every end position qualifies, so
    // there is always at least one match.
    find_candidates(text, pattern, pattern.len())
        .first()
        .map_or(0.0, |m| 1.0 - m.errors as f64 / pattern.len() as f64)
}
