use super::myers::find_match_ends;
use super::{Match, MatchEnd};

/// Recover start offsets for matches found by [`find_match_ends`].
///
/// For each end, the reversed pattern is searched in the reversed window
/// `[end - pattern.len() - errors, end)`. When several starts are possible
/// the one giving the longest match (smallest start) is chosen.
pub fn find_match_starts(text: &[char], pattern: &[char], ends: &[MatchEnd]) -> Vec<Match> {
    let pattern_rev: Vec<char> = pattern.iter().rev().copied().collect();
    ends.iter()
        .filter(|m| m.end <= text.len())
        .map(|m| {
            let min_start = m.end.saturating_sub(pattern.len() + m.errors);
            let text_rev: Vec<char> = text[min_start..m.end].iter().rev().copied().collect();
            let start = find_match_ends(&text_rev, &pattern_rev, m.errors)
                .iter()
                .map(|rm| m.end - rm.end)
                .min()
                .unwrap_or(m.end);
            Match {
                start,
                end: m.end,
                errors: m.errors,
            }
        })
        .collect()
}

/// Every lowest-cost approximate occurrence of `pattern` in `text`, as
/// character offsets.
pub fn search_chars(text: &[char], pattern: &[char], max_errors: usize) -> Vec<Match> {
    let ends = find_match_ends(text, pattern, max_errors);
    find_match_starts(text, pattern, &ends)
}

/// String entry point for [`search_chars`]. Offsets in the result count
/// `char`s, not bytes.
///
/// ```
/// use reanchor_engine::search;
///
/// let matches = search("the quick broun fox", "brown", 1);
/// assert_eq!(matches.len(), 1);
/// assert_eq!((matches[0].start, matches[0].end, matches[0].errors), (10, 15, 1));
/// ```
pub fn search(text: &str, pattern: &str, max_errors: usize) -> Vec<Match> {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let matches = search_chars(&text, &pattern, max_errors);
    log::debug!(
        "approximate search: {} matches (pattern {} chars, budget {max_errors})",
        matches.len(),
        pattern.len()
    );
    matches
}
