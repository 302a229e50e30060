//! # Approximate string matching
//!
//! Bounded edit-distance search over long texts, knowing nothing about
//! documents or trees.
//!
//! - [`find_match_ends`] runs the bit-parallel scan and reports where the
//!   cheapest matches end.
//! - [`find_match_starts`] recovers where each of them starts by scanning
//!   backwards with the reversed pattern.
//! - [`search`] / [`search_chars`] compose the two.
//!
//! All buffers live for one call only, so searches over different texts can
//! run in parallel without any locking.

pub mod myers;
pub mod search;

use serde::Serialize;

pub use myers::find_match_ends;
pub use search::{find_match_starts, search, search_chars};

/// End of an approximate match, before its start has been recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchEnd {
    /// Exclusive end offset in the text.
    pub end: usize,
    /// Edit distance between the pattern and the matched span.
    pub errors: usize,
}

/// A span `[start, end)` of the text plus its edit-distance cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Match {
    pub start: usize,
    pub end: usize,
    pub errors: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    /// Sellers' O(n*m) dynamic program: the cost of the best match of
    /// `pattern` ending at each text offset `1..=text.len()`.
    fn naive_end_costs(text: &[char], pattern: &[char]) -> Vec<usize> {
        let mut column: Vec<usize> = (0..=pattern.len()).collect();
        let mut costs = Vec::with_capacity(text.len());
        for &t in text {
            let mut diag = column[0];
            column[0] = 0;
            for i in 1..=pattern.len() {
                let above = column[i];
                let substitution = diag + usize::from(pattern[i - 1] != t);
                column[i] = substitution.min(above + 1).min(column[i - 1] + 1);
                diag = above;
            }
            costs.push(column[pattern.len()]);
        }
        costs
    }

    fn naive_ends(text: &[char], pattern: &[char], max_errors: usize) -> Vec<MatchEnd> {
        if pattern.is_empty() {
            return Vec::new();
        }
        let costs = naive_end_costs(text, pattern);
        let Some(&best) = costs.iter().min() else {
            return Vec::new();
        };
        if best > max_errors.min(pattern.len()) {
            return Vec::new();
        }
        costs
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == best)
            .map(|(j, &c)| MatchEnd {
                end: j + 1,
                errors: c,
            })
            .collect()
    }

    /// Small deterministic generator so failures reproduce.
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self) -> u64 {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            self.0 >> 33
        }

        fn string(&mut self, len: usize, alphabet: &[char]) -> Vec<char> {
            (0..len)
                .map(|_| alphabet[self.next() as usize % alphabet.len()])
                .collect()
        }
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn agrees_with_naive_dynamic_program() {
        let alphabet = chars("abcd");
        let mut rng = Lcg(42);
        for _ in 0..300 {
            let text_len = 20 + rng.next() as usize % 60;
            let text = rng.string(text_len, &alphabet);
            let pattern_len = 1 + rng.next() as usize % 12;
            let pattern = rng.string(pattern_len, &alphabet);
            let max_errors = rng.next() as usize % 5;
            assert_eq!(
                find_match_ends(&text, &pattern, max_errors),
                naive_ends(&text, &pattern, max_errors),
                "text {:?} pattern {:?} k {max_errors}",
                text.iter().collect::<String>(),
                pattern.iter().collect::<String>(),
            );
        }
    }

    #[test]
    fn agrees_with_naive_dynamic_program_across_blocks() {
        let alphabet = chars("abcdefgh");
        let mut rng = Lcg(7);
        for _ in 0..40 {
            let pattern_len = 33 + rng.next() as usize % 70;
            let pattern = rng.string(pattern_len, &alphabet);
            // Plant a mutated copy of the pattern so cheap matches exist.
            let mut planted = pattern.clone();
            for _ in 0..3 {
                let at = rng.next() as usize % planted.len();
                planted[at] = alphabet[rng.next() as usize % alphabet.len()];
            }
            let mut text = rng.string(40, &alphabet);
            text.extend(&planted);
            text.extend(rng.string(40, &alphabet));

            let max_errors = 3 + rng.next() as usize % 20;
            assert_eq!(
                find_match_ends(&text, &pattern, max_errors),
                naive_ends(&text, &pattern, max_errors),
                "pattern len {} k {max_errors}",
                pattern.len()
            );
        }
    }

    #[rstest]
    #[case("The quick brown fox jumps over the lazy dog", "brown fox")]
    #[case("abababab", "aba")]
    #[case("aaaa", "a")]
    #[case("mississippi", "issi")]
    fn exact_substrings_are_found_everywhere(#[case] text: &str, #[case] pattern: &str) {
        let expected: Vec<Match> = (0..text.len())
            .filter(|&i| text[i..].starts_with(pattern))
            .map(|i| Match {
                start: i,
                end: i + pattern.len(),
                errors: 0,
            })
            .collect();
        assert_eq!(search(text, pattern, 0), expected);
    }

    #[test]
    fn single_substitution_needs_one_error() {
        let text = "The quick broun fox jumps over the lazy dog";
        assert!(search(text, "brown fox", 0).is_empty());
        assert_eq!(
            search(text, "brown fox", 1),
            vec![Match {
                start: 10,
                end: 19,
                errors: 1
            }]
        );
    }

    #[test]
    fn larger_budgets_keep_cheaper_matches() {
        let alphabet = chars("abc");
        let mut rng = Lcg(99);
        for _ in 0..100 {
            let text = rng.string(50, &alphabet);
            let pattern = rng.string(6, &alphabet);
            for k in 0..pattern.len() {
                let smaller = search_chars(&text, &pattern, k);
                let larger = search_chars(&text, &pattern, k + 1);
                for m in &smaller {
                    assert!(larger.contains(m), "{m:?} lost when budget grew to {}", k + 1);
                }
            }
        }
    }

    #[test]
    fn starts_prefer_the_longest_span() {
        // The exact match makes every one-error candidate irrelevant.
        let matches = search("xabc", "abc", 1);
        assert_eq!(
            matches,
            vec![Match {
                start: 1,
                end: 4,
                errors: 0
            }]
        );

        // "xbc" vs "abc": the substitution span (1..4) beats the shorter
        // deletion span (2..4) at equal cost.
        let matches = search("yxbc", "abc", 1);
        assert_eq!(
            matches,
            vec![Match {
                start: 1,
                end: 4,
                errors: 1
            }]
        );
    }

    #[test]
    fn budget_at_pattern_length_matches_everywhere() {
        // Every end costs at most pattern.len(); the cheapest still win.
        let matches = search("zzzz", "ab", 2);
        assert_eq!(matches.len(), 4);
        assert!(matches.iter().all(|m| m.errors == 2));
    }
}
