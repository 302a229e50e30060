use serde::{Deserialize, Serialize};

use super::exact::{find_candidates, text_match_score};
use crate::matching::Match;

/// Optional context recorded alongside a quote.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuoteContext<'a> {
    /// Text expected immediately before the quote.
    pub prefix: Option<&'a str>,
    /// Text expected immediately after the quote.
    pub suffix: Option<&'a str>,
    /// Expected start offset of the quote.
    pub hint: Option<usize>,
}

/// Relative weights of the sub-scores combined into a candidate's score.
///
/// Weights must be finite and non-negative with a positive sum, otherwise the
/// normalized score would leave `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub quote: f64,
    pub prefix: f64,
    pub suffix: f64,
    /// Proximity to the hint. Small, so it mostly breaks ties.
    pub position: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            quote: 50.0,
            prefix: 20.0,
            suffix: 20.0,
            position: 2.0,
        }
    }
}

impl ScoreWeights {
    fn total(&self) -> f64 {
        self.quote + self.prefix + self.suffix + self.position
    }

    /// Why these weights cannot produce a normalized score, if they can't.
    pub fn validate(&self) -> Result<(), &'static str> {
        let all = [self.quote, self.prefix, self.suffix, self.position];
        if all.iter().any(|w| !w.is_finite()) {
            return Err("weights must be finite");
        }
        if all.iter().any(|&w| w < 0.0) {
            return Err("weights must not be negative");
        }
        if self.total() <= 0.0 {
            return Err("weights must not all be zero");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteOptions {
    /// Ceiling on the approximate-search budget. The budget actually used is
    /// `min(max_errors, quote.len() / 2)`.
    pub max_errors: usize,
    pub weights: ScoreWeights,
}

impl Default for QuoteOptions {
    fn default() -> Self {
        Self {
            max_errors: 256,
            weights: ScoreWeights::default(),
        }
    }
}

/// The chosen location of a quote, with a normalized quality in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredMatch {
    pub start: usize,
    pub end: usize,
    pub score: f64,
}

/// Find the best match for `quote` in `text` with the default options.
///
/// ```
/// use reanchor_engine::{match_quote, QuoteContext};
///
/// let text = "The quick brown fox jumps over the lazy dog";
/// let context = QuoteContext { prefix: Some("quick "), suffix: Some(" jumps"), hint: None };
/// let found = match_quote(text, "brown fox", &context).unwrap();
/// assert_eq!((found.start, found.end, found.score), (10, 19, 1.0));
/// ```
pub fn match_quote(text: &str, quote: &str, context: &QuoteContext<'_>) -> Option<ScoredMatch> {
    match_quote_with(text, quote, context, &QuoteOptions::default())
}

/// Find the best match for `quote` in `text`, or `None` when there is no
/// candidate within the error budget. Offsets count `char`s.
///
/// Equal scores are broken in favour of the smallest start offset.
pub fn match_quote_with(
    text: &str,
    quote: &str,
    context: &QuoteContext<'_>,
    options: &QuoteOptions,
) -> Option<ScoredMatch> {
    let quote: Vec<char> = quote.chars().collect();
    if quote.is_empty() {
        return None;
    }
    let text: Vec<char> = text.chars().collect();
    let prefix: Vec<char> = context.prefix.unwrap_or_default().chars().collect();
    let suffix: Vec<char> = context.suffix.unwrap_or_default().chars().collect();

    let max_errors = options.max_errors.min(quote.len() / 2);
    let candidates = find_candidates(&text, &quote, max_errors);
    if candidates.is_empty() {
        log::debug!("quote not found within {max_errors} errors");
        return None;
    }

    let weights = match options.weights.validate() {
        Ok(()) => options.weights,
        Err(reason) => {
            log::debug!("ignoring score weights ({reason}), using defaults");
            ScoreWeights::default()
        }
    };

    let score_candidate = |m: &Match| -> f64 {
        let quote_score = 1.0 - m.errors as f64 / quote.len() as f64;

        let prefix_score = if prefix.is_empty() {
            1.0
        } else {
            let from = m.start.saturating_sub(prefix.len());
            text_match_score(&text[from..m.start], &prefix)
        };

        let suffix_score = if suffix.is_empty() {
            1.0
        } else {
            let to = (m.end + suffix.len()).min(text.len());
            text_match_score(&text[m.end..to], &suffix)
        };

        let position_score = match context.hint {
            Some(hint) => {
                let distance = m.start.abs_diff(hint) as f64;
                (1.0 - distance / text.len() as f64).max(0.0)
            }
            None => 1.0,
        };

        let w = &weights;
        let raw = w.quote * quote_score
            + w.prefix * prefix_score
            + w.suffix * suffix_score
            + w.position * position_score;
        raw / w.total()
    };

    let best = candidates
        .iter()
        .map(|m| ScoredMatch {
            start: m.start,
            end: m.end,
            score: score_candidate(m),
        })
        .max_by(|a, b| a.score.total_cmp(&b.score).then(b.start.cmp(&a.start)))?;

    log::debug!(
        "quote matched at {}..{} with score {:.3} ({} candidates)",
        best.start,
        best.end,
        best.score,
        candidates.len()
    );
    Some(best)
}
