//! # Quote scoring
//!
//! Turns raw approximate matches into one answer. Candidates come from a
//! verbatim scan when the quote still occurs unchanged, otherwise from the
//! approximate matcher with a budget of `min(256, quote.len() / 2)` errors.
//! Each candidate is scored on quote similarity, prefix/suffix similarity and
//! distance from an optional position hint, and the best one wins.

pub mod exact;
pub mod scorer;

pub use exact::{exact_occurrences, text_match_score};
pub use scorer::{QuoteContext, QuoteOptions, ScoreWeights, ScoredMatch, match_quote, match_quote_with};
