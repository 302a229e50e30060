pub mod anchors;
pub mod error;
pub mod matching;
pub mod quote;
pub mod range;
pub mod tree;

// Re-export key types for easier usage
pub use anchors::{
    Anchor, AnchorOptions, RangeAnchor, Selector, TextPositionAnchor, TextQuoteAnchor, anchor,
    describe, selectors_from_json,
};
pub use error::{AnchorError, Result};
pub use matching::{Match, search};
pub use quote::{QuoteContext, QuoteOptions, ScoreWeights, ScoredMatch, match_quote, match_quote_with};
pub use range::{ResolveDirection, TextPosition, TextRange};
pub use tree::{Boundary, Document, DocumentBuilder, DomRange, NodeId, NodeKind, TextTree};
