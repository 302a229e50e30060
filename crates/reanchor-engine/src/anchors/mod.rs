//! # Anchors
//!
//! Three ways of pinning a range so it can be found again later, each
//! convertible to and from a persisted [`Selector`]:
//!
//! - [`RangeAnchor`]: container paths plus offsets. Exact, but brittle.
//! - [`TextPositionAnchor`]: character offsets into the root's text.
//! - [`TextQuoteAnchor`]: the text itself plus context, found again with the
//!   fuzzy quote scorer. The resilient one.
//!
//! [`anchor`] tries the selectors of an annotation in that order and
//! [`describe`] produces all of them for a fresh selection.

pub mod position;
pub mod quote;
pub mod range;
pub mod resolve;
pub mod selector;

use serde::{Deserialize, Serialize};

pub use position::TextPositionAnchor;
pub use quote::TextQuoteAnchor;
pub use range::RangeAnchor;
pub use resolve::{anchor, describe};
pub use selector::{Selector, selectors_from_json};

use crate::error::Result;
use crate::quote::QuoteOptions;
use crate::tree::{DomRange, NodeId, TextTree};

/// Characters of context captured on each side of a quote.
pub const DEFAULT_CONTEXT_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorOptions {
    pub context_len: usize,
    pub quote: QuoteOptions,
}

impl Default for AnchorOptions {
    fn default() -> Self {
        Self {
            context_len: DEFAULT_CONTEXT_LEN,
            quote: QuoteOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    Range(RangeAnchor),
    Position(TextPositionAnchor),
    Quote(TextQuoteAnchor),
}

impl Anchor {
    /// Build the anchor a selector describes, relative to `root`.
    pub fn from_selector<T: TextTree + ?Sized>(
        tree: &T,
        root: NodeId,
        selector: &Selector,
    ) -> Result<Self> {
        Ok(match selector {
            Selector::Range {
                start_container,
                start_offset,
                end_container,
                end_offset,
            } => Anchor::Range(RangeAnchor::from_paths(
                tree,
                root,
                (start_container.as_str(), *start_offset),
                (end_container.as_str(), *end_offset),
            )?),
            Selector::TextPosition { start, end } => {
                Anchor::Position(TextPositionAnchor::new(root, *start, *end))
            }
            Selector::TextQuote {
                exact,
                prefix,
                suffix,
            } => Anchor::Quote(TextQuoteAnchor {
                root,
                exact: exact.clone(),
                prefix: prefix.clone(),
                suffix: suffix.clone(),
            }),
        })
    }

    pub fn to_range<T: TextTree + ?Sized>(&self, tree: &T, options: &AnchorOptions) -> Result<DomRange> {
        match self {
            Anchor::Range(anchor) => Ok(anchor.to_range()),
            Anchor::Position(anchor) => anchor.to_range(tree),
            Anchor::Quote(anchor) => anchor.to_range(tree, None, &options.quote),
        }
    }

    pub fn to_selector<T: TextTree + ?Sized>(&self, tree: &T) -> Result<Selector> {
        match self {
            Anchor::Range(anchor) => anchor.to_selector(tree),
            Anchor::Position(anchor) => Ok(anchor.to_selector()),
            Anchor::Quote(anchor) => Ok(anchor.to_selector()),
        }
    }
}
