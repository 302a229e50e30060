use thiserror::Error;

use crate::tree::NodeId;

/// Everything that can go wrong while describing or resolving an anchor.
///
/// None of these are fatal to the host document: callers are expected to fall
/// back (show the annotation without a range, try another selector, drop it).
#[derive(Debug, Error)]
pub enum AnchorError {
    /// An offset points past the end of the available text.
    #[error("Offset {offset} exceeds text length {len}")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("Node {ancestor:?} is not an ancestor of {node:?}")]
    NotAnAncestor { ancestor: NodeId, node: NodeId },

    /// A point (node + offset) handed in by the host is unusable.
    #[error("Invalid point: {reason}")]
    InvalidPoint { reason: &'static str },

    #[error("Quote not found")]
    QuoteNotFound,

    #[error("Path not found: {path}")]
    PathNotFound { path: String },

    #[error("Invalid path expression: {path}")]
    InvalidPath { path: String },

    #[error("Range contains no text")]
    EmptyRange,

    #[error("Resolved text does not match the quote")]
    QuoteMismatch,

    #[error("No usable selectors")]
    NoSelectors,

    #[error("Malformed selector: {0}")]
    MalformedSelector(#[from] serde_json::Error),

    #[error("Unbalanced document builder: {reason}")]
    UnbalancedTree { reason: &'static str },
}

impl AnchorError {
    /// True for the "the text moved out from under us" family of failures.
    pub fn is_bounds(&self) -> bool {
        matches!(self, AnchorError::OffsetOutOfRange { .. })
    }
}

pub type Result<T, E = AnchorError> = std::result::Result<T, E>;
