use super::selector::Selector;
use crate::error::Result;
use crate::range::TextRange;
use crate::tree::{DomRange, NodeId, TextTree};

/// Anchor by absolute character offsets into the root's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPositionAnchor {
    pub root: NodeId,
    pub start: usize,
    pub end: usize,
}

impl TextPositionAnchor {
    pub fn new(root: NodeId, start: usize, end: usize) -> Self {
        Self { root, start, end }
    }

    pub fn from_range<T: TextTree + ?Sized>(tree: &T, root: NodeId, range: &DomRange) -> Result<Self> {
        let text_range = TextRange::from_range(tree, range)?.relative_to(tree, root)?;
        Ok(Self::new(root, text_range.start.offset, text_range.end.offset))
    }

    /// `None` when `selector` is not a position selector.
    pub fn from_selector(root: NodeId, selector: &Selector) -> Option<Self> {
        match *selector {
            Selector::TextPosition { start, end } => Some(Self::new(root, start, end)),
            _ => None,
        }
    }

    pub fn to_selector(&self) -> Selector {
        Selector::TextPosition {
            start: self.start,
            end: self.end,
        }
    }

    pub fn to_range<T: TextTree + ?Sized>(&self, tree: &T) -> Result<DomRange> {
        TextRange::from_offsets(self.root, self.start, self.end).to_range(tree)
    }
}
