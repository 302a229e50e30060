use super::selector::Selector;
use crate::error::Result;
use crate::range::{TextPosition, TextRange};
use crate::tree::{DomRange, NodeId, TextTree, node_from_path, path_from_node};

/// Anchor by the paths of the start and end containers below `root`.
///
/// Exact while the document structure is unchanged, useless after almost any
/// structural edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeAnchor {
    pub root: NodeId,
    pub range: DomRange,
}

impl RangeAnchor {
    pub fn new(root: NodeId, range: DomRange) -> Self {
        Self { root, range }
    }

    pub fn from_range(root: NodeId, range: &DomRange) -> Self {
        Self::new(root, *range)
    }

    /// Evaluate the selector's paths below `root`.
    ///
    /// Returns `Ok(None)` when `selector` is not a range selector.
    pub fn from_selector<T: TextTree + ?Sized>(
        tree: &T,
        root: NodeId,
        selector: &Selector,
    ) -> Result<Option<Self>> {
        let Selector::Range {
            start_container,
            start_offset,
            end_container,
            end_offset,
        } = selector
        else {
            return Ok(None);
        };
        Self::from_paths(
            tree,
            root,
            (start_container.as_str(), *start_offset),
            (end_container.as_str(), *end_offset),
        )
        .map(Some)
    }

    /// Resolve `(path, char offset)` pairs for both ends.
    pub fn from_paths<T: TextTree + ?Sized>(
        tree: &T,
        root: NodeId,
        (start_path, start_offset): (&str, usize),
        (end_path, end_offset): (&str, usize),
    ) -> Result<Self> {
        let start_node = node_from_path(tree, start_path, root)?;
        let end_node = node_from_path(tree, end_path, root)?;
        let text_range = TextRange::new(
            TextPosition::from_char_offset(tree, start_node, start_offset)?,
            TextPosition::from_char_offset(tree, end_node, end_offset)?,
        );
        Ok(Self::new(root, text_range.to_range(tree)?))
    }

    /// Element paths and offsets of the range, after snapping both ends into
    /// text leaves.
    pub fn to_selector<T: TextTree + ?Sized>(&self, tree: &T) -> Result<Selector> {
        let normalized = TextRange::from_range(tree, &self.range)?.to_range(tree)?;
        let text_range = TextRange::from_range(tree, &normalized)?;
        Ok(Selector::Range {
            start_container: path_from_node(tree, text_range.start.container, self.root)?,
            start_offset: text_range.start.offset,
            end_container: path_from_node(tree, text_range.end.container, self.root)?,
            end_offset: text_range.end.offset,
        })
    }

    pub fn to_range(&self) -> DomRange {
        self.range
    }
}
