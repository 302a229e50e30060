use super::node::{NodeId, TextTree};

/// One end of a concrete range.
///
/// For a text leaf `offset` is a character offset into that leaf; for an
/// element it is a child index, as with DOM boundary points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub node: NodeId,
    pub offset: usize,
}

/// A concrete range in a live host tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomRange {
    pub start: Boundary,
    pub end: Boundary,
}

impl DomRange {
    pub fn new(start_node: NodeId, start_offset: usize, end_node: NodeId, end_offset: usize) -> Self {
        Self {
            start: Boundary {
                node: start_node,
                offset: start_offset,
            },
            end: Boundary {
                node: end_node,
                offset: end_offset,
            },
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Text covered by the range, or an empty string for a collapsed or
    /// inverted range.
    pub fn text<T: TextTree + ?Sized>(&self, tree: &T) -> String {
        let root = tree.top_root(self.start.node);
        let start = absolute_offset(tree, self.start);
        let end = absolute_offset(tree, self.end);
        if end <= start {
            return String::new();
        }
        tree.text_content(root)
            .chars()
            .skip(start)
            .take(end - start)
            .collect()
    }
}

/// Character offset of a boundary point from the start of the whole tree.
fn absolute_offset<T: TextTree + ?Sized>(tree: &T, boundary: Boundary) -> usize {
    let mut offset = if tree.is_text(boundary.node) {
        boundary.offset
    } else {
        tree.children(boundary.node)
            .iter()
            .take(boundary.offset)
            .map(|&c| tree.text_len(c))
            .sum()
    };
    let mut current = boundary.node;
    while let Some(parent) = tree.parent(current) {
        offset += tree.preceding_siblings_text_len(current);
        current = parent;
    }
    offset
}
