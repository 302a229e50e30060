use crate::error::{AnchorError, Result};
use crate::tree::{Boundary, NodeId, NodeKind, TextTree};

/// Which neighbouring text leaf to use when an offset lands in a container
/// that has no text of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveDirection {
    /// The first text leaf after the container (offset 0 in that leaf).
    Forwards,
    /// The last text leaf before the container (offset at its end).
    Backwards,
}

/// A character offset from the start of a container's flattened text.
///
/// The offset is only checked against the text when the position is resolved,
/// since the text may change between construction and use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextPosition {
    pub container: NodeId,
    pub offset: usize,
}

impl TextPosition {
    pub fn new(container: NodeId, offset: usize) -> Self {
        Self { container, offset }
    }

    /// The same point, measured from `ancestor` instead.
    pub fn relative_to<T: TextTree + ?Sized>(&self, tree: &T, ancestor: NodeId) -> Result<Self> {
        if !tree.contains(ancestor, self.container) {
            return Err(AnchorError::NotAnAncestor {
                ancestor,
                node: self.container,
            });
        }
        let mut container = self.container;
        let mut offset = self.offset;
        while container != ancestor {
            offset += tree.preceding_siblings_text_len(container);
            match tree.parent(container) {
                Some(parent) => container = parent,
                None => break,
            }
        }
        Ok(Self::new(container, offset))
    }

    /// The text leaf and local offset this position refers to.
    ///
    /// An offset at the boundary between two leaves resolves to the start of
    /// the later one, except at the very end of the container's text. An
    /// offset of 0 in a container without text is ambiguous; `direction`
    /// picks the neighbouring leaf, and `None` makes it an error.
    pub fn resolve<T: TextTree + ?Sized>(
        &self,
        tree: &T,
        direction: Option<ResolveDirection>,
    ) -> Result<Boundary> {
        let err = match resolve_offsets(tree, self.container, &[self.offset]) {
            Ok(points) => match points.first() {
                Some(&point) => return Ok(point),
                None => AnchorError::OffsetOutOfRange {
                    offset: self.offset,
                    len: tree.text_len(self.container),
                },
            },
            Err(err) => err,
        };
        if self.offset != 0 {
            return Err(err);
        }
        let neighbour = match direction {
            Some(ResolveDirection::Forwards) => tree
                .next_leaf_after(self.container)
                .map(|leaf| Boundary { node: leaf, offset: 0 }),
            Some(ResolveDirection::Backwards) => tree
                .previous_leaf_before(self.container)
                .map(|leaf| Boundary {
                    node: leaf,
                    offset: tree.text_len(leaf),
                }),
            None => None,
        };
        neighbour.ok_or(err)
    }

    /// Position of a host boundary point.
    ///
    /// A point inside a text leaf becomes a position in the leaf's parent; a
    /// point `(element, child_index)` counts the text of the first
    /// `child_index` children.
    pub fn from_point<T: TextTree + ?Sized>(tree: &T, node: NodeId, offset: usize) -> Result<Self> {
        match tree.node_kind(node) {
            NodeKind::Text(_) => {
                let len = tree.text_len(node);
                if offset > len {
                    return Err(AnchorError::OffsetOutOfRange { offset, len });
                }
                let parent = tree.parent(node).ok_or(AnchorError::InvalidPoint {
                    reason: "text node has no parent",
                })?;
                Ok(Self::new(
                    parent,
                    tree.preceding_siblings_text_len(node) + offset,
                ))
            }
            NodeKind::Element { .. } => {
                let children = tree.children(node);
                if offset > children.len() {
                    return Err(AnchorError::OffsetOutOfRange {
                        offset,
                        len: children.len(),
                    });
                }
                let text_offset = children[..offset].iter().map(|&c| tree.text_len(c)).sum();
                Ok(Self::new(node, text_offset))
            }
        }
    }

    /// Position from a node and a character offset within it.
    pub fn from_char_offset<T: TextTree + ?Sized>(
        tree: &T,
        node: NodeId,
        offset: usize,
    ) -> Result<Self> {
        if tree.is_text(node) {
            Self::from_point(tree, node, offset)
        } else {
            Ok(Self::new(node, offset))
        }
    }
}

/// Resolve ascending character `offsets` within `container` to leaf points
/// with a single walk over its text leaves.
pub fn resolve_offsets<T: TextTree + ?Sized>(
    tree: &T,
    container: NodeId,
    offsets: &[usize],
) -> Result<Vec<Boundary>> {
    let mut pending = offsets.iter().copied().peekable();
    let mut points = Vec::with_capacity(offsets.len());
    let mut length = 0;
    let mut last_leaf = None;

    let leaves = tree.leaf_segments(container);
    let mut leaves = leaves.into_iter();
    let mut current = leaves.next();
    while let (Some(offset), Some(leaf)) = (pending.peek().copied(), current) {
        last_leaf = Some(leaf);
        let leaf_len = tree.text_len(leaf);
        if length + leaf_len > offset {
            points.push(Boundary {
                node: leaf,
                offset: offset - length,
            });
            pending.next();
        } else {
            length += leaf_len;
            current = leaves.next();
        }
    }

    // Offsets exactly at the end of the text land at the end of the last leaf.
    if let Some(leaf) = last_leaf {
        while pending.next_if_eq(&length).is_some() {
            points.push(Boundary {
                node: leaf,
                offset: tree.text_len(leaf),
            });
        }
    }

    match pending.next() {
        Some(offset) => Err(AnchorError::OffsetOutOfRange {
            offset,
            len: tree.text_len(container),
        }),
        None => Ok(points),
    }
}
