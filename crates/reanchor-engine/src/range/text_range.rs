use super::position::{ResolveDirection, TextPosition, resolve_offsets};
use crate::error::{AnchorError, Result};
use crate::tree::{DomRange, NodeId, TextTree};

/// A pair of text positions, possibly measured from different containers.
///
/// `start <= end` in document order is expected but not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRange {
    pub start: TextPosition,
    pub end: TextPosition,
}

impl TextRange {
    pub fn new(start: TextPosition, end: TextPosition) -> Self {
        Self { start, end }
    }

    /// Range between two offsets of the same container.
    pub fn from_offsets(container: NodeId, start: usize, end: usize) -> Self {
        Self::new(
            TextPosition::new(container, start),
            TextPosition::new(container, end),
        )
    }

    /// Measure a concrete range.
    pub fn from_range<T: TextTree + ?Sized>(tree: &T, range: &DomRange) -> Result<Self> {
        Ok(Self::new(
            TextPosition::from_point(tree, range.start.node, range.start.offset)?,
            TextPosition::from_point(tree, range.end.node, range.end.offset)?,
        ))
    }

    /// Re-base both ends onto `ancestor`.
    pub fn relative_to<T: TextTree + ?Sized>(&self, tree: &T, ancestor: NodeId) -> Result<Self> {
        Ok(Self::new(
            self.start.relative_to(tree, ancestor)?,
            self.end.relative_to(tree, ancestor)?,
        ))
    }

    /// Materialize as a concrete range whose ends are always in text leaves.
    ///
    /// When both ends share a container (and are ordered) they are resolved in
    /// one walk. Otherwise the start is resolved forwards and the end
    /// backwards, which collapses the range if no text lies between them.
    pub fn to_range<T: TextTree + ?Sized>(&self, tree: &T) -> Result<DomRange> {
        let (start, end) = if self.start.container == self.end.container
            && self.start.offset <= self.end.offset
        {
            let points = resolve_offsets(
                tree,
                self.start.container,
                &[self.start.offset, self.end.offset],
            )?;
            match points[..] {
                [start, end] => (start, end),
                _ => {
                    return Err(AnchorError::OffsetOutOfRange {
                        offset: self.end.offset,
                        len: tree.text_len(self.end.container),
                    });
                }
            }
        } else {
            (
                self.start.resolve(tree, Some(ResolveDirection::Forwards))?,
                self.end.resolve(tree, Some(ResolveDirection::Backwards))?,
            )
        };
        Ok(DomRange { start, end })
    }

    /// Shrink the range so it neither starts nor ends with whitespace.
    ///
    /// The result is measured from the top of the tree. A range holding only
    /// whitespace (or nothing) is an error.
    pub fn trimmed<T: TextTree + ?Sized>(&self, tree: &T) -> Result<Self> {
        let root = tree.top_root(self.start.container);
        let start = self.start.relative_to(tree, root)?.offset;
        let end = self.end.relative_to(tree, root)?.offset;
        let len = tree.text_len(root);
        if end > len {
            return Err(AnchorError::OffsetOutOfRange { offset: end, len });
        }
        if end <= start {
            return Err(AnchorError::EmptyRange);
        }

        let text: Vec<char> = tree
            .text_content(root)
            .chars()
            .skip(start)
            .take(end - start)
            .collect();
        let leading = text.iter().take_while(|c| c.is_whitespace()).count();
        if leading == text.len() {
            return Err(AnchorError::EmptyRange);
        }
        let trailing = text.iter().rev().take_while(|c| c.is_whitespace()).count();

        Ok(Self::from_offsets(root, start + leading, end - trailing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Boundary, Document, DocumentBuilder};
    use pretty_assertions::assert_eq;

    /// `<body><p>Hello <em>big</em> world</p><div></div><p>end</p></body>`
    fn doc() -> Document {
        let mut b = DocumentBuilder::new("body");
        b.open("p")
            .text("Hello ")
            .leaf("em", "big")
            .text(" world")
            .close()
            .open("div")
            .close()
            .leaf("p", "end");
        b.finish().unwrap()
    }

    #[test]
    fn from_offsets_materializes_in_leaves() {
        let doc = doc();
        let range = TextRange::from_offsets(doc.root(), 4, 11).to_range(&doc).unwrap();
        assert_eq!(range.text(&doc), "o big w");
        assert_eq!(range.start.node, doc.find_text_nodes("Hello ")[0]);
        assert_eq!(range.end.node, doc.find_text_nodes(" world")[0]);
    }

    #[test]
    fn range_round_trip_preserves_text() {
        let doc = doc();
        let hello = doc.find_text_nodes("Hello ")[0];
        let end = doc.find_text_nodes("end")[0];
        let original = DomRange::new(hello, 2, end, 2);

        let text_range = TextRange::from_range(&doc, &original).unwrap();
        let rebuilt = text_range.to_range(&doc).unwrap();
        assert_eq!(rebuilt.text(&doc), original.text(&doc));
        assert_eq!(rebuilt.text(&doc), "llo big worlden");
    }

    #[test]
    fn element_level_ends_land_in_text() {
        let doc = doc();
        let div = doc.find_element("div").unwrap();
        // Both ends in the empty div take the single-container walk, which
        // has no text to land in.
        assert!(TextRange::from_offsets(div, 0, 0).to_range(&doc).is_err());

        let spanning = TextRange::new(
            TextPosition::new(div, 0),
            TextPosition::from_point(&doc, doc.find_text_nodes("end")[0], 3).unwrap(),
        );
        let dom = spanning.to_range(&doc).unwrap();
        assert_eq!(
            dom.start,
            Boundary {
                node: doc.find_text_nodes("end")[0],
                offset: 0
            }
        );
        assert_eq!(dom.text(&doc), "end");
    }

    #[test]
    fn out_of_range_offsets_fail() {
        let doc = doc();
        let err = TextRange::from_offsets(doc.root(), 2, 40)
            .to_range(&doc)
            .unwrap_err();
        assert!(err.is_bounds());
    }

    #[test]
    fn relative_to_rebases_both_ends() {
        let doc = doc();
        let em = doc.find_element("em").unwrap();
        let range = TextRange::from_offsets(em, 0, 3)
            .relative_to(&doc, doc.root())
            .unwrap();
        assert_eq!(range, TextRange::from_offsets(doc.root(), 6, 9));
    }

    #[test]
    fn trimmed_drops_surrounding_whitespace() {
        let doc = doc();
        // " big " spans the spaces around the emphasis.
        let range = TextRange::from_offsets(doc.root(), 5, 10);
        let trimmed = range.trimmed(&doc).unwrap();
        assert_eq!(trimmed, TextRange::from_offsets(doc.root(), 6, 9));
        assert_eq!(trimmed.to_range(&doc).unwrap().text(&doc), "big");
    }

    #[test]
    fn trimmed_rejects_blank_ranges() {
        let doc = doc();
        let range = TextRange::from_offsets(doc.root(), 5, 6);
        assert!(matches!(range.trimmed(&doc), Err(AnchorError::EmptyRange)));
    }
}
