use super::position::TextPositionAnchor;
use super::selector::Selector;
use crate::error::{AnchorError, Result};
use crate::quote::{QuoteContext, QuoteOptions, match_quote_with};
use crate::range::TextRange;
use crate::tree::{DomRange, NodeId, TextTree};

/// Anchor by the selected text plus the text around it.
///
/// Survives edits elsewhere in the document and small edits inside the quote
/// itself, at the cost of a fuzzy search on every resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuoteAnchor {
    pub root: NodeId,
    pub exact: String,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl TextQuoteAnchor {
    /// Capture the text of `range` with up to `context_len` characters of
    /// context on each side, taken from `root`'s flattened text.
    pub fn from_range<T: TextTree + ?Sized>(
        tree: &T,
        root: NodeId,
        range: &DomRange,
        context_len: usize,
    ) -> Result<Self> {
        let text: Vec<char> = tree.text_content(root).chars().collect();
        let text_range = TextRange::from_range(tree, range)?.relative_to(tree, root)?;
        let start = text_range.start.offset;
        let end = text_range.end.offset;
        if end > text.len() {
            return Err(AnchorError::OffsetOutOfRange {
                offset: end,
                len: text.len(),
            });
        }
        if end <= start {
            return Err(AnchorError::EmptyRange);
        }

        let slice = |from: usize, to: usize| -> Option<String> {
            (from < to).then(|| text[from..to].iter().collect())
        };
        Ok(Self {
            root,
            exact: text[start..end].iter().collect(),
            prefix: slice(start.saturating_sub(context_len), start),
            suffix: slice(end, (end + context_len).min(text.len())),
        })
    }

    pub fn from_selector(root: NodeId, selector: &Selector) -> Option<Self> {
        match selector {
            Selector::TextQuote {
                exact,
                prefix,
                suffix,
            } => Some(Self {
                root,
                exact: exact.clone(),
                prefix: prefix.clone(),
                suffix: suffix.clone(),
            }),
            _ => None,
        }
    }

    pub fn to_selector(&self) -> Selector {
        Selector::TextQuote {
            exact: self.exact.clone(),
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
        }
    }

    /// Locate the quote in the current text, preferring matches near `hint`.
    pub fn to_position_anchor<T: TextTree + ?Sized>(
        &self,
        tree: &T,
        hint: Option<usize>,
        options: &QuoteOptions,
    ) -> Result<TextPositionAnchor> {
        let text = tree.text_content(self.root);
        let context = QuoteContext {
            prefix: self.prefix.as_deref(),
            suffix: self.suffix.as_deref(),
            hint,
        };
        let found = match_quote_with(&text, &self.exact, &context, options)
            .ok_or(AnchorError::QuoteNotFound)?;
        Ok(TextPositionAnchor::new(self.root, found.start, found.end))
    }

    pub fn to_range<T: TextTree + ?Sized>(
        &self,
        tree: &T,
        hint: Option<usize>,
        options: &QuoteOptions,
    ) -> Result<DomRange> {
        self.to_position_anchor(tree, hint, options)?.to_range(tree)
    }
}
