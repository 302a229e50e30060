use super::position::TextPositionAnchor;
use super::quote::TextQuoteAnchor;
use super::range::RangeAnchor;
use super::selector::Selector;
use super::{Anchor, AnchorOptions};
use crate::error::{AnchorError, Result};
use crate::tree::{DomRange, NodeId, TextTree};

/// Resolve the selectors of one annotation to a range below `root`.
///
/// Range selectors are tried first, then position selectors, then quote
/// selectors (using the position selector's start as a hint). When a quote
/// selector is present, a range or position result whose text differs from
/// the quote is rejected. The first success wins; otherwise the last failure
/// is returned.
pub fn anchor<T: TextTree + ?Sized>(
    tree: &T,
    root: NodeId,
    selectors: &[Selector],
    options: &AnchorOptions,
) -> Result<DomRange> {
    let find = |kind: &str| selectors.iter().find(|s| s.kind() == kind);
    let range = find("RangeSelector");
    let position = find("TextPositionSelector");
    let quote = find("TextQuoteSelector");
    if range.is_none() && position.is_none() && quote.is_none() {
        return Err(AnchorError::NoSelectors);
    }

    let check_quote = |resolved: DomRange| -> Result<DomRange> {
        match quote {
            Some(Selector::TextQuote { exact, .. }) if resolved.text(tree) != *exact => {
                Err(AnchorError::QuoteMismatch)
            }
            _ => Ok(resolved),
        }
    };

    let mut last_error = AnchorError::NoSelectors;
    for selector in [range, position].into_iter().flatten() {
        let attempt = Anchor::from_selector(tree, root, selector)
            .and_then(|anchor| anchor.to_range(tree, options))
            .and_then(&check_quote);
        match attempt {
            Ok(resolved) => return Ok(resolved),
            Err(err) => {
                log::debug!("{} did not anchor: {err}", selector.kind());
                last_error = err;
            }
        }
    }

    if let Some(anchor) = quote.and_then(|s| TextQuoteAnchor::from_selector(root, s)) {
        let hint = position.and_then(|s| TextPositionAnchor::from_selector(root, s)).map(|p| p.start);
        match anchor.to_range(tree, hint, &options.quote) {
            Ok(resolved) => return Ok(resolved),
            Err(err) => {
                log::debug!("TextQuoteSelector did not anchor: {err}");
                last_error = err;
            }
        }
    }

    Err(last_error)
}

/// Every selector that can be built for `range`, in range, position, quote
/// order. Kinds that cannot describe the range are left out.
pub fn describe<T: TextTree + ?Sized>(
    tree: &T,
    root: NodeId,
    range: &DomRange,
    options: &AnchorOptions,
) -> Vec<Selector> {
    let attempts = [
        RangeAnchor::from_range(root, range).to_selector(tree),
        TextPositionAnchor::from_range(tree, root, range).map(|a| a.to_selector()),
        TextQuoteAnchor::from_range(tree, root, range, options.context_len).map(|a| a.to_selector()),
    ];
    attempts
        .into_iter()
        .filter_map(|attempt| match attempt {
            Ok(selector) => Some(selector),
            Err(err) => {
                log::debug!("cannot describe range: {err}");
                None
            }
        })
        .collect()
}
