//! Absolute `/tag[index]` paths from a root container to a descendant.
//!
//! Indexes are 1-based and count only same-named siblings. Text leaves are
//! addressed as `text()[index]`.

use std::sync::OnceLock;

use regex::Regex;

use super::node::{NodeId, NodeKind, TextTree};
use crate::error::{AnchorError, Result};

static SIMPLE_PATH: OnceLock<Regex> = OnceLock::new();

const TEXT_STEP: &str = "text()";

fn segment_name<T: TextTree + ?Sized>(tree: &T, node: NodeId) -> &str {
    match tree.node_kind(node) {
        NodeKind::Element { tag } => tag,
        NodeKind::Text(_) => TEXT_STEP,
    }
}

/// 1-based position of `node` among its same-named siblings.
fn same_name_position<T: TextTree + ?Sized>(tree: &T, node: NodeId) -> usize {
    let name = segment_name(tree, node);
    let Some(parent) = tree.parent(node) else {
        return 1;
    };
    let mut position = 0;
    for &sibling in tree.children(parent) {
        if segment_name(tree, sibling) == name {
            position += 1;
        }
        if sibling == node {
            break;
        }
    }
    position
}

/// Path of `node` relative to `root`. The root itself has the empty path.
pub fn path_from_node<T: TextTree + ?Sized>(tree: &T, node: NodeId, root: NodeId) -> Result<String> {
    let mut segments = Vec::new();
    let mut current = node;
    while current != root {
        segments.push(format!(
            "{}[{}]",
            segment_name(tree, current),
            same_name_position(tree, current)
        ));
        current = tree
            .parent(current)
            .ok_or(AnchorError::NotAnAncestor { ancestor: root, node })?;
    }
    segments.reverse();
    Ok(segments.iter().map(|s| format!("/{s}")).collect())
}

/// Resolve `path` below `root`.
///
/// Element-only paths take a direct sibling-indexed walk; anything else
/// (text steps, wildcards, the empty path) goes through the generic step
/// evaluator.
pub fn node_from_path<T: TextTree + ?Sized>(tree: &T, path: &str, root: NodeId) -> Result<NodeId> {
    let simple = SIMPLE_PATH.get_or_init(|| {
        Regex::new(r"^(/[A-Za-z0-9-]+(\[[0-9]+\])?)+$").expect("Invalid simple path regex")
    });
    let found = if simple.is_match(path) {
        evaluate_simple_path(tree, path, root)
    } else {
        evaluate_path(tree, path, root)?
    };
    found.ok_or_else(|| AnchorError::PathNotFound {
        path: path.to_string(),
    })
}

fn nth_child_of_type<T: TextTree + ?Sized>(
    tree: &T,
    element: NodeId,
    name: &str,
    index: usize,
) -> Option<NodeId> {
    tree.children(element)
        .iter()
        .copied()
        .filter(|&c| {
            tree.tag_name(c)
                .is_some_and(|tag| tag.eq_ignore_ascii_case(name))
        })
        .nth(index)
}

fn evaluate_simple_path<T: TextTree + ?Sized>(tree: &T, path: &str, root: NodeId) -> Option<NodeId> {
    let mut element = root;
    // Validated by the regex: a leading empty segment, then non-empty ones.
    for segment in path.split('/').skip(1) {
        let (name, index) = match segment.find('[') {
            Some(open) => {
                let close = segment.find(']')?;
                let index: usize = segment[open + 1..close].parse().ok()?;
                (&segment[..open], index.checked_sub(1)?)
            }
            None => (segment, 0),
        };
        element = nth_child_of_type(tree, element, name, index)?;
    }
    Some(element)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepTest<'a> {
    Named(&'a str),
    AnyElement,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step<'a> {
    test: StepTest<'a>,
    /// 0-based; `None` when the step index was 0 (never matches).
    index: Option<usize>,
}

fn parse_step(raw: &str) -> Option<Step<'_>> {
    let (name, index) = match raw.find('[') {
        Some(open) => {
            let inner = raw[open + 1..].strip_suffix(']')?;
            let index: usize = inner.trim().parse().ok()?;
            (&raw[..open], index.checked_sub(1))
        }
        None => (raw, Some(0)),
    };
    let test = match name {
        TEXT_STEP => StepTest::Text,
        "*" => StepTest::AnyElement,
        n if !n.is_empty() && n.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') => {
            StepTest::Named(n)
        }
        _ => return None,
    };
    Some(Step { test, index })
}

/// Generic tree-walk evaluator. Returns `Ok(None)` for well-formed paths
/// that select nothing.
fn evaluate_path<T: TextTree + ?Sized>(tree: &T, path: &str, root: NodeId) -> Result<Option<NodeId>> {
    let invalid = || AnchorError::InvalidPath {
        path: path.to_string(),
    };

    let relative = path.strip_prefix("./").map(|p| format!("/{p}"));
    let path_ref = relative.as_deref().unwrap_or(path);
    if path_ref.is_empty() || path_ref == "." {
        return Ok(Some(root));
    }
    let rest = path_ref.strip_prefix('/').ok_or_else(invalid)?;

    let steps = rest
        .split('/')
        .map(parse_step)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(invalid)?;

    let mut current = root;
    for step in steps {
        let Some(index) = step.index else {
            return Ok(None);
        };
        let next = tree
            .children(current)
            .iter()
            .copied()
            .filter(|&c| match (step.test, tree.node_kind(c)) {
                (StepTest::Text, NodeKind::Text(_)) => true,
                (StepTest::AnyElement, NodeKind::Element { .. }) => true,
                (StepTest::Named(name), NodeKind::Element { tag }) => tag.eq_ignore_ascii_case(name),
                _ => false,
            })
            .nth(index);
        match next {
            Some(node) => current = node,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}
