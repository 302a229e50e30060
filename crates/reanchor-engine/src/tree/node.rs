/// Index of a node inside a host tree.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// What a node is, as far as anchoring cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind<'a> {
    /// A container. `tag` is the lowercase tag name used by path addressing.
    Element { tag: &'a str },
    /// A leaf text segment.
    Text(&'a str),
}

/// The read-only view of a host document that the anchoring core needs.
///
/// Implementors provide structure (`parent`, `children`, `node_kind`); text
/// measurement and traversal are derived from those. All lengths and offsets
/// are counted in `char`s, never bytes.
pub trait TextTree {
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn children(&self, node: NodeId) -> &[NodeId];

    fn node_kind(&self, node: NodeId) -> NodeKind<'_>;

    fn is_text(&self, node: NodeId) -> bool {
        matches!(self.node_kind(node), NodeKind::Text(_))
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        match self.node_kind(node) {
            NodeKind::Element { tag } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    /// Length of the flattened text content of `node`.
    fn text_len(&self, node: NodeId) -> usize {
        match self.node_kind(node) {
            NodeKind::Text(text) => text.chars().count(),
            NodeKind::Element { .. } => self
                .children(node)
                .iter()
                .map(|&child| self.text_len(child))
                .sum(),
        }
    }

    /// Flattened text content of `node` (all descendant text, in order).
    fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        for leaf in self.leaf_segments(node) {
            if let NodeKind::Text(text) = self.node_kind(leaf) {
                out.push_str(text);
            }
        }
        out
    }

    /// Text leaves under `node` in document order. A text node is its own
    /// single segment.
    fn leaf_segments(&self, node: NodeId) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if self.is_text(current) {
                leaves.push(current);
            } else {
                stack.extend(self.children(current).iter().rev().copied());
            }
        }
        leaves
    }

    /// Inclusive containment: a node contains itself.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    fn child_index(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).iter().position(|&c| c == node)
    }

    /// Combined text length of all siblings before `node`.
    fn preceding_siblings_text_len(&self, node: NodeId) -> usize {
        let Some(parent) = self.parent(node) else {
            return 0;
        };
        self.children(parent)
            .iter()
            .take_while(|&&c| c != node)
            .map(|&c| self.text_len(c))
            .sum()
    }

    fn top_root(&self, node: NodeId) -> NodeId {
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// First text leaf after `node` in document order, descending into
    /// `node`'s own subtree first.
    fn next_leaf_after(&self, node: NodeId) -> Option<NodeId> {
        let order = preorder(self, self.top_root(node));
        let at = order.iter().position(|&n| n == node)?;
        order[at + 1..].iter().copied().find(|&n| self.is_text(n))
    }

    /// Last text leaf before `node` in document order. Ancestors and
    /// descendants of `node` are never leaves before it.
    fn previous_leaf_before(&self, node: NodeId) -> Option<NodeId> {
        let order = preorder(self, self.top_root(node));
        let at = order.iter().position(|&n| n == node)?;
        order[..at].iter().rev().copied().find(|&n| self.is_text(n))
    }
}

fn preorder<T: TextTree + ?Sized>(tree: &T, root: NodeId) -> Vec<NodeId> {
    let mut order = Vec::new();
    let mut stack = vec![root];
    while let Some(current) = stack.pop() {
        order.push(current);
        stack.extend(tree.children(current).iter().rev().copied());
    }
    order
}
