use crate::error::{AnchorError, Result};

use super::node::{NodeId, NodeKind, TextTree};

#[derive(Debug, Clone)]
enum NodeData {
    Element(String),
    Text { text: String, char_len: usize },
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

/// Arena-backed host tree of elements and text leaves.
///
/// This is the concrete tree the CLI, benches and tests anchor against. Any
/// other host can plug in by implementing [`TextTree`] instead.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    /// Create a document containing only a root element.
    pub fn new(root_tag: &str) -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Element(root_tag.to_ascii_lowercase()),
            }],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, detached ones included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.push(parent, NodeData::Element(tag.to_ascii_lowercase()))
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(
            parent,
            NodeData::Text {
                text: text.to_string(),
                char_len: text.chars().count(),
            },
        )
    }

    /// Replace the content of a text leaf. No-op for elements.
    pub fn set_text(&mut self, node: NodeId, new_text: &str) {
        if let NodeData::Text { text, char_len } = &mut self.nodes[node.0].data {
            *text = new_text.to_string();
            *char_len = new_text.chars().count();
        }
    }

    /// Detach `node` from its parent. The node stays in the arena but is no
    /// longer reachable from the root.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    /// Every text leaf whose content equals `text`, in document order.
    pub fn find_text_nodes(&self, text: &str) -> Vec<NodeId> {
        self.leaf_segments(self.root)
            .into_iter()
            .filter(|&n| matches!(self.node_kind(n), NodeKind::Text(t) if t == text))
            .collect()
    }

    /// First element below the root with the given tag, in document order.
    pub fn find_element(&self, tag: &str) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(current) = stack.pop() {
            if current != self.root && self.tag_name(current) == Some(tag) {
                return Some(current);
            }
            stack.extend(self.children(current).iter().rev().copied());
        }
        None
    }

    fn push(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            data,
        });
        self.nodes[parent.0].children.push(id);
        id
    }
}

impl TextTree for Document {
    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    fn node_kind(&self, node: NodeId) -> NodeKind<'_> {
        match &self.nodes[node.0].data {
            NodeData::Element(tag) => NodeKind::Element { tag },
            NodeData::Text { text, .. } => NodeKind::Text(text),
        }
    }

    fn text_len(&self, node: NodeId) -> usize {
        match &self.nodes[node.0].data {
            NodeData::Text { char_len, .. } => *char_len,
            NodeData::Element(_) => self.nodes[node.0]
                .children
                .iter()
                .map(|&c| self.text_len(c))
                .sum(),
        }
    }
}

/// Streaming builder: `open` / `text` / `close` in document order.
///
/// ```
/// use reanchor_engine::{DocumentBuilder, TextTree};
///
/// let mut b = DocumentBuilder::new("body");
/// b.open("p").text("Hello ").open("em").text("world").close().close();
/// let doc = b.finish().unwrap();
/// assert_eq!(doc.text_content(doc.root()), "Hello world");
/// ```
#[derive(Debug)]
pub struct DocumentBuilder {
    doc: Document,
    stack: Vec<NodeId>,
    closed_root: bool,
}

impl DocumentBuilder {
    pub fn new(root_tag: &str) -> Self {
        let doc = Document::new(root_tag);
        let root = doc.root();
        Self {
            doc,
            stack: vec![root],
            closed_root: false,
        }
    }

    fn current(&self) -> NodeId {
        // The root is never popped by `close`, so the stack is never empty.
        self.stack.last().copied().unwrap_or(self.doc.root)
    }

    pub fn open(&mut self, tag: &str) -> &mut Self {
        let id = self.doc.append_element(self.current(), tag);
        self.stack.push(id);
        self
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        self.doc.append_text(self.current(), text);
        self
    }

    /// Append an element holding a single text leaf.
    pub fn leaf(&mut self, tag: &str, text: &str) -> &mut Self {
        self.open(tag).text(text).close()
    }

    pub fn close(&mut self) -> &mut Self {
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            // Later content still goes below the root; `finish` reports it.
            self.closed_root = true;
        }
        self
    }

    pub fn finish(self) -> Result<Document> {
        if self.closed_root {
            return Err(AnchorError::UnbalancedTree {
                reason: "close() called on the root",
            });
        }
        if self.stack.len() > 1 {
            return Err(AnchorError::UnbalancedTree {
                reason: "element left open",
            });
        }
        Ok(self.doc)
    }
}
