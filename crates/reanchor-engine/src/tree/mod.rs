//! # Host tree
//!
//! The anchoring core never owns the document it anchors into. It reads it
//! through [`TextTree`]: a tree of elements ("containers") whose leaves are
//! text segments. Everything else (flattened text, leaf order, neighbouring
//! leaves) is derived from `parent` / `children` / `node_kind`.
//!
//! [`Document`] is the arena implementation used by the CLI and the tests;
//! [`Document::from_markdown`] builds one from Markdown.
//!
//! Concrete ranges ([`DomRange`]) follow DOM boundary-point semantics, and
//! [`path`] provides `/tag[index]` addressing for range selectors.

pub mod document;
pub mod dom_range;
pub mod markdown;
pub mod node;
pub mod path;

pub use document::{Document, DocumentBuilder};
pub use dom_range::{Boundary, DomRange};
pub use node::{NodeId, NodeKind, TextTree};
pub use path::{node_from_path, path_from_node};
