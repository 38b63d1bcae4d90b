//! Host document abstraction
//!
//! Pagination reads structure and measured heights from the live document and
//! the print materializer injects and removes nodes. Both go through
//! [`DocumentTree`] so the engine runs against the browser DOM and against the
//! in-memory [`MemoryDocument`] alike.

mod memory;

pub use memory::{MemoryDocument, NodeId};

use crate::error::DomError;

/// Capability interface over a live document tree
pub trait DocumentTree {
    /// Handle to a node. Cheap to clone; equality is node identity.
    type Node: Clone + PartialEq + std::fmt::Debug;

    /// First descendant of `scope` (depth-first, document order) carrying `class`
    fn find_by_class(&self, scope: &Self::Node, class: &str) -> Option<Self::Node>;

    /// Immediate element children in document order
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Lowercase tag name
    fn tag_name(&self, node: &Self::Node) -> String;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Rendered height in pixels, as measured by the host
    fn height(&self, node: &Self::Node) -> f64;

    /// Value of a styling variable visible on `node`
    fn style_var(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Whether `node` is attached to the live document
    fn is_connected(&self, node: &Self::Node) -> bool;

    /// Container for injected style blocks, if the document has one
    fn head(&self) -> Option<Self::Node>;

    fn create_element(&mut self, tag: &str) -> Result<Self::Node, DomError>;

    /// Copy `node` and its whole subtree; the copy is detached
    fn deep_clone(&mut self, node: &Self::Node) -> Result<Self::Node, DomError>;

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), DomError>;

    /// Detach `node` from its parent. Removing a detached node is a no-op.
    fn remove(&mut self, node: &Self::Node) -> Result<(), DomError>;

    fn add_class(&mut self, node: &Self::Node, class: &str) -> Result<(), DomError>;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str)
        -> Result<(), DomError>;

    fn set_style_var(&mut self, node: &Self::Node, name: &str, value: &str)
        -> Result<(), DomError>;

    /// Inline style declaration, e.g. `padding-top`
    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str)
        -> Result<(), DomError>;

    fn set_text(&mut self, node: &Self::Node, text: &str) -> Result<(), DomError>;
}

/// Class names the engine uses to recognize and tag nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Markers {
    /// The editable-content container managed by the editor
    pub content_root: String,
    /// Set on the editor root when pagination is active
    pub paginated: String,
    /// Screen-only decoration artifacts: page gaps, break markers, header/footer widgets
    pub decorations: Vec<String>,
    /// Header widget rendered above the first page
    pub first_page_header: String,
    /// Interactive-only editor chrome hidden from print output
    pub chrome: Vec<String>,
    /// Container holding the materialized print pages
    pub print_container: String,
    /// One materialized print page
    pub print_page: String,
    /// Attribute tagging every node a print session injects
    pub session_attribute: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            content_root: "ProseMirror".to_string(),
            paginated: "rm-with-pagination".to_string(),
            decorations: vec![
                "rm-pagination-gap".to_string(),
                "rm-page-break".to_string(),
                "rm-page-header".to_string(),
                "rm-page-footer".to_string(),
            ],
            first_page_header: "rm-first-page-header".to_string(),
            chrome: vec![
                "rm-toolbar".to_string(),
                "rm-bubble-menu".to_string(),
                "rm-drag-handle".to_string(),
            ],
            print_container: "rm-print-pages".to_string(),
            print_page: "rm-print-page".to_string(),
            session_attribute: "data-pager-print-session".to_string(),
        }
    }
}

impl Markers {
    /// Whether `node` is a pagination artifact rather than document content
    pub fn is_artifact<T: DocumentTree>(&self, tree: &T, node: &T::Node) -> bool {
        tree.has_class(node, &self.first_page_header)
            || self
                .decorations
                .iter()
                .any(|class| tree.has_class(node, class))
    }
}
