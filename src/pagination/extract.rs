//! Top-level content blocks of the live document

use super::breaks::Measured;
use crate::dom::{DocumentTree, Markers};

/// Print-time keep hint carried by some block kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakHint {
    #[default]
    None,
    /// Headings stay with the block after them
    KeepWithNext,
    /// Lists are not split across pages
    AvoidInside,
}

impl BreakHint {
    pub fn for_tag(tag: &str) -> Self {
        match tag {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => BreakHint::KeepWithNext,
            "ul" | "ol" | "li" => BreakHint::AvoidInside,
            _ => BreakHint::None,
        }
    }
}

/// One unsplittable unit of document content
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBlock<N> {
    pub node: N,
    pub height: f64,
    pub hint: BreakHint,
}

impl<N> Measured for ContentBlock<N> {
    fn measured_height(&self) -> f64 {
        self.height
    }
}

/// Immediate children of the editable root, minus pagination artifacts
///
/// Order is document order; break `element_index` values index this sequence.
pub fn extract_content_elements<T: DocumentTree>(
    tree: &T,
    root: &T::Node,
    markers: &Markers,
) -> Vec<T::Node> {
    let Some(content_root) = tree.find_by_class(root, &markers.content_root) else {
        return Vec::new();
    };

    tree.children(&content_root)
        .into_iter()
        .filter(|node| !markers.is_artifact(tree, node))
        .collect()
}

/// [`extract_content_elements`] with each block's height and hint
pub fn extract_content_blocks<T: DocumentTree>(
    tree: &T,
    root: &T::Node,
    markers: &Markers,
) -> Vec<ContentBlock<T::Node>> {
    extract_content_elements(tree, root, markers)
        .into_iter()
        .map(|node| ContentBlock {
            height: tree.height(&node),
            hint: BreakHint::for_tag(&tree.tag_name(&node)),
            node,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDocument, NodeId};

    fn editor(doc: &mut MemoryDocument, markers: &Markers) -> (NodeId, NodeId) {
        let root = doc.create_in_body("div");
        let content = doc.create_child(root, "div");
        doc.with_class(content, &markers.content_root);
        (root, content)
    }

    #[test]
    fn test_missing_content_root() {
        let mut doc = MemoryDocument::new();
        let root = doc.create_in_body("div");
        doc.create_block(root, "p", 20.0);
        assert!(extract_content_elements(&doc, &root, &Markers::default()).is_empty());
    }

    #[test]
    fn test_empty_content_root() {
        let markers = Markers::default();
        let mut doc = MemoryDocument::new();
        let (root, _) = editor(&mut doc, &markers);
        assert!(extract_content_blocks(&doc, &root, &markers).is_empty());
    }

    #[test]
    fn test_filters_artifacts_in_order() {
        let markers = Markers::default();
        let mut doc = MemoryDocument::new();
        let (root, content) = editor(&mut doc, &markers);

        let header = doc.create_child(content, "div");
        doc.with_class(header, &markers.first_page_header);
        let p1 = doc.create_block(content, "p", 40.0);
        let gap = doc.create_child(content, "div");
        doc.with_class(gap, "rm-pagination-gap");
        let h2 = doc.create_block(content, "h2", 30.0);
        let footer = doc.create_child(content, "div");
        doc.with_class(footer, "rm-page-footer");
        let list = doc.create_block(content, "ul", 90.0);

        assert_eq!(extract_content_elements(&doc, &root, &markers), vec![p1, h2, list]);

        let blocks = extract_content_blocks(&doc, &root, &markers);
        let heights: Vec<_> = blocks.iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![40.0, 30.0, 90.0]);
        let hints: Vec<_> = blocks.iter().map(|b| b.hint).collect();
        assert_eq!(
            hints,
            vec![BreakHint::None, BreakHint::KeepWithNext, BreakHint::AvoidInside]
        );
    }

    #[test]
    fn test_nested_children_are_not_blocks() {
        let markers = Markers::default();
        let mut doc = MemoryDocument::new();
        let (root, content) = editor(&mut doc, &markers);
        let list = doc.create_block(content, "ol", 60.0);
        doc.create_block(list, "li", 20.0);
        doc.create_block(list, "li", 20.0);

        assert_eq!(extract_content_elements(&doc, &root, &markers), vec![list]);
    }

    #[test]
    fn test_content_root_found_when_nested() {
        let markers = Markers::default();
        let mut doc = MemoryDocument::new();
        let root = doc.create_in_body("div");
        let wrapper = doc.create_child(root, "div");
        let content = doc.create_child(wrapper, "div");
        doc.with_class(content, &markers.content_root);
        let p = doc.create_block(content, "p", 10.0);

        assert_eq!(extract_content_elements(&doc, &root, &markers), vec![p]);
    }
}
