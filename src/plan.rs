//! Document plans: a layout plus pre-measured blocks, built into a
//! [`MemoryDocument`] for native pagination and export

use serde::Deserialize;

use crate::dom::{DocumentTree, Markers, MemoryDocument, NodeId};
use crate::error::{ConfigError, DomError};
use crate::geometry::{LayoutConfig, LayoutVariables};

/// One top-level block of a plan
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlockSpec {
    #[serde(default = "BlockSpec::default_tag")]
    pub tag: String,
    pub height: f64,
    #[serde(default)]
    pub text: String,
}

impl BlockSpec {
    fn default_tag() -> String {
        "p".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentPlan {
    #[serde(default)]
    pub layout: LayoutConfig,
    pub blocks: Vec<BlockSpec>,
}

/// A built plan: the document and its editor root
#[derive(Debug)]
pub struct PlannedDocument {
    pub document: MemoryDocument,
    pub root: NodeId,
    pub content: NodeId,
}

impl DocumentPlan {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the editor tree and publish the layout onto its root
    pub fn build(&self, markers: &Markers) -> Result<PlannedDocument, DomError> {
        let mut document = MemoryDocument::new();
        let root = document.create_in_body("div");
        let content = document.create_child(root, "div");
        document.with_class(content, &markers.content_root);

        LayoutVariables::project(&self.layout.resolve()).publish(&mut document, &root, markers)?;

        for block in &self.blocks {
            let node = document.create_block(content, &block.tag, block.height);
            if !block.text.is_empty() {
                document.set_text(&node, &block.text)?;
            }
        }

        Ok(PlannedDocument {
            document,
            root,
            content,
        })
    }

    pub fn heights(&self) -> Vec<f64> {
        self.blocks.iter().map(|b| b.height).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::extract_content_blocks;

    const PLAN: &str = r#"{
        "layout": { "format": "A4", "margins": "narrow" },
        "blocks": [
            { "tag": "h1", "height": 48, "text": "Title" },
            { "height": 300 },
            { "tag": "ul", "height": 120 }
        ]
    }"#;

    #[test]
    fn test_parse_plan() {
        let plan = DocumentPlan::from_json(PLAN).unwrap();
        assert_eq!(plan.layout.format, "A4");
        assert_eq!(plan.blocks.len(), 3);
        assert_eq!(plan.blocks[1].tag, "p");
        assert_eq!(plan.heights(), vec![48.0, 300.0, 120.0]);
    }

    #[test]
    fn test_layout_is_optional() {
        let plan = DocumentPlan::from_json(r#"{"blocks":[]}"#).unwrap();
        assert_eq!(plan.layout, LayoutConfig::default());
        assert!(DocumentPlan::from_json(r#"{"layout":{}}"#).is_err());
    }

    #[test]
    fn test_build() {
        let markers = Markers::default();
        let planned = DocumentPlan::from_json(PLAN).unwrap().build(&markers).unwrap();
        let doc = &planned.document;

        assert!(doc.has_class(&planned.root, &markers.paginated));
        let blocks = extract_content_blocks(doc, &planned.root, &markers);
        assert_eq!(blocks.len(), 3);
        assert_eq!(doc.tag_name(&blocks[0].node), "h1");
        assert_eq!(doc.text(blocks[0].node), Some("Title"));
        assert_eq!(blocks[2].height, 120.0);
    }
}
