//! Layout geometry published as named styling variables
//!
//! The projector writes every value once onto the render target. The screen
//! decoration layer and the print materializer both read the same values back,
//! so a page break can never be computed from two different budgets.

use serde::Serialize;

use super::layout::PageGeometry;
use crate::dom::{DocumentTree, Markers};
use crate::error::DomError;

pub const VAR_PAGE_CONTENT_HEIGHT: &str = "--rm-page-content-height";
pub const VAR_MAX_CHILD_HEIGHT: &str = "--rm-max-content-child-height";
pub const VAR_PAGE_HEIGHT: &str = "--rm-page-height";
pub const VAR_PAGE_WIDTH: &str = "--rm-page-width";
pub const VAR_CONTENT_WIDTH: &str = "--rm-content-width";
pub const VAR_MARGIN_TOP: &str = "--rm-margin-top";
pub const VAR_MARGIN_BOTTOM: &str = "--rm-margin-bottom";
pub const VAR_MARGIN_LEFT: &str = "--rm-margin-left";
pub const VAR_MARGIN_RIGHT: &str = "--rm-margin-right";
pub const VAR_HEADER_HEIGHT: &str = "--rm-page-header-height";
pub const VAR_FOOTER_HEIGHT: &str = "--rm-page-footer-height";
pub const VAR_CONTENT_MARGIN_TOP: &str = "--rm-content-margin-top";
pub const VAR_CONTENT_MARGIN_BOTTOM: &str = "--rm-content-margin-bottom";
pub const VAR_PAGE_GAP: &str = "--rm-page-gap";
pub const VAR_GAP_BORDER_COLOR: &str = "--rm-page-gap-border-color";

/// Typed projection of [`PageGeometry`], one field per published variable
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutVariables {
    pub page_content_height: f64,
    pub max_content_child_height: f64,
    pub page_height: f64,
    pub page_width: f64,
    pub content_width: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub page_header_height: f64,
    pub page_footer_height: f64,
    pub content_margin_top: f64,
    pub content_margin_bottom: f64,
    pub page_gap: f64,
    pub page_gap_border_color: String,
}

impl LayoutVariables {
    pub fn project(geometry: &PageGeometry) -> Self {
        Self {
            page_content_height: geometry.content_area_height(),
            max_content_child_height: geometry.max_content_child_height(),
            page_height: geometry.format.page_height,
            page_width: geometry.format.page_width,
            content_width: geometry.content_width(),
            margin_top: geometry.format.margin_top,
            margin_bottom: geometry.format.margin_bottom,
            margin_left: geometry.format.margin_left,
            margin_right: geometry.format.margin_right,
            page_header_height: geometry.page_header_height,
            page_footer_height: geometry.page_footer_height,
            content_margin_top: geometry.content_margin_top,
            content_margin_bottom: geometry.content_margin_bottom,
            page_gap: geometry.page_gap,
            page_gap_border_color: geometry.page_gap_border_color.clone(),
        }
    }

    /// Variable name and encoded value pairs, in publishing order
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            (VAR_PAGE_CONTENT_HEIGHT, format_px(self.page_content_height)),
            (VAR_MAX_CHILD_HEIGHT, format_px(self.max_content_child_height)),
            (VAR_PAGE_HEIGHT, format_px(self.page_height)),
            (VAR_PAGE_WIDTH, format_px(self.page_width)),
            (VAR_CONTENT_WIDTH, format_px(self.content_width)),
            (VAR_MARGIN_TOP, format_px(self.margin_top)),
            (VAR_MARGIN_BOTTOM, format_px(self.margin_bottom)),
            (VAR_MARGIN_LEFT, format_px(self.margin_left)),
            (VAR_MARGIN_RIGHT, format_px(self.margin_right)),
            (VAR_HEADER_HEIGHT, format_px(self.page_header_height)),
            (VAR_FOOTER_HEIGHT, format_px(self.page_footer_height)),
            (VAR_CONTENT_MARGIN_TOP, format_px(self.content_margin_top)),
            (VAR_CONTENT_MARGIN_BOTTOM, format_px(self.content_margin_bottom)),
            (VAR_PAGE_GAP, format_px(self.page_gap)),
            (VAR_GAP_BORDER_COLOR, self.page_gap_border_color.clone()),
        ]
    }

    /// Write all variables onto `target` and mark it as paginated
    pub fn publish<T: DocumentTree>(
        &self,
        tree: &mut T,
        target: &T::Node,
        markers: &Markers,
    ) -> Result<(), DomError> {
        for (name, value) in self.entries() {
            tree.set_style_var(target, name, &value)?;
        }
        tree.add_class(target, &markers.paginated)?;
        tracing::debug!(
            content_height = self.page_content_height,
            page_width = self.page_width,
            "published layout variables"
        );
        Ok(())
    }
}

/// Encode a pixel value the way the styling layer expects it
pub fn format_px(value: f64) -> String {
    format!("{}px", value)
}

/// Decode a pixel value; `None` for anything not a finite number
pub fn parse_px(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let number = raw.strip_suffix("px").unwrap_or(raw).trim();
    if number.is_empty() {
        return None;
    }
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDocument;
    use crate::geometry::LayoutConfig;

    #[test]
    fn test_projection_matches_geometry() {
        let geometry = LayoutConfig::new("A4").resolve();
        let vars = LayoutVariables::project(&geometry);
        assert_eq!(vars.page_content_height, geometry.content_area_height());
        assert_eq!(vars.max_content_child_height, vars.page_content_height - 10.0);
        assert_eq!(vars.page_width, 794.0);
    }

    #[test]
    fn test_entries_use_px_suffix() {
        let vars = LayoutVariables::project(&LayoutConfig::default().resolve());
        let entries = vars.entries();
        assert_eq!(entries[0], (VAR_PAGE_CONTENT_HEIGHT, "784px".to_string()));
        assert_eq!(
            entries.last().unwrap(),
            &(VAR_GAP_BORDER_COLOR, "#e5e5e5".to_string())
        );
    }

    #[test]
    fn test_publish_writes_every_entry() {
        let mut doc = MemoryDocument::new();
        let root = doc.create_in_body("div");
        let markers = Markers::default();
        let vars = LayoutVariables::project(&LayoutConfig::default().resolve());

        vars.publish(&mut doc, &root, &markers).unwrap();

        assert!(doc.has_class(&root, &markers.paginated));
        for (name, value) in vars.entries() {
            assert_eq!(doc.style_var(&root, name).as_deref(), Some(value.as_str()));
        }
    }

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("784px"), Some(784.0));
        assert_eq!(parse_px(" 12.5px "), Some(12.5));
        assert_eq!(parse_px("30"), Some(30.0));
        assert_eq!(parse_px(""), None);
        assert_eq!(parse_px("px"), None);
        assert_eq!(parse_px("auto"), None);
        assert_eq!(parse_px("NaNpx"), None);
        assert_eq!(parse_px("infpx"), None);
    }

    #[test]
    fn test_format_px() {
        assert_eq!(format_px(96.0), "96px");
        assert_eq!(format_px(12.5), "12.5px");
    }
}
