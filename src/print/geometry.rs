//! Geometry read back from the variables published on the editor root

use serde::Serialize;

use crate::dom::DocumentTree;
use crate::geometry::{parse_px, vars};

pub const FALLBACK_PAGE_WIDTH: f64 = 816.0;
pub const FALLBACK_CONTENT_HEIGHT: f64 = 800.0;
pub const FALLBACK_HEADER_HEIGHT: f64 = 30.0;
pub const FALLBACK_FOOTER_HEIGHT: f64 = 30.0;
pub const FALLBACK_CONTENT_MARGIN: f64 = 10.0;
pub const FALLBACK_MARGIN: f64 = 96.0;

/// Page widths outside this range are treated as corrupted
pub const PLAUSIBLE_PAGE_WIDTH: std::ops::RangeInclusive<f64> = 100.0..=5000.0;

/// Print-time page geometry in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintGeometry {
    pub page_width: f64,
    pub page_content_height: f64,
    pub page_header_height: f64,
    pub page_footer_height: f64,
    pub content_margin_top: f64,
    pub content_margin_bottom: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
}

impl Default for PrintGeometry {
    fn default() -> Self {
        Self {
            page_width: FALLBACK_PAGE_WIDTH,
            page_content_height: FALLBACK_CONTENT_HEIGHT,
            page_header_height: FALLBACK_HEADER_HEIGHT,
            page_footer_height: FALLBACK_FOOTER_HEIGHT,
            content_margin_top: FALLBACK_CONTENT_MARGIN,
            content_margin_bottom: FALLBACK_CONTENT_MARGIN,
            margin_top: FALLBACK_MARGIN,
            margin_bottom: FALLBACK_MARGIN,
            margin_left: FALLBACK_MARGIN,
            margin_right: FALLBACK_MARGIN,
        }
    }
}

impl PrintGeometry {
    /// Read every value from `root`, substituting the fallback for anything
    /// missing, unparsable, or implausible
    pub fn read_back<T: DocumentTree>(tree: &T, root: &T::Node) -> Self {
        let read = |name: &str, fallback: f64| read_px(tree, root, name, fallback);

        let mut page_width = read(vars::VAR_PAGE_WIDTH, FALLBACK_PAGE_WIDTH);
        if !PLAUSIBLE_PAGE_WIDTH.contains(&page_width) {
            tracing::warn!(
                page_width,
                fallback = FALLBACK_PAGE_WIDTH,
                "implausible page width, using fallback"
            );
            page_width = FALLBACK_PAGE_WIDTH;
        }

        Self {
            page_width,
            page_content_height: read(vars::VAR_PAGE_CONTENT_HEIGHT, FALLBACK_CONTENT_HEIGHT),
            page_header_height: read(vars::VAR_HEADER_HEIGHT, FALLBACK_HEADER_HEIGHT),
            page_footer_height: read(vars::VAR_FOOTER_HEIGHT, FALLBACK_FOOTER_HEIGHT),
            content_margin_top: read(vars::VAR_CONTENT_MARGIN_TOP, FALLBACK_CONTENT_MARGIN),
            content_margin_bottom: read(vars::VAR_CONTENT_MARGIN_BOTTOM, FALLBACK_CONTENT_MARGIN),
            margin_top: read(vars::VAR_MARGIN_TOP, FALLBACK_MARGIN),
            margin_bottom: read(vars::VAR_MARGIN_BOTTOM, FALLBACK_MARGIN),
            margin_left: read(vars::VAR_MARGIN_LEFT, FALLBACK_MARGIN),
            margin_right: read(vars::VAR_MARGIN_RIGHT, FALLBACK_MARGIN),
        }
    }

    /// Space above the content on each printed page
    pub fn padding_top(&self) -> f64 {
        self.margin_top + self.page_header_height + self.content_margin_top
    }

    /// Space below the content on each printed page
    pub fn padding_bottom(&self) -> f64 {
        self.margin_bottom + self.page_footer_height + self.content_margin_bottom
    }

    /// Physical page height, rebuilt from the content budget
    pub fn page_height(&self) -> f64 {
        self.padding_top() + self.page_content_height + self.padding_bottom()
    }
}

fn read_px<T: DocumentTree>(tree: &T, root: &T::Node, name: &str, fallback: f64) -> f64 {
    match tree.style_var(root, name) {
        Some(raw) => match parse_px(&raw) {
            Some(value) => value,
            None => {
                tracing::warn!(variable = name, raw = %raw, fallback, "unparsable layout variable");
                fallback
            }
        },
        None => {
            tracing::warn!(variable = name, fallback, "missing layout variable");
            fallback
        }
    }
}
