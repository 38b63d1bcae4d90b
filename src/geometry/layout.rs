//! Per-render layout configuration and the geometry derived from it

use serde::{Deserialize, Serialize};

use super::margins::MarginPreset;
use super::page_format::{page_format, PageFormat, DEFAULT_PAGE_FORMAT};
use crate::error::ConfigError;

/// Default height reserved for the per-page header
pub const DEFAULT_HEADER_HEIGHT: f64 = 30.0;

/// Default height reserved for the per-page footer
pub const DEFAULT_FOOTER_HEIGHT: f64 = 30.0;

/// Default spacing between header/footer and content
pub const DEFAULT_CONTENT_MARGIN: f64 = 10.0;

/// Default on-screen gap between pages
pub const DEFAULT_PAGE_GAP: f64 = 50.0;

pub const DEFAULT_BORDER_COLOR: &str = "#e5e5e5";

/// A single block is flagged this many pixels before it fills a page
pub const CHILD_SAFETY_MARGIN: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Layout configuration as supplied by the host, typically as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Page format name, see [`page_format`]
    pub format: String,
    pub orientation: Orientation,
    /// Margin preset name; the format's own margins apply when absent
    pub margins: Option<String>,
    pub margin_top: Option<f64>,
    pub margin_bottom: Option<f64>,
    pub margin_left: Option<f64>,
    pub margin_right: Option<f64>,
    pub page_header_height: f64,
    pub page_footer_height: f64,
    pub content_margin_top: f64,
    pub content_margin_bottom: f64,
    /// Screen-only gap between pages
    pub page_gap: f64,
    /// Screen-only gap border color
    pub page_gap_border_color: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_PAGE_FORMAT.to_string(),
            orientation: Orientation::Portrait,
            margins: None,
            margin_top: None,
            margin_bottom: None,
            margin_left: None,
            margin_right: None,
            page_header_height: DEFAULT_HEADER_HEIGHT,
            page_footer_height: DEFAULT_FOOTER_HEIGHT,
            content_margin_top: DEFAULT_CONTENT_MARGIN,
            content_margin_bottom: DEFAULT_CONTENT_MARGIN,
            page_gap: DEFAULT_PAGE_GAP,
            page_gap_border_color: DEFAULT_BORDER_COLOR.to_string(),
        }
    }
}

impl LayoutConfig {
    /// Configuration for a named page format with default chrome
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            ..Self::default()
        }
    }

    /// Parse a host-supplied JSON configuration; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_margins(mut self, preset: impl Into<String>) -> Self {
        self.margins = Some(preset.into());
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Resolve names and overrides into concrete pixel geometry
    pub fn resolve(&self) -> PageGeometry {
        let mut format = page_format(&self.format);
        if let Some(name) = &self.margins {
            format = format.with_margins(super::margin_preset(name));
        }
        if self.orientation == Orientation::Landscape {
            format = format.landscape();
        }

        let margins = MarginPreset {
            top: self.margin_top.unwrap_or(format.margin_top),
            bottom: self.margin_bottom.unwrap_or(format.margin_bottom),
            left: self.margin_left.unwrap_or(format.margin_left),
            right: self.margin_right.unwrap_or(format.margin_right),
        };

        PageGeometry {
            format: format.with_margins(margins),
            page_header_height: self.page_header_height,
            page_footer_height: self.page_footer_height,
            content_margin_top: self.content_margin_top,
            content_margin_bottom: self.content_margin_bottom,
            page_gap: self.page_gap,
            page_gap_border_color: self.page_gap_border_color.clone(),
        }
    }
}

/// Concrete pixel geometry for one render
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    pub format: PageFormat,
    pub page_header_height: f64,
    pub page_footer_height: f64,
    pub content_margin_top: f64,
    pub content_margin_bottom: f64,
    pub page_gap: f64,
    pub page_gap_border_color: String,
}

impl PageGeometry {
    /// Vertical budget available to content blocks on one page
    pub fn content_area_height(&self) -> f64 {
        self.format.page_height
            - self.page_header_height
            - self.page_footer_height
            - self.content_margin_top
            - self.content_margin_bottom
            - self.format.margin_top
            - self.format.margin_bottom
    }

    /// Height above which a single block is reported as oversized
    pub fn max_content_child_height(&self) -> f64 {
        self.content_area_height() - CHILD_SAFETY_MARGIN
    }

    /// Horizontal space between the left and right margins
    pub fn content_width(&self) -> f64 {
        self.format.page_width - self.format.margin_left - self.format.margin_right
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        LayoutConfig::default().resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_area_height_letter() {
        let geometry = LayoutConfig::default().resolve();
        // 1056 - 30 - 30 - 10 - 10 - 96 - 96
        assert_eq!(geometry.content_area_height(), 784.0);
        assert_eq!(geometry.max_content_child_height(), 774.0);
        assert_eq!(geometry.content_width(), 624.0);
    }

    #[test]
    fn test_margin_preset_applies() {
        let geometry = LayoutConfig::new("A4").with_margins("narrow").resolve();
        // 1123 - 30 - 30 - 10 - 10 - 48 - 48
        assert_eq!(geometry.content_area_height(), 947.0);
        assert_eq!(geometry.format.margin_left, 48.0);
    }

    #[test]
    fn test_explicit_margins_override_preset() {
        let config = LayoutConfig {
            margin_top: Some(20.0),
            margin_bottom: Some(20.0),
            ..LayoutConfig::new("Letter").with_margins("wide")
        };
        let geometry = config.resolve();
        assert_eq!(geometry.format.margin_top, 20.0);
        assert_eq!(geometry.format.margin_left, 192.0);
        assert_eq!(geometry.content_area_height(), 1056.0 - 60.0 - 20.0 - 40.0);
    }

    #[test]
    fn test_landscape() {
        let geometry = LayoutConfig::new("Letter")
            .with_orientation(Orientation::Landscape)
            .resolve();
        assert_eq!(geometry.format.page_width, 1056.0);
        assert_eq!(geometry.format.page_height, 816.0);
        assert_eq!(geometry.content_area_height(), 816.0 - 80.0 - 192.0);
    }

    #[test]
    fn test_from_json_defaults_missing_fields() {
        let config = LayoutConfig::from_json(r#"{"format":"A4","pageHeaderHeight":0}"#).unwrap();
        assert_eq!(config.format, "A4");
        assert_eq!(config.page_header_height, 0.0);
        assert_eq!(config.page_footer_height, DEFAULT_FOOTER_HEIGHT);
        assert_eq!(config.page_gap_border_color, DEFAULT_BORDER_COLOR);

        let config = LayoutConfig::from_json(r#"{"orientation":"landscape","margins":"narrow"}"#)
            .unwrap();
        assert_eq!(config.orientation, Orientation::Landscape);
        assert_eq!(config.margins.as_deref(), Some("narrow"));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(LayoutConfig::from_json("{format: A4").is_err());
        assert!(LayoutConfig::from_json(r#"{"pageGap":"wide"}"#).is_err());
    }
}
