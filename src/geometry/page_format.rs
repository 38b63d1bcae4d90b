//! Named physical page formats at 96 DPI

use serde::{Deserialize, Serialize};

use super::margins::MarginPreset;

/// Pixels per inch used by every catalog entry
pub const DPI: f64 = 96.0;

/// Millimeters covered by one CSS pixel at 96 DPI
pub const MM_PER_PX: f64 = 0.264583;

/// Format used when a name is not in the catalog
pub const DEFAULT_PAGE_FORMAT: &str = "Letter";

/// Physical page dimensions and default margins, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFormat {
    pub page_height: f64,
    pub page_width: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
}

const fn format(width: f64, height: f64, margin_y: f64, margin_x: f64) -> PageFormat {
    PageFormat {
        page_height: height,
        page_width: width,
        margin_top: margin_y,
        margin_bottom: margin_y,
        margin_left: margin_x,
        margin_right: margin_x,
    }
}

/// Catalog in listing order: ISO sizes first, then North American ones
static PAGE_FORMATS: [(&str, PageFormat); 6] = [
    ("A4", format(794.0, 1123.0, 96.0, 96.0)),
    ("A3", format(1123.0, 1587.0, 96.0, 96.0)),
    ("A5", format(559.0, 794.0, 72.0, 72.0)),
    ("Letter", format(816.0, 1056.0, 96.0, 96.0)),
    ("Legal", format(816.0, 1344.0, 96.0, 96.0)),
    ("Tabloid", format(1056.0, 1632.0, 96.0, 96.0)),
];

impl PageFormat {
    /// Look up a format by name, case-insensitively
    pub fn lookup(name: &str) -> Option<PageFormat> {
        PAGE_FORMATS
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name.trim()))
            .map(|(_, format)| *format)
    }

    /// Same rotation applied to page and margins: top becomes right
    pub fn landscape(self) -> Self {
        if self.page_width >= self.page_height {
            return self;
        }
        Self {
            page_height: self.page_width,
            page_width: self.page_height,
            margin_top: self.margin_left,
            margin_bottom: self.margin_right,
            margin_left: self.margin_bottom,
            margin_right: self.margin_top,
        }
    }

    /// Replace the format's default margins
    pub fn with_margins(self, margins: MarginPreset) -> Self {
        Self {
            margin_top: margins.top,
            margin_bottom: margins.bottom,
            margin_left: margins.left,
            margin_right: margins.right,
            ..self
        }
    }

    /// Page width in millimeters
    pub fn width_mm(&self) -> f64 {
        px_to_mm(self.page_width)
    }

    /// Page height in millimeters
    pub fn height_mm(&self) -> f64 {
        px_to_mm(self.page_height)
    }
}

impl Default for PageFormat {
    fn default() -> Self {
        page_format(DEFAULT_PAGE_FORMAT)
    }
}

/// Look up a format by name; unknown names resolve to US Letter
pub fn page_format(name: &str) -> PageFormat {
    PageFormat::lookup(name).unwrap_or(PAGE_FORMATS[3].1)
}

/// Catalog names in listing order
pub fn page_format_names() -> impl Iterator<Item = &'static str> {
    PAGE_FORMATS.iter().map(|(name, _)| *name)
}

/// Convert CSS pixels to millimeters
pub fn px_to_mm(px: f64) -> f64 {
    px * MM_PER_PX
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::margin_preset;

    #[test]
    fn test_lookup_known_formats() {
        let a4 = page_format("A4");
        assert_eq!(a4.page_width, 794.0);
        assert_eq!(a4.page_height, 1123.0);

        let letter = page_format("letter");
        assert_eq!(letter.page_width, 816.0);
        assert_eq!(letter.page_height, 1056.0);
        assert_eq!(letter.margin_top, 96.0);
    }

    #[test]
    fn test_unknown_format_falls_back_to_letter() {
        assert_eq!(page_format("B5"), page_format("Letter"));
        assert!(PageFormat::lookup("B5").is_none());
        assert_eq!(PageFormat::default(), page_format("Letter"));
    }

    #[test]
    fn test_catalog_names() {
        let names: Vec<_> = page_format_names().collect();
        assert_eq!(names, vec!["A4", "A3", "A5", "Letter", "Legal", "Tabloid"]);
        for name in names {
            assert!(PageFormat::lookup(name).is_some());
        }
    }

    #[test]
    fn test_landscape_rotates_page_and_margins() {
        let portrait = page_format("A5");
        let landscape = portrait.landscape();
        assert_eq!(landscape.page_width, portrait.page_height);
        assert_eq!(landscape.page_height, portrait.page_width);
        assert_eq!(landscape.landscape(), landscape);
    }

    #[test]
    fn test_with_margins() {
        let narrow = page_format("A4").with_margins(margin_preset("narrow"));
        assert_eq!(narrow.margin_top, 48.0);
        assert_eq!(narrow.margin_left, 48.0);
        assert_eq!(narrow.page_height, 1123.0);
    }

    #[test]
    fn test_mm_conversion() {
        let letter = page_format("Letter");
        assert!((letter.width_mm() - 215.9).abs() < 0.01);
        assert!((letter.height_mm() - 279.4).abs() < 0.01);
    }
}
