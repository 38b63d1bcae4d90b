//! Named margin profiles

use serde::{Deserialize, Serialize};

/// Preset used when a name is not in the catalog
pub const DEFAULT_MARGIN_PRESET: &str = "normal";

/// Page margins in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginPreset {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl MarginPreset {
    pub const fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self { top, bottom, left, right }
    }

    pub const fn uniform(px: f64) -> Self {
        Self::new(px, px, px, px)
    }

    /// Look up a preset by name, case-insensitively
    pub fn lookup(name: &str) -> Option<MarginPreset> {
        MARGIN_PRESETS
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name.trim()))
            .map(|(_, preset)| *preset)
    }
}

impl Default for MarginPreset {
    fn default() -> Self {
        MARGIN_PRESETS[0].1
    }
}

static MARGIN_PRESETS: [(&str, MarginPreset); 3] = [
    ("normal", MarginPreset::uniform(96.0)),
    ("narrow", MarginPreset::uniform(48.0)),
    ("wide", MarginPreset::new(96.0, 96.0, 192.0, 192.0)),
];

/// Look up a margin preset; unknown names resolve to "normal"
pub fn margin_preset(name: &str) -> MarginPreset {
    MarginPreset::lookup(name).unwrap_or_default()
}

/// Catalog names in listing order
pub fn margin_preset_names() -> impl Iterator<Item = &'static str> {
    MARGIN_PRESETS.iter().map(|(name, _)| *name)
}
