//! Page geometry: format and margin catalogs, layout configuration, and the
//! variable projection consumed by the styling layer

mod layout;
mod margins;
mod page_format;
mod variables;

pub use layout::{
    LayoutConfig, Orientation, PageGeometry, CHILD_SAFETY_MARGIN, DEFAULT_BORDER_COLOR,
    DEFAULT_CONTENT_MARGIN, DEFAULT_FOOTER_HEIGHT, DEFAULT_HEADER_HEIGHT, DEFAULT_PAGE_GAP,
};
pub use margins::{margin_preset, margin_preset_names, MarginPreset, DEFAULT_MARGIN_PRESET};
pub use page_format::{
    page_format, page_format_names, px_to_mm, PageFormat, DEFAULT_PAGE_FORMAT, DPI, MM_PER_PX,
};
pub use variables::{format_px, parse_px, LayoutVariables};

/// Variable names published by [`LayoutVariables::publish`]
pub mod vars {
    pub use super::variables::{
        VAR_CONTENT_MARGIN_BOTTOM, VAR_CONTENT_MARGIN_TOP, VAR_CONTENT_WIDTH, VAR_FOOTER_HEIGHT,
        VAR_GAP_BORDER_COLOR, VAR_HEADER_HEIGHT, VAR_MARGIN_BOTTOM, VAR_MARGIN_LEFT,
        VAR_MARGIN_RIGHT, VAR_MARGIN_TOP, VAR_MAX_CHILD_HEIGHT, VAR_PAGE_CONTENT_HEIGHT,
        VAR_PAGE_GAP, VAR_PAGE_HEIGHT, VAR_PAGE_WIDTH,
    };
}
