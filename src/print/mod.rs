//! Print/export: geometry read-back, page materialization, output styling

mod geometry;
mod materialize;
mod session;
mod style;

pub use geometry::{
    PrintGeometry, FALLBACK_CONTENT_HEIGHT, FALLBACK_CONTENT_MARGIN, FALLBACK_FOOTER_HEIGHT,
    FALLBACK_HEADER_HEIGHT, FALLBACK_MARGIN, FALLBACK_PAGE_WIDTH, PLAUSIBLE_PAGE_WIDTH,
};
pub use materialize::{prepare_paginated_print, PrintCleanup, PRINT_OVERFLOW_TOLERANCE};
pub use session::{print_paginated, PrintJob, PrintTarget, CLEANUP_DELAY_MS};
pub use style::print_stylesheet;
