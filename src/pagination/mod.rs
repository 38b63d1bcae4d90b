//! Pagination: break calculation over measured heights and the extraction of
//! the blocks those heights belong to

mod breaks;
mod extract;
mod pages;

pub use breaks::{
    calculate_page_breaks, sanitize_height, BreakConfig, Measured, PageBreak,
    DEFAULT_OVERFLOW_TOLERANCE,
};
pub use extract::{extract_content_blocks, extract_content_elements, BreakHint, ContentBlock};
pub use pages::{oversized_blocks, page_count, page_ranges, page_spans, PageSpan};
