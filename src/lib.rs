//! doc-pager: pagination and print materialization for a rich-text editor
//!
//! This crate provides the layout side of a paged editing surface:
//! - Page-size and margin catalogs with the derived per-page content budget
//! - Projection of that geometry into the variables the styling layer reads
//! - Greedy page-break calculation over measured block heights
//! - Print/export restructuring of the live document into one wrapper per page
//!
//! The engine works against any [`DocumentTree`]: the browser DOM through
//! [`wasm::WebDocument`], or the in-memory [`MemoryDocument`] used natively.

pub mod dom;
pub mod error;
pub mod geometry;
pub mod pagination;
pub mod plan;
pub mod print;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::{WasmPaginator, WasmPrintCleanup};

// Re-export primary types
pub use dom::{DocumentTree, Markers, MemoryDocument, NodeId};
pub use error::{ConfigError, DomError, PrintError};
pub use geometry::{
    margin_preset, page_format, LayoutConfig, LayoutVariables, MarginPreset, Orientation,
    PageFormat, PageGeometry,
};
pub use pagination::{
    calculate_page_breaks, extract_content_blocks, extract_content_elements, BreakConfig,
    ContentBlock, PageBreak,
};
pub use plan::DocumentPlan;
pub use print::{prepare_paginated_print, print_paginated, PrintCleanup, PrintGeometry, PrintJob};
