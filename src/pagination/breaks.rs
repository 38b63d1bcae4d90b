//! Greedy page-break calculation over measured block heights
//!
//! A single left-to-right pass. A block that does not fit the remaining space
//! of a page that already has content starts a new page. A block is never
//! split, so one taller than the whole budget sits alone on an oversized page.

use serde::{Deserialize, Serialize};

/// Allowance for sub-pixel rounding between measuring and rendering
pub const DEFAULT_OVERFLOW_TOLERANCE: f64 = 10.0;

/// Budget for one pagination pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakConfig {
    pub page_content_area_height: f64,
    /// Defaults to [`DEFAULT_OVERFLOW_TOLERANCE`] when absent
    #[serde(default)]
    pub overflow_tolerance: Option<f64>,
}

impl BreakConfig {
    pub fn new(page_content_area_height: f64) -> Self {
        Self {
            page_content_area_height,
            overflow_tolerance: None,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.overflow_tolerance = Some(tolerance);
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.overflow_tolerance.unwrap_or(DEFAULT_OVERFLOW_TOLERANCE)
    }

    /// Largest cumulative height a page may reach without breaking
    pub fn limit(&self) -> f64 {
        self.page_content_area_height + self.tolerance()
    }
}

/// A computed break: block `element_index` starts page `page_index + 1`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBreak {
    /// 1-based index of the page this break creates, counted from the first break
    pub page_index: usize,
    /// Index of the block the break occurs before
    pub element_index: usize,
    /// Cumulative height of the page ending at this break
    pub previous_page_height: f64,
    /// Height of the block that did not fit
    pub trigger_element_height: f64,
}

/// Anything with a measured height
pub trait Measured {
    fn measured_height(&self) -> f64;
}

impl Measured for f64 {
    fn measured_height(&self) -> f64 {
        *self
    }
}

impl<T: Measured + ?Sized> Measured for &T {
    fn measured_height(&self) -> f64 {
        (**self).measured_height()
    }
}

/// Negative and non-finite measurements count as zero height
pub fn sanitize_height(height: f64) -> f64 {
    if height.is_finite() && height > 0.0 {
        height
    } else {
        0.0
    }
}

/// Compute break points for blocks in document order
pub fn calculate_page_breaks<I>(blocks: I, config: &BreakConfig) -> Vec<PageBreak>
where
    I: IntoIterator,
    I::Item: Measured,
{
    let limit = config.limit();
    let mut breaks = Vec::new();
    let mut current_page_height = 0.0;
    let mut page_number = 1;

    for (index, block) in blocks.into_iter().enumerate() {
        let height = sanitize_height(block.measured_height());
        let would_overflow = current_page_height + height > limit;
        let has_content = current_page_height > 0.0;

        // Zero-height blocks stay on the current page, even one already
        // pushed past its budget by an oversized block
        if would_overflow && has_content && height > 0.0 {
            breaks.push(PageBreak {
                page_index: page_number,
                element_index: index,
                previous_page_height: current_page_height,
                trigger_element_height: height,
            });
            page_number += 1;
            current_page_height = height;
        } else {
            current_page_height += height;
        }
    }

    breaks
}
