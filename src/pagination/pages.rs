//! Page partition derived from a break list

use std::ops::Range;

use serde::Serialize;

use super::breaks::{sanitize_height, BreakConfig, PageBreak};

/// Number of pages produced by `breaks` over `block_count` blocks
pub fn page_count(block_count: usize, breaks: &[PageBreak]) -> usize {
    if block_count == 0 {
        0
    } else {
        breaks.len() + 1
    }
}

/// Block index ranges of each page, in page order
///
/// Concatenating the ranges yields `0..block_count` exactly. Breaks must come
/// from [`super::calculate_page_breaks`] over the same blocks.
pub fn page_ranges(block_count: usize, breaks: &[PageBreak]) -> Vec<Range<usize>> {
    if block_count == 0 {
        return Vec::new();
    }

    let mut ranges = Vec::with_capacity(breaks.len() + 1);
    let mut start = 0;
    for page_break in breaks {
        let end = page_break.element_index.min(block_count);
        if end > start {
            ranges.push(start..end);
            start = end;
        }
    }
    ranges.push(start..block_count);
    ranges
}

/// Summary of one page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpan {
    /// 1-based page number
    pub page_number: usize,
    pub blocks: Range<usize>,
    /// Sum of the page's block heights
    pub content_height: f64,
    /// The page exceeds its budget because of a block that could not be split
    pub overflows: bool,
}

/// Per-page summaries for the given heights and breaks
pub fn page_spans(heights: &[f64], breaks: &[PageBreak], config: &BreakConfig) -> Vec<PageSpan> {
    page_ranges(heights.len(), breaks)
        .into_iter()
        .enumerate()
        .map(|(index, blocks)| {
            let content_height: f64 = heights[blocks.clone()]
                .iter()
                .copied()
                .map(sanitize_height)
                .sum();
            PageSpan {
                page_number: index + 1,
                blocks,
                content_height,
                overflows: content_height > config.limit(),
            }
        })
        .collect()
}

/// Indices of blocks taller than `max_child_height`
pub fn oversized_blocks(heights: &[f64], max_child_height: f64) -> Vec<usize> {
    heights
        .iter()
        .enumerate()
        .filter(|(_, height)| sanitize_height(**height) > max_child_height)
        .map(|(index, _)| index)
        .collect()
}
