//! Print materialization by wrapper restructuring
//!
//! Content blocks are deep-cloned into one container per page, placed in a
//! print-only container next to the editable root. Each page carries its own
//! padding, so padding never accumulates across page boundaries. The live
//! editable tree is never moved.
//!
//! Pages also carry the content root's class, so editor rules scoped to it
//! (`.ProseMirror p { ... }`) size the clones exactly as they sized the live
//! blocks that were measured.

use std::sync::atomic::{AtomicU64, Ordering};

use super::geometry::PrintGeometry;
use super::style::print_stylesheet;
use crate::dom::{DocumentTree, Markers};
use crate::error::DomError;
use crate::geometry::format_px;
use crate::pagination::{
    calculate_page_breaks, extract_content_blocks, page_ranges, BreakConfig, BreakHint,
    ContentBlock,
};

/// Print always uses the same tolerance as on-screen decoration
pub const PRINT_OVERFLOW_TOLERANCE: f64 = 10.0;

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

/// Handle undoing everything one print session injected
#[derive(Debug)]
pub struct PrintCleanup<N> {
    session: u64,
    page_count: usize,
    /// In injection order
    injected: Vec<N>,
    restored: bool,
}

impl<N: Clone + PartialEq + std::fmt::Debug> PrintCleanup<N> {
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Number of materialized pages
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn is_restored(&self) -> bool {
        self.restored
    }

    /// Nodes injected by this session, in injection order
    pub fn injected(&self) -> &[N] {
        &self.injected
    }

    /// Remove every injected node. Safe to call more than once; a failed
    /// removal is logged and the rest still run.
    pub fn restore<T: DocumentTree<Node = N>>(&mut self, tree: &mut T) {
        if self.restored {
            return;
        }
        self.restored = true;

        for node in self.injected.drain(..).rev() {
            if let Err(err) = tree.remove(&node) {
                tracing::warn!(session = self.session, error = %err, "print cleanup failed");
            }
        }
        tracing::debug!(session = self.session, "print cleanup done");
    }
}

/// Restructure the document for print
///
/// Returns `Ok(None)` when pagination is not active on `root` or there is no
/// content to paginate. Nothing stays attached if an error is returned.
pub fn prepare_paginated_print<T: DocumentTree>(
    tree: &mut T,
    root: &T::Node,
    markers: &Markers,
) -> Result<Option<PrintCleanup<T::Node>>, DomError> {
    if !tree.has_class(root, &markers.paginated) {
        tracing::debug!("pagination inactive, nothing to materialize");
        return Ok(None);
    }

    let geometry = PrintGeometry::read_back(tree, root);
    let blocks = extract_content_blocks(tree, root, markers);
    if blocks.is_empty() {
        tracing::debug!("no content blocks, nothing to materialize");
        return Ok(None);
    }

    let config = BreakConfig::new(geometry.page_content_height)
        .with_tolerance(PRINT_OVERFLOW_TOLERANCE);
    let breaks = calculate_page_breaks(&blocks, &config);
    let pages = page_ranges(blocks.len(), &breaks);

    let session = NEXT_SESSION.fetch_add(1, Ordering::Relaxed);
    let session_tag = session.to_string();

    // Built detached, so a failure here leaves the live document untouched
    let container = tree.create_element("div")?;
    tree.add_class(&container, &markers.print_container)?;
    tree.set_attribute(&container, &markers.session_attribute, &session_tag)?;
    for (index, range) in pages.iter().enumerate() {
        let page = build_page(tree, &blocks[range.clone()], &geometry, markers, index + 1)?;
        tree.set_attribute(&page, &markers.session_attribute, &session_tag)?;
        tree.append_child(&container, &page)?;
    }

    let style = tree.create_element("style")?;
    tree.set_attribute(&style, &markers.session_attribute, &session_tag)?;
    tree.set_text(&style, &print_stylesheet(&geometry, markers, session))?;

    tree.append_child(root, &container)?;
    let style_parent = tree.head().unwrap_or_else(|| root.clone());
    if let Err(err) = tree.append_child(&style_parent, &style) {
        if let Err(cleanup_err) = tree.remove(&container) {
            tracing::warn!(session, error = %cleanup_err, "could not remove print container");
        }
        return Err(err);
    }

    tracing::info!(
        session,
        blocks = blocks.len(),
        pages = pages.len(),
        content_height = geometry.page_content_height,
        "prepared paginated print"
    );

    Ok(Some(PrintCleanup {
        session,
        page_count: pages.len(),
        injected: vec![container, style],
        restored: false,
    }))
}

fn build_page<T: DocumentTree>(
    tree: &mut T,
    blocks: &[ContentBlock<T::Node>],
    geometry: &PrintGeometry,
    markers: &Markers,
    page_number: usize,
) -> Result<T::Node, DomError> {
    let page = tree.create_element("section")?;
    tree.add_class(&page, &markers.print_page)?;
    tree.add_class(&page, &markers.content_root)?;
    tree.set_attribute(&page, "data-page-number", &page_number.to_string())?;

    let declarations = [
        ("box-sizing", "border-box".to_string()),
        ("width", format_px(geometry.page_width)),
        ("min-height", format_px(geometry.page_height())),
        ("padding-top", format_px(geometry.padding_top())),
        ("padding-bottom", format_px(page_padding_bottom(geometry))),
        ("padding-left", format_px(geometry.margin_left)),
        ("padding-right", format_px(geometry.margin_right)),
    ];
    for (property, value) in &declarations {
        tree.set_style(&page, property, value)?;
    }

    for block in blocks {
        let copy = tree.deep_clone(&block.node)?;
        apply_break_hint(tree, &copy, block.hint)?;
        tree.append_child(&page, &copy)?;
    }
    Ok(page)
}

/// Bottom padding with the overflow tolerance taken out
///
/// A page may hold up to content height + tolerance; the band comes out of the
/// padding so a full page never grows past the physical page.
fn page_padding_bottom(geometry: &PrintGeometry) -> f64 {
    (geometry.padding_bottom() - PRINT_OVERFLOW_TOLERANCE).max(0.0)
}

fn apply_break_hint<T: DocumentTree>(
    tree: &mut T,
    node: &T::Node,
    hint: BreakHint,
) -> Result<(), DomError> {
    match hint {
        BreakHint::None => Ok(()),
        BreakHint::KeepWithNext => {
            tree.set_style(node, "break-after", "avoid")?;
            tree.set_style(node, "page-break-after", "avoid")
        }
        BreakHint::AvoidInside => {
            tree.set_style(node, "break-inside", "avoid")?;
            tree.set_style(node, "page-break-inside", "avoid")
        }
    }
}
