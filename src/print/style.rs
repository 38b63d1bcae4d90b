//! Output stylesheet for a print session

use super::geometry::PrintGeometry;
use crate::dom::Markers;
use crate::geometry::px_to_mm;

/// Stylesheet hiding interactive chrome and decorations, sizing the physical
/// page, and laying out the session's page containers
///
/// Pages carry the content root's class, so the rule hiding the live editor
/// excludes them. Keep hints are set inline on each printed block.
pub fn print_stylesheet(geometry: &PrintGeometry, markers: &Markers, session: u64) -> String {
    let container = format!(
        ".{}[{}=\"{}\"]",
        markers.print_container, markers.session_attribute, session
    );
    let page = format!("{} > .{}", container, markers.print_page);

    let hidden: Vec<String> = std::iter::once(format!(
        ".{}:not(.{})",
        markers.content_root, markers.print_page
    ))
    .chain(
        std::iter::once(&markers.first_page_header)
            .chain(markers.decorations.iter())
            .chain(markers.chrome.iter())
            .map(|class| format!(".{}", class)),
    )
    .collect();

    let mut css = String::new();
    // Zero page margin keeps the host from adding its own header and footer
    css.push_str(&format!(
        "@page {{ size: {:.2}mm {:.2}mm; margin: 0; }}\n",
        px_to_mm(geometry.page_width),
        px_to_mm(geometry.page_height())
    ));
    css.push_str(&format!("@media screen {{ {} {{ display: none; }} }}\n", container));
    css.push_str("@media print {\n");
    css.push_str("  html, body { margin: 0 !important; padding: 0 !important; }\n");
    css.push_str(&format!(
        "  .{} {{ margin: 0 !important; padding: 0 !important; box-shadow: none !important; }}\n",
        markers.paginated
    ));
    css.push_str(&format!("  {} {{ display: none !important; }}\n", hidden.join(", ")));
    css.push_str(&format!("  {} {{ display: block !important; }}\n", container));
    css.push_str(&format!(
        "  {} {{ box-sizing: border-box; width: {}px; min-height: {}px; \
         break-after: page; page-break-after: always; }}\n",
        page,
        geometry.page_width,
        geometry.page_height()
    ));
    css.push_str(&format!(
        "  {}:last-child {{ break-after: auto; page-break-after: auto; }}\n",
        page
    ));
    css.push_str("}\n");
    css
}
