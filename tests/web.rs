//! Browser tests for the DOM-backed pagination path
#![cfg(target_arch = "wasm32")]

use doc_pager::geometry::vars;
use doc_pager::print::PrintGeometry;
use doc_pager::wasm::WebDocument;
use doc_pager::{
    extract_content_blocks, prepare_paginated_print, DocumentTree, LayoutConfig,
    LayoutVariables, Markers,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn editor(doc: &mut WebDocument, markers: &Markers, heights: &[u32]) -> Element {
    let body = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
        .unwrap();
    let root = doc.create_element("div").unwrap();
    let content = doc.create_element("div").unwrap();
    doc.add_class(&content, &markers.content_root).unwrap();
    for height in heights {
        let block = doc.create_element("p").unwrap();
        doc.set_style(&block, "height", &format!("{}px", height)).unwrap();
        doc.set_style(&block, "margin", "0").unwrap();
        doc.append_child(&content, &block).unwrap();
    }
    doc.append_child(&root, &content).unwrap();
    body.append_child(&root).unwrap();
    root
}

#[wasm_bindgen_test]
fn test_publish_and_read_back() {
    let markers = Markers::default();
    let mut doc = WebDocument::current().unwrap();
    let root = editor(&mut doc, &markers, &[]);

    LayoutVariables::project(&LayoutConfig::new("A4").resolve())
        .publish(&mut doc, &root, &markers)
        .unwrap();

    assert!(root.class_list().contains(&markers.paginated));
    assert_eq!(doc.style_var(&root, vars::VAR_PAGE_WIDTH).as_deref(), Some("794px"));

    let geometry = PrintGeometry::read_back(&doc, &root);
    assert_eq!(geometry.page_width, 794.0);
    root.remove();
}

#[wasm_bindgen_test]
fn test_extract_measures_blocks() {
    let markers = Markers::default();
    let mut doc = WebDocument::current().unwrap();
    let root = editor(&mut doc, &markers, &[100, 250, 40]);

    let blocks = extract_content_blocks(&doc, &root, &markers);
    let heights: Vec<f64> = blocks.iter().map(|b| b.height).collect();
    assert_eq!(heights, vec![100.0, 250.0, 40.0]);
    root.remove();
}

#[wasm_bindgen_test]
fn test_prepare_and_restore() {
    let markers = Markers::default();
    let mut doc = WebDocument::current().unwrap();
    let root = editor(&mut doc, &markers, &[400, 400, 400]);
    LayoutVariables::project(&LayoutConfig::default().resolve())
        .publish(&mut doc, &root, &markers)
        .unwrap();

    let mut cleanup = prepare_paginated_print(&mut doc, &root, &markers)
        .unwrap()
        .unwrap();
    // 784px budget: 400 + 400 overflows, so one block per page
    assert_eq!(cleanup.page_count(), 3);

    let pages = root.get_elements_by_class_name(&markers.print_page);
    assert_eq!(pages.length(), 3);
    let first = pages.item(0).unwrap().dyn_into::<HtmlElement>().unwrap();
    assert_eq!(first.children().length(), 1);

    cleanup.restore(&mut doc);
    cleanup.restore(&mut doc);
    assert_eq!(root.get_elements_by_class_name(&markers.print_page).length(), 0);
    assert!(doc.find_by_class(&root, &markers.print_container).is_none());
    root.remove();
}

#[wasm_bindgen_test]
fn test_editor_rules_apply_to_printed_blocks() {
    let markers = Markers::default();
    let mut doc = WebDocument::current().unwrap();

    let sheet = doc.create_element("style").unwrap();
    doc.set_text(&sheet, ".ProseMirror p { padding-bottom: 20px; }")
        .unwrap();
    let head = doc.head().unwrap();
    doc.append_child(&head, &sheet).unwrap();

    let root = editor(&mut doc, &markers, &[100, 200]);
    LayoutVariables::project(&LayoutConfig::default().resolve())
        .publish(&mut doc, &root, &markers)
        .unwrap();
    let live: Vec<f64> = extract_content_blocks(&doc, &root, &markers)
        .iter()
        .map(|b| b.height)
        .collect();
    assert_eq!(live, vec![120.0, 220.0]);

    let mut cleanup = prepare_paginated_print(&mut doc, &root, &markers)
        .unwrap()
        .unwrap();
    // Print containers are hidden on screen
    let container = doc.find_by_class(&root, &markers.print_container).unwrap();
    doc.set_style(&container, "display", "block").unwrap();

    let page = doc.find_by_class(&container, &markers.print_page).unwrap();
    let printed: Vec<f64> = doc.children(&page).iter().map(|n| doc.height(n)).collect();
    assert_eq!(printed, live);

    cleanup.restore(&mut doc);
    root.remove();
    sheet.remove();
}

