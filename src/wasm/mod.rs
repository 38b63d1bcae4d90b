//! WASM bindings for the pagination engine

mod console;
mod web;

pub use console::{
    install as install_console_logging, ConsoleMethod, ConsoleWriter, MakeConsoleWriter,
};
pub use web::{describe, WebDocument, WindowPrint};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::dom::Markers;
use crate::geometry::{margin_preset, page_format, page_format_names, LayoutConfig, LayoutVariables};
use crate::pagination::{calculate_page_breaks, extract_content_blocks, BreakConfig};
use crate::print::{prepare_paginated_print, print_paginated, PrintCleanup, PrintGeometry};

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console::install();
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Break positions for a list of measured heights (returns `PageBreak[]`)
#[wasm_bindgen(js_name = calculatePageBreaks)]
pub fn calculate_page_breaks_js(
    heights: &[f64],
    content_height: f64,
    tolerance: Option<f64>,
) -> Result<JsValue, JsValue> {
    let mut config = BreakConfig::new(content_height);
    if let Some(tolerance) = tolerance {
        config = config.with_tolerance(tolerance);
    }
    let breaks = calculate_page_breaks(heights.iter().copied(), &config);
    serde_wasm_bindgen::to_value(&breaks).map_err(JsValue::from)
}

/// Page format by name; unknown names give Letter
#[wasm_bindgen(js_name = getPageFormat)]
pub fn get_page_format(name: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&page_format(name)).map_err(JsValue::from)
}

/// Margin preset by name; unknown names give `normal`
#[wasm_bindgen(js_name = getMarginPreset)]
pub fn get_margin_preset(name: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&margin_preset(name)).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = pageFormatNames)]
pub fn page_format_names_js() -> js_sys::Array {
    page_format_names().map(JsValue::from_str).collect()
}

/// WASM-exposed paginator bound to the live document
#[wasm_bindgen]
pub struct WasmPaginator {
    markers: Markers,
}

impl Default for WasmPaginator {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmPaginator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            markers: Markers::default(),
        }
    }

    /// Override the class of the editable-content container
    #[wasm_bindgen(js_name = withContentRoot)]
    pub fn with_content_root(mut self, class: &str) -> Self {
        self.markers.content_root = class.to_string();
        self
    }

    /// Publish layout variables for `config` onto `root` and return them
    #[wasm_bindgen(js_name = projectLayout)]
    pub fn project_layout(&self, root: &Element, config: JsValue) -> Result<JsValue, JsValue> {
        let config: LayoutConfig = if config.is_undefined() || config.is_null() {
            LayoutConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let variables = LayoutVariables::project(&config.resolve());
        let mut document = WebDocument::current().map_err(to_js_error)?;
        variables
            .publish(&mut document, root, &self.markers)
            .map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&variables).map_err(JsValue::from)
    }

    /// Measured heights of the top-level content blocks under `root`
    #[wasm_bindgen(js_name = contentHeights)]
    pub fn content_heights(&self, root: &Element) -> Result<Vec<f64>, JsValue> {
        let document = WebDocument::current().map_err(to_js_error)?;
        Ok(extract_content_blocks(&document, root, &self.markers)
            .iter()
            .map(|block| block.height)
            .collect())
    }

    /// Breaks for the live content under `root`, using its published budget
    #[wasm_bindgen(js_name = pageBreaks)]
    pub fn page_breaks(&self, root: &Element) -> Result<JsValue, JsValue> {
        let document = WebDocument::current().map_err(to_js_error)?;
        let geometry = PrintGeometry::read_back(&document, root);
        let blocks = extract_content_blocks(&document, root, &self.markers);
        let breaks = calculate_page_breaks(&blocks, &BreakConfig::new(geometry.page_content_height));
        serde_wasm_bindgen::to_value(&breaks).map_err(JsValue::from)
    }

    /// Inject print pages without printing; `undefined` when pagination is inactive
    #[wasm_bindgen(js_name = preparePaginatedPrint)]
    pub fn prepare_paginated_print(&self, root: &Element) -> Result<Option<WasmPrintCleanup>, JsValue> {
        let mut document = WebDocument::current().map_err(to_js_error)?;
        let cleanup =
            prepare_paginated_print(&mut document, root, &self.markers).map_err(to_js_error)?;
        Ok(cleanup.map(|inner| WasmPrintCleanup { inner, document }))
    }

    /// Materialize pages, open the print dialog, and schedule cleanup
    pub fn print(&self, root: Option<Element>) -> Result<(), JsValue> {
        let mut document = WebDocument::current().map_err(to_js_error)?;
        let window = document.window().clone();
        let job = print_paginated(
            &mut document,
            root.as_ref(),
            &self.markers,
            &mut WindowPrint(&window),
        )
        .map_err(to_js_error)?;

        job.schedule(&mut document, |run, delay| {
            let callback = Closure::once_into_js(move || run());
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.unchecked_ref(),
                    delay as i32,
                )
                .map(|_| ())
        })
        .map_err(|err| {
            tracing::error!(error = %describe(&err), "could not schedule print cleanup");
            err
        })?;
        Ok(())
    }
}

/// Handle for removing pages injected by [`WasmPaginator::prepare_paginated_print`]
#[wasm_bindgen]
pub struct WasmPrintCleanup {
    inner: PrintCleanup<Element>,
    document: WebDocument,
}

#[wasm_bindgen]
impl WasmPrintCleanup {
    /// Remove the injected pages and styles; safe to call more than once
    pub fn run(&mut self) {
        self.inner.restore(&mut self.document);
    }

    #[wasm_bindgen(getter, js_name = pageCount)]
    pub fn page_count(&self) -> usize {
        self.inner.page_count()
    }

    #[wasm_bindgen(getter)]
    pub fn session(&self) -> f64 {
        self.inner.session() as f64
    }
}
