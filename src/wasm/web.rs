//! Browser DOM backing for [`DocumentTree`]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

use crate::dom::DocumentTree;
use crate::error::{DomError, PrintError};
use crate::print::PrintTarget;

/// The live page's document
#[derive(Debug, Clone)]
pub struct WebDocument {
    window: Window,
    document: Document,
}

impl WebDocument {
    pub fn current() -> Result<Self, DomError> {
        let window =
            web_sys::window().ok_or_else(|| DomError::new("window", "no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| DomError::new("document", "window has no document"))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    fn html_element<'a>(
        op: &'static str,
        node: &'a Element,
    ) -> Result<&'a HtmlElement, DomError> {
        node.dyn_ref::<HtmlElement>()
            .ok_or_else(|| DomError::new(op, "not an HTML element"))
    }
}

/// Readable message for a thrown JS value
pub fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}

fn js_error(op: &'static str) -> impl FnOnce(JsValue) -> DomError {
    move |value| DomError::new(op, describe(&value))
}

impl DocumentTree for WebDocument {
    type Node = Element;

    fn find_by_class(&self, scope: &Element, class: &str) -> Option<Element> {
        scope.get_elements_by_class_name(class).item(0)
    }

    fn children(&self, node: &Element) -> Vec<Element> {
        let children = node.children();
        (0..children.length())
            .filter_map(|index| children.item(index))
            .collect()
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_ascii_lowercase()
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn height(&self, node: &Element) -> f64 {
        match node.dyn_ref::<HtmlElement>() {
            Some(element) => f64::from(element.offset_height()),
            None => f64::from(node.client_height()),
        }
    }

    fn style_var(&self, node: &Element, name: &str) -> Option<String> {
        let style = self.window.get_computed_style(node).ok().flatten()?;
        let value = style.get_property_value(name).ok()?;
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    fn is_connected(&self, node: &Element) -> bool {
        node.is_connected()
    }

    fn head(&self) -> Option<Element> {
        self.document.head().map(Element::from)
    }

    fn create_element(&mut self, tag: &str) -> Result<Element, DomError> {
        self.document
            .create_element(tag)
            .map_err(js_error("create_element"))
    }

    fn deep_clone(&mut self, node: &Element) -> Result<Element, DomError> {
        node.clone_node_with_deep(true)
            .map_err(js_error("deep_clone"))?
            .dyn_into::<Element>()
            .map_err(|_| DomError::new("deep_clone", "clone is not an element"))
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> Result<(), DomError> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(js_error("append_child"))
    }

    fn remove(&mut self, node: &Element) -> Result<(), DomError> {
        node.remove();
        Ok(())
    }

    fn add_class(&mut self, node: &Element, class: &str) -> Result<(), DomError> {
        node.class_list().add_1(class).map_err(js_error("add_class"))
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) -> Result<(), DomError> {
        node.set_attribute(name, value)
            .map_err(js_error("set_attribute"))
    }

    fn set_style_var(&mut self, node: &Element, name: &str, value: &str) -> Result<(), DomError> {
        self.set_style(node, name, value)
    }

    fn set_style(&mut self, node: &Element, property: &str, value: &str) -> Result<(), DomError> {
        Self::html_element("set_style", node)?
            .style()
            .set_property(property, value)
            .map_err(js_error("set_style"))
    }

    fn set_text(&mut self, node: &Element, text: &str) -> Result<(), DomError> {
        node.set_text_content(Some(text));
        Ok(())
    }
}

/// `window.print()`
pub struct WindowPrint<'a>(pub &'a Window);

impl PrintTarget for WindowPrint<'_> {
    fn print(&mut self) -> Result<(), PrintError> {
        self.0
            .print()
            .map_err(|err| PrintError::PrintFailed(describe(&err)))
    }
}
