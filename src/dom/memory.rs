//! Arena-backed in-memory document
//!
//! Stands in for the browser DOM natively: heights are assigned by the caller
//! instead of measured, everything else follows DOM semantics closely enough
//! for pagination and print materialization.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::DocumentTree;
use crate::error::DomError;

/// Index of a node in a [`MemoryDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    classes: SmallVec<[String; 2]>,
    attributes: FxHashMap<String, String>,
    /// Inline declarations in insertion order; custom properties included
    style: SmallVec<[(String, String); 4]>,
    text: Option<String>,
    height: f64,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl NodeData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: SmallVec::new(),
            attributes: FxHashMap::default(),
            style: SmallVec::new(),
            text: None,
            height: 0.0,
            parent: None,
            children: Vec::new(),
        }
    }

    fn style_value(&self, name: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn set_style_value(&mut self, name: &str, value: &str) {
        match self.style.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.style.push((name.to_string(), value.to_string())),
        }
    }
}

/// In-memory document with an `html` root holding `head` and `body`
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<NodeData>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
        };
        doc.root = doc.element("html");
        doc.head = doc.element("head");
        doc.body = doc.element("body");
        doc.attach(doc.root, doc.head);
        doc.attach(doc.root, doc.body);
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Create a detached element
    pub fn element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData::new(tag));
        id
    }

    /// Create an element appended to `body`
    pub fn create_in_body(&mut self, tag: &str) -> NodeId {
        let id = self.element(tag);
        self.attach(self.body, id);
        id
    }

    /// Create an element appended to `parent`
    pub fn create_child(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.element(tag);
        self.attach(parent, id);
        id
    }

    /// Create an element appended to `parent` with a measured height
    pub fn create_block(&mut self, parent: NodeId, tag: &str, height: f64) -> NodeId {
        let id = self.create_child(parent, tag);
        self.set_height(id, height);
        id
    }

    pub fn set_height(&mut self, node: NodeId, height: f64) {
        if let Some(data) = self.get_mut(node) {
            data.height = height;
        }
    }

    pub fn with_class(&mut self, node: NodeId, class: &str) -> NodeId {
        if let Some(data) = self.get_mut(node) {
            if !data.classes.iter().any(|c| c == class) {
                data.classes.push(class.to_string());
            }
        }
        node
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|data| data.parent)
    }

    /// Inline style declaration on `node` itself
    pub fn inline_style(&self, node: NodeId, property: &str) -> Option<String> {
        self.get(node)
            .and_then(|data| data.style_value(property))
            .map(str::to_string)
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.get(node).and_then(|data| data.text.as_deref())
    }

    /// Number of nodes reachable from the document root
    pub fn connected_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            count += 1;
            if let Some(data) = self.get(id) {
                stack.extend(data.children.iter().copied());
            }
        }
        count
    }

    /// Serialize `node` and its subtree as HTML
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(data) = self.get(node) else {
            return;
        };

        out.push('<');
        out.push_str(&data.tag);
        if !data.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape(&data.classes.join(" ")));
            out.push('"');
        }
        let mut attributes: Vec<_> = data.attributes.iter().collect();
        attributes.sort();
        for (name, value) in attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        if !data.style.is_empty() {
            let declarations: Vec<_> = data
                .style
                .iter()
                .map(|(key, value)| format!("{}: {}", key, value))
                .collect();
            out.push_str(" style=\"");
            out.push_str(&escape(&declarations.join("; ")));
            out.push('"');
        }
        out.push('>');

        if let Some(text) = &data.text {
            // Style blocks hold raw CSS
            if data.tag == "style" {
                out.push_str(text);
            } else {
                out.push_str(&escape(text));
            }
        }
        for child in &data.children {
            self.write_html(*child, out);
        }

        out.push_str("</");
        out.push_str(&data.tag);
        out.push('>');
    }

    fn get(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.0 as usize)
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(node.0 as usize)
    }

    fn require(&self, op: &'static str, node: NodeId) -> Result<&NodeData, DomError> {
        self.get(node)
            .ok_or_else(|| DomError::new(op, format!("unknown node {:?}", node)))
    }

    fn require_mut(&mut self, op: &'static str, node: NodeId) -> Result<&mut NodeData, DomError> {
        self.get_mut(node)
            .ok_or_else(|| DomError::new(op, format!("unknown node {:?}", node)))
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        if let Some(data) = self.get_mut(child) {
            data.parent = Some(parent);
        }
        if let Some(data) = self.get_mut(parent) {
            data.children.push(child);
        }
    }

    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if let Some(data) = self.get_mut(parent) {
            data.children.retain(|c| *c != child);
        }
        if let Some(data) = self.get_mut(child) {
            data.parent = None;
        }
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }
}

impl DocumentTree for MemoryDocument {
    type Node = NodeId;

    fn find_by_class(&self, scope: &NodeId, class: &str) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self
            .get(*scope)?
            .children
            .iter()
            .rev()
            .copied()
            .collect();
        while let Some(id) = stack.pop() {
            if self.has_class(&id, class) {
                return Some(id);
            }
            if let Some(data) = self.get(id) {
                stack.extend(data.children.iter().rev().copied());
            }
        }
        None
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.get(*node)
            .map(|data| data.children.clone())
            .unwrap_or_default()
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.get(*node)
            .map(|data| data.tag.clone())
            .unwrap_or_default()
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.get(*node)
            .map(|data| data.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.get(*node)?.attributes.get(name).cloned()
    }

    fn height(&self, node: &NodeId) -> f64 {
        self.get(*node).map(|data| data.height).unwrap_or(0.0)
    }

    fn style_var(&self, node: &NodeId, name: &str) -> Option<String> {
        // Custom properties inherit down the tree
        let mut current = Some(*node);
        while let Some(id) = current {
            let data = self.get(id)?;
            if let Some(value) = data.style_value(name) {
                return Some(value.to_string());
            }
            current = data.parent;
        }
        None
    }

    fn is_connected(&self, node: &NodeId) -> bool {
        self.is_ancestor(self.root, *node)
    }

    fn head(&self) -> Option<NodeId> {
        Some(self.head)
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeId, DomError> {
        Ok(self.element(tag))
    }

    fn deep_clone(&mut self, node: &NodeId) -> Result<NodeId, DomError> {
        let mut data = self.require("deep_clone", *node)?.clone();
        let children = std::mem::take(&mut data.children);
        data.parent = None;

        let copy = NodeId(self.nodes.len() as u32);
        self.nodes.push(data);
        for child in children {
            let child_copy = self.deep_clone(&child)?;
            self.attach(copy, child_copy);
        }
        Ok(copy)
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        self.require("append_child", *parent)?;
        self.require("append_child", *child)?;
        if self.is_ancestor(*child, *parent) {
            return Err(DomError::new(
                "append_child",
                "the new child is an ancestor of the parent",
            ));
        }
        self.attach(*parent, *child);
        Ok(())
    }

    fn remove(&mut self, node: &NodeId) -> Result<(), DomError> {
        self.require("remove", *node)?;
        self.detach(*node);
        Ok(())
    }

    fn add_class(&mut self, node: &NodeId, class: &str) -> Result<(), DomError> {
        self.require("add_class", *node)?;
        self.with_class(*node, class);
        Ok(())
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.require_mut("set_attribute", *node)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn set_style_var(&mut self, node: &NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.require_mut("set_style_var", *node)?
            .set_style_value(name, value);
        Ok(())
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) -> Result<(), DomError> {
        self.require_mut("set_style", *node)?
            .set_style_value(property, value);
        Ok(())
    }

    fn set_text(&mut self, node: &NodeId, text: &str) -> Result<(), DomError> {
        let children = std::mem::take(&mut self.require_mut("set_text", *node)?.children);
        for child in children {
            if let Some(data) = self.get_mut(child) {
                data.parent = None;
            }
        }
        self.require_mut("set_text", *node)?.text = Some(text.to_string());
        Ok(())
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
