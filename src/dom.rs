//! In-memory document model.
//!
//! Controllers never hold references into the page. They hold [`NodeId`]s
//! obtained at startup and receive the [`Document`] by `&mut` for every event.
//! Elements live in a flat arena; detached elements stay in the arena but are
//! invisible to lookups, which always walk from the root.
//!
//! ## Lookups
//!
//! Every lookup is fallible. A page without a slider simply returns `None`
//! for `.slider`, and the slider controller treats that as "disabled":
//!
//! ```text
//! element_by_id("nav-toggle")          #nav-toggle
//! first_with_class(root, "slider")     .slider
//! all_with_tag(menu, "a")              #nav-menu a
//! first_with_attr(slider, "data-dir", Some("next"))
//! form_field(form, "textarea", "message")
//! ```
//!
//! ## Serialization
//!
//! [`Document::to_html`] writes the tree back out as HTML. Text and attribute
//! values go through maud's escaping; raw inner markup (the theme icons) is
//! written as-is.

use maud::html;
use std::collections::BTreeMap;

/// Elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Handle to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A single element and its state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    /// Live value of `input` and `textarea` elements.
    pub value: String,
    pub text: Option<String>,
    /// Raw markup, written unescaped. Takes precedence over `text`.
    pub inner_html: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Form default: sets both the `value` attribute and the live value.
    pub fn with_value(mut self, value: &str) -> Self {
        self.set_attr("value", value);
        self.value = value.to_string();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.set_hidden(true);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Flip a class and return whether it is now present.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    /// Replace the whole class list from a space-separated string.
    pub fn set_class_name(&mut self, class_name: &str) {
        self.classes = class_name
            .split_whitespace()
            .map(str::to_string)
            .collect();
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    pub fn is_hidden(&self) -> bool {
        self.attributes.contains_key("hidden")
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        if hidden {
            self.set_attr("hidden", "");
        } else {
            self.remove_attr("hidden");
        }
    }

    fn is_form_control(&self) -> bool {
        self.tag == "input" || self.tag == "textarea"
    }
}

/// Arena-backed element tree rooted at `<html>`.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("html")],
        }
    }

    /// The document root (`<html>`).
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> &Element {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Store a detached element and append it under `parent`.
    pub fn append_element(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = self.alloc(element);
        self.nodes[id.0].parent = Some(parent);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Insert before `reference`. Falls back to appending when `reference`
    /// is not a child of `parent`.
    pub fn insert_element_before(
        &mut self,
        parent: NodeId,
        element: Element,
        reference: NodeId,
    ) -> NodeId {
        let Some(pos) = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == reference)
        else {
            return self.append_element(parent, element);
        };
        let id = self.alloc(element);
        self.nodes[id.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(pos, id);
        id
    }

    fn alloc(&mut self, mut element: Element) -> NodeId {
        element.children.clear();
        element.parent = None;
        self.nodes.push(element);
        NodeId(self.nodes.len() - 1)
    }

    /// Walk from `id` up to the root, starting with `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), |&n| self.parent(n))
    }

    /// Whether `node` is `scope` or sits below it.
    pub fn contains(&self, scope: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|n| n == scope)
    }

    /// Descendants of `scope` in document order, excluding `scope`.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    fn find_all(&self, scope: NodeId, pred: impl Fn(&Element) -> bool) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&id| pred(self.get(id)))
            .collect()
    }

    fn find_first(&self, scope: NodeId, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&id| pred(self.get(id)))
    }

    /// First attached element with this id, in document order.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let root = self.root();
        if self.get(root).id.as_deref() == Some(id) {
            return Some(root);
        }
        self.find_first(root, |e| e.id.as_deref() == Some(id))
    }

    pub fn first_with_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.find_first(scope, |e| e.has_class(class))
    }

    pub fn all_with_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.find_all(scope, |e| e.has_class(class))
    }

    pub fn all_with_tag(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.find_all(scope, |e| e.tag == tag)
    }

    /// First descendant carrying `name`, optionally with an exact value.
    pub fn first_with_attr(
        &self,
        scope: NodeId,
        name: &str,
        value: Option<&str>,
    ) -> Option<NodeId> {
        self.find_first(scope, |e| match (e.attr(name), value) {
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
            (None, _) => false,
        })
    }

    /// `tag[name="..."]` inside `scope`.
    pub fn form_field(&self, scope: NodeId, tag: &str, name: &str) -> Option<NodeId> {
        self.find_first(scope, |e| e.tag == tag && e.attr("name") == Some(name))
    }

    /// The closest `<form>` at or above `id`.
    pub fn closest_form(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id).find(|&n| self.get(n).tag == "form")
    }

    /// Restore every control in `form` to its `value` attribute (or empty).
    pub fn reset_form(&mut self, form: NodeId) {
        for id in self.descendants(form) {
            let element = self.get_mut(id);
            if element.is_form_control() {
                element.value = element.attr("value").unwrap_or_default().to_string();
            }
        }
    }

    /// Serialize the attached tree, starting at the root.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>");
        self.write_node(self.root(), &mut out);
        out
    }

    /// Serialize one subtree.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let element = self.get(id);
        out.push('<');
        out.push_str(&element.tag);
        if let Some(el_id) = &element.id {
            write_attr(out, "id", el_id);
        }
        if !element.classes.is_empty() {
            write_attr(out, "class", &element.classes.join(" "));
        }
        for (name, value) in &element.attributes {
            if element.tag == "input" && name == "value" {
                continue;
            }
            if value.is_empty() && name == "hidden" {
                out.push_str(" hidden");
            } else {
                write_attr(out, name, value);
            }
        }
        if element.tag == "input" && !element.value.is_empty() {
            write_attr(out, "value", &element.value);
        }
        out.push('>');
        if VOID_TAGS.contains(&element.tag.as_str()) {
            return;
        }
        if element.tag == "textarea" {
            out.push_str(&escape(&element.value));
        } else if let Some(raw) = &element.inner_html {
            out.push_str(raw);
        } else if let Some(text) = &element.text {
            out.push_str(&escape(text));
        }
        for &child in &element.children {
            self.write_node(child, out);
        }
        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
    }
}

fn escape(text: &str) -> String {
    html! { (text) }.into_string()
}

fn write_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}
