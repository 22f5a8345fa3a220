//! Abstract UI-event source.
//!
//! Controllers register listeners once, at startup, as `(node, kind) → action`
//! bindings. The page runtime feeds events in and executes the actions the
//! registry resolves. There are no callbacks or closures: an action is plain
//! data, so the registry can be inspected and tested on its own.

use crate::dom::{Document, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
    PointerEnter,
    PointerLeave,
}

impl EventKind {
    /// Click and submit propagate to ancestors; pointer enter/leave do not.
    pub fn bubbles(self) -> bool {
        matches!(self, EventKind::Click | EventKind::Submit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiEvent {
    pub target: NodeId,
    pub kind: EventKind,
}

impl UiEvent {
    pub fn new(target: NodeId, kind: EventKind) -> Self {
        Self { target, kind }
    }
}

/// Outcome of dispatching one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Number of listener actions that ran.
    pub handled: usize,
    /// Set when a listener suppressed the browser's default action.
    pub default_prevented: bool,
}

impl Dispatch {
    pub fn merge(&mut self, other: Dispatch) {
        self.handled += other.handled;
        self.default_prevented |= other.default_prevented;
    }
}

struct Binding<A> {
    node: NodeId,
    kind: EventKind,
    action: A,
}

/// Listener registry.
pub struct Listeners<A> {
    bindings: Vec<Binding<A>>,
}

impl<A> Default for Listeners<A> {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }
}

impl<A: Clone> Listeners<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen(&mut self, node: NodeId, kind: EventKind, action: A) {
        self.bindings.push(Binding { node, kind, action });
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Actions bound directly on `node` for `kind`, in registration order.
    pub fn on(&self, node: NodeId, kind: EventKind) -> Vec<A> {
        self.bindings
            .iter()
            .filter(|b| b.node == node && b.kind == kind)
            .map(|b| b.action.clone())
            .collect()
    }

    /// Every action an event reaches: the target's listeners first, then each
    /// ancestor's if the event bubbles.
    pub fn resolve(&self, doc: &Document, event: UiEvent) -> Vec<A> {
        if !event.kind.bubbles() {
            return self.on(event.target, event.kind);
        }
        doc.ancestors(event.target)
            .flat_map(|node| self.on(node, event.kind))
            .collect()
    }
}

/// The form a click implicitly submits: a `<button>` inside a form whose
/// `type` is anything but `button`/`reset` (HTML defaults to `submit`).
pub fn implicit_submit_target(doc: &Document, target: NodeId) -> Option<NodeId> {
    let button = doc
        .ancestors(target)
        .find(|&n| doc.get(n).tag == "button")?;
    match doc.get(button).attr("type") {
        Some("button") | Some("reset") => None,
        _ => doc.closest_form(button),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    #[test]
    fn click_bubbles_to_ancestors() {
        let mut doc = Document::new();
        let button = doc.append_element(doc.root(), Element::new("button"));
        let icon = doc.append_element(button, Element::new("span"));
        let mut listeners = Listeners::new();
        listeners.listen(button, EventKind::Click, "toggle");

        let actions = listeners.resolve(&doc, UiEvent::new(icon, EventKind::Click));
        assert_eq!(actions, vec!["toggle"]);
    }

    #[test]
    fn pointer_events_stay_on_target() {
        let mut doc = Document::new();
        let slider = doc.append_element(doc.root(), Element::new("div"));
        let slide = doc.append_element(slider, Element::new("div"));
        let mut listeners = Listeners::new();
        listeners.listen(slider, EventKind::PointerEnter, "pause");

        assert!(
            listeners
                .resolve(&doc, UiEvent::new(slide, EventKind::PointerEnter))
                .is_empty()
        );
        assert_eq!(
            listeners.resolve(&doc, UiEvent::new(slider, EventKind::PointerEnter)),
            vec!["pause"]
        );
    }

    #[test]
    fn kinds_do_not_cross() {
        let mut doc = Document::new();
        let form = doc.append_element(doc.root(), Element::new("form"));
        let mut listeners = Listeners::new();
        listeners.listen(form, EventKind::Submit, 1);
        assert!(
            listeners
                .resolve(&doc, UiEvent::new(form, EventKind::Click))
                .is_empty()
        );
    }

    #[test]
    fn submit_button_targets_its_form() {
        let mut doc = Document::new();
        let form = doc.append_element(doc.root(), Element::new("form"));
        let submit = doc.append_element(form, Element::new("button"));
        let plain = doc.append_element(form, Element::new("button").with_attr("type", "button"));
        let outside = doc.append_element(doc.root(), Element::new("button"));

        assert_eq!(implicit_submit_target(&doc, submit), Some(form));
        assert_eq!(implicit_submit_target(&doc, plain), None);
        assert_eq!(implicit_submit_target(&doc, outside), None);
    }
}
