//! Navigation: active-link highlighting and the mobile hamburger menu.
//!
//! The current page identifier is the last segment of the location path,
//! falling back to the configured home page when the path ends in `/`:
//!
//! ```text
//! /                      → index.html
//! /site/contact.html     → contact.html
//! /reservation.html?d=1  → reservation.html
//! ```
//!
//! Every anchor under a `.nav-menu` whose `href` equals that identifier gets
//! the `active` class; every other anchor loses it.

use crate::dom::{Document, NodeId};
use crate::events::{EventKind, Listeners};
use tracing::debug;

/// Last path segment of `location`, or `home_page` when it is empty.
pub fn current_page_id<'a>(location: &'a str, home_page: &'a str) -> &'a str {
    let path = location
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => home_page,
    }
}

/// Mark nav anchors matching the current page. Returns how many were marked.
pub fn highlight_active_links(doc: &mut Document, location: &str, home_page: &str) -> usize {
    let current = current_page_id(location, home_page);
    let anchors: Vec<NodeId> = doc
        .all_with_class(doc.root(), "nav-menu")
        .into_iter()
        .flat_map(|menu| doc.all_with_tag(menu, "a"))
        .collect();

    let mut marked = 0;
    for anchor in anchors {
        let element = doc.get_mut(anchor);
        if element.attr("href") == Some(current) {
            element.add_class("active");
            marked += 1;
        } else {
            element.remove_class("active");
        }
    }
    debug!(page = current, marked, "active nav links");
    marked
}

/// Open/closed state of `#nav-menu`, driven by `#nav-toggle`.
#[derive(Debug)]
pub struct MenuController {
    toggle: NodeId,
    menu: NodeId,
    links: Vec<NodeId>,
    open: bool,
}

impl MenuController {
    /// Returns `None` unless both the toggle and the menu exist.
    pub fn init(doc: &Document) -> Option<Self> {
        let (Some(toggle), Some(menu)) = (
            doc.element_by_id("nav-toggle"),
            doc.element_by_id("nav-menu"),
        ) else {
            debug!("nav toggle or menu absent, hamburger disabled");
            return None;
        };
        Some(Self {
            toggle,
            menu,
            links: doc.all_with_tag(menu, "a"),
            open: doc.get(menu).has_class("open"),
        })
    }

    /// Toggle click flips the menu; any link click closes it.
    pub fn bind<A: Clone>(&self, listeners: &mut Listeners<A>, toggle: A, close: A) {
        listeners.listen(self.toggle, EventKind::Click, toggle);
        for &link in &self.links {
            listeners.listen(link, EventKind::Click, close.clone());
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle_button(&self) -> NodeId {
        self.toggle
    }

    pub fn links(&self) -> &[NodeId] {
        &self.links
    }

    pub fn toggle(&mut self, doc: &mut Document) -> bool {
        self.open = doc.get_mut(self.menu).toggle_class("open");
        self.sync_expanded(doc);
        debug!(open = self.open, "menu toggled");
        self.open
    }

    pub fn close(&mut self, doc: &mut Document) {
        doc.get_mut(self.menu).remove_class("open");
        self.open = false;
        self.sync_expanded(doc);
    }

    fn sync_expanded(&self, doc: &mut Document) {
        doc.get_mut(self.toggle)
            .set_attr("aria-expanded", if self.open { "true" } else { "false" });
    }
}
