//! Light/dark theme with a persisted preference.
//!
//! ## Resolution at startup
//!
//! ```text
//! stored "light"/"dark"  →  that theme
//! otherwise              →  dark if the system prefers dark, else light
//! ```
//!
//! A stored value that is neither `light` nor `dark` is ignored. The resolved
//! theme is written to the document root as `data-theme` but is not persisted;
//! only a toggle click writes the store.
//!
//! ## Toggle button
//!
//! `#theme-toggle` shows the icon of the theme it switches *to*: a moon while
//! light, a sun while dark, with matching `aria-label` and `title`. Pages that
//! lack the button get one built into `.header .nav`, in front of the
//! hamburger toggle when that sits in the same nav.

use crate::config::ThemeConfig;
use crate::dom::{Document, Element, NodeId};
use crate::events::{EventKind, Listeners};
use crate::store::PreferenceStore;
use crate::types::Theme;
use maud::{Markup, html};
use tracing::{debug, warn};

/// Stored preference first, then the system hint, then light.
pub fn resolve_initial(stored: Option<&str>, prefers_dark: bool) -> Theme {
    if let Some(value) = stored {
        match value.parse::<Theme>() {
            Ok(theme) => return theme,
            Err(e) => warn!("ignoring stored theme: {e}"),
        }
    }
    if prefers_dark { Theme::Dark } else { Theme::Light }
}

fn moon_icon() -> Markup {
    html! {
        svg viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg" fill="none" stroke="currentColor" stroke-width="1.8" {
            path d="M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79Z" {}
        }
    }
}

fn sun_icon() -> Markup {
    html! {
        svg viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg" fill="none" stroke="currentColor" stroke-width="1.8" {
            circle cx="12" cy="12" r="4" {}
            path d="M12 2v2m0 16v2M4.93 4.93l1.41 1.41M17.66 17.66l1.41 1.41M2 12h2m16 0h2M4.93 19.07l1.41-1.41M17.66 6.34l1.41-1.41" {}
        }
    }
}

/// Icon and accessible labels for the button while `theme` is active.
pub struct ToggleFace {
    pub icon: Markup,
    pub aria_label: &'static str,
    pub title: &'static str,
}

pub fn toggle_face(theme: Theme) -> ToggleFace {
    match theme {
        Theme::Dark => ToggleFace {
            icon: sun_icon(),
            aria_label: "Activer le mode clair",
            title: "Mode clair",
        },
        Theme::Light => ToggleFace {
            icon: moon_icon(),
            aria_label: "Activer le mode sombre",
            title: "Mode sombre",
        },
    }
}

#[derive(Debug)]
pub struct ThemeController {
    root: NodeId,
    toggle: Option<NodeId>,
    theme: Theme,
    storage_key: String,
}

impl ThemeController {
    /// Resolve, apply and render the initial theme. Always succeeds: without
    /// a toggle button the theme is still applied, it just cannot change.
    pub fn init(
        doc: &mut Document,
        store: &dyn PreferenceStore,
        prefers_dark: bool,
        config: &ThemeConfig,
    ) -> Self {
        let toggle = match doc.element_by_id("theme-toggle") {
            Some(toggle) => Some(toggle),
            None if config.inject_toggle => inject_toggle(doc),
            None => None,
        };
        let stored = store.get(&config.storage_key);
        let theme = resolve_initial(stored.as_deref(), prefers_dark);
        debug!(%theme, stored = stored.is_some(), prefers_dark, "theme resolved");

        let controller = Self {
            root: doc.root(),
            toggle,
            theme,
            storage_key: config.storage_key.clone(),
        };
        controller.apply(doc);
        controller
    }

    pub fn bind<A: Clone>(&self, listeners: &mut Listeners<A>, on_toggle: A) {
        if let Some(toggle) = self.toggle {
            listeners.listen(toggle, EventKind::Click, on_toggle);
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_button(&self) -> Option<NodeId> {
        self.toggle
    }

    /// Flip, re-apply and persist. A failed write is logged; the page keeps
    /// the new theme either way.
    pub fn toggle(&mut self, doc: &mut Document, store: &mut dyn PreferenceStore) -> Theme {
        self.theme = self.theme.toggled();
        self.apply(doc);
        if let Err(e) = store.set(&self.storage_key, self.theme.as_str()) {
            warn!(key = %self.storage_key, "failed to persist theme: {e}");
        }
        debug!(theme = %self.theme, "theme toggled");
        self.theme
    }

    fn apply(&self, doc: &mut Document) {
        doc.get_mut(self.root)
            .set_attr("data-theme", self.theme.as_str());
        if let Some(toggle) = self.toggle {
            let face = toggle_face(self.theme);
            let button = doc.get_mut(toggle);
            button.set_attr("aria-label", face.aria_label);
            button.set_attr("title", face.title);
            button.inner_html = Some(face.icon.into_string());
        }
    }
}

/// Build `#theme-toggle` inside `.header .nav`. `None` when there is no such nav.
fn inject_toggle(doc: &mut Document) -> Option<NodeId> {
    let nav = doc
        .all_with_class(doc.root(), "header")
        .into_iter()
        .find_map(|header| doc.first_with_class(header, "nav"))?;
    let face = toggle_face(Theme::Light);
    let button = Element::new("button")
        .with_id("theme-toggle")
        .with_class("theme-toggle")
        .with_attr("type", "button")
        .with_attr("aria-label", face.aria_label)
        .with_attr("title", face.title);

    let hamburger = doc
        .element_by_id("nav-toggle")
        .filter(|&t| doc.parent(t) == Some(nav));
    let id = match hamburger {
        Some(nav_toggle) => doc.insert_element_before(nav, button, nav_toggle),
        None => doc.append_element(nav, button),
    };
    debug!("theme toggle injected into header nav");
    Some(id)
}
