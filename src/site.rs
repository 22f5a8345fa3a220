//! Reference markup for the three pages of the tourism site.
//!
//! Every page shares one header:
//!
//! ```text
//! header.header
//! └── nav.nav
//!     ├── a.logo
//!     ├── button#theme-toggle.theme-toggle     (optional)
//!     ├── button#nav-toggle.nav-toggle[aria-expanded=false]
//!     └── ul#nav-menu.nav-menu > li > a[href]  (Accueil, Réservation, Contact)
//! ```
//!
//! followed by a page-specific `main`:
//!
//! - **Home**: `.slider` with a `.slides` track of `.slide`s and
//!   `[data-dir]` prev/next buttons.
//! - **Reservation**: `form#reservation-form` with name, email, phone, date,
//!   people and message fields and a hidden `[data-feedback]` region.
//! - **Contact**: `form#contact-form` with name, email and message.

use crate::dom::{Document, Element, NodeId};
use crate::types::FormKind;
use clap::ValueEnum;

/// Nav entries as `(href, label)`.
pub const NAV_LINKS: &[(&str, &str)] = &[
    ("index.html", "Accueil"),
    ("reservation.html", "Réservation"),
    ("contact.html", "Contact"),
];

const SLIDE_CAPTIONS: &[&str] = &[
    "Les calanques au lever du jour",
    "Villages perchés de l'arrière-pays",
    "Marchés provençaux",
    "Sentiers du littoral",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageKind {
    Home,
    Reservation,
    Contact,
}

impl PageKind {
    /// The page's own nav `href`, and its location path.
    pub fn file_name(self) -> &'static str {
        match self {
            PageKind::Home => "index.html",
            PageKind::Reservation => "reservation.html",
            PageKind::Contact => "contact.html",
        }
    }

    pub fn default_path(self) -> String {
        format!("/{}", self.file_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOptions {
    /// Number of slides on the home page.
    pub slides: usize,
    /// Whether the markup ships `#theme-toggle`.
    pub theme_toggle: bool,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            slides: 3,
            theme_toggle: true,
        }
    }
}

pub fn build(kind: PageKind, options: &SiteOptions) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    doc.get_mut(root).set_attr("lang", "fr");
    let body = doc.append_element(root, Element::new("body"));
    header(&mut doc, body, options);
    let main = doc.append_element(body, Element::new("main"));
    match kind {
        PageKind::Home => home(&mut doc, main, options.slides),
        PageKind::Reservation => form(&mut doc, main, FormKind::Reservation),
        PageKind::Contact => form(&mut doc, main, FormKind::Contact),
    }
    doc
}

fn header(doc: &mut Document, body: NodeId, options: &SiteOptions) {
    let header = doc.append_element(body, Element::new("header").with_class("header"));
    let nav = doc.append_element(header, Element::new("nav").with_class("nav"));
    doc.append_element(
        nav,
        Element::new("a")
            .with_class("logo")
            .with_attr("href", "index.html")
            .with_text("Escale Provence"),
    );
    if options.theme_toggle {
        doc.append_element(
            nav,
            Element::new("button")
                .with_id("theme-toggle")
                .with_class("theme-toggle")
                .with_attr("type", "button"),
        );
    }
    doc.append_element(
        nav,
        Element::new("button")
            .with_id("nav-toggle")
            .with_class("nav-toggle")
            .with_attr("type", "button")
            .with_attr("aria-controls", "nav-menu")
            .with_attr("aria-expanded", "false")
            .with_text("Menu"),
    );
    let menu = doc.append_element(
        nav,
        Element::new("ul").with_id("nav-menu").with_class("nav-menu"),
    );
    for (href, label) in NAV_LINKS {
        let item = doc.append_element(menu, Element::new("li"));
        doc.append_element(item, Element::new("a").with_attr("href", href).with_text(label));
    }
}

fn home(doc: &mut Document, main: NodeId, slides: usize) {
    let slider = doc.append_element(
        main,
        Element::new("section")
            .with_class("slider")
            .with_attr("aria-roledescription", "carousel"),
    );
    let track = doc.append_element(slider, Element::new("div").with_class("slides"));
    for i in 0..slides {
        let caption = SLIDE_CAPTIONS[i % SLIDE_CAPTIONS.len()];
        let slide = doc.append_element(track, Element::new("figure").with_class("slide"));
        doc.append_element(
            slide,
            Element::new("img")
                .with_attr("src", &format!("images/slide-{}.jpg", i + 1))
                .with_attr("alt", caption),
        );
        doc.append_element(slide, Element::new("figcaption").with_text(caption));
    }
    for (dir, label) in [("prev", "Précédent"), ("next", "Suivant")] {
        doc.append_element(
            slider,
            Element::new("button")
                .with_class("slider-control")
                .with_attr("type", "button")
                .with_attr("data-dir", dir)
                .with_attr("aria-label", label),
        );
    }
}

fn form(doc: &mut Document, main: NodeId, kind: FormKind) {
    let form = doc.append_element(
        main,
        Element::new("form")
            .with_id(kind.form_id())
            .with_attr("novalidate", ""),
    );
    let mut field = |name: &str, input_type: &str, label: &str| {
        let wrapper = doc.append_element(form, Element::new("label").with_text(label));
        doc.append_element(
            wrapper,
            Element::new("input")
                .with_attr("name", name)
                .with_attr("type", input_type),
        );
    };
    field("name", "text", "Nom");
    field("email", "email", "Email");
    if kind == FormKind::Reservation {
        field("phone", "tel", "Téléphone");
        field("date", "date", "Date d'arrivée");
        field("people", "number", "Nombre de personnes");
    }
    let wrapper = doc.append_element(form, Element::new("label").with_text("Message"));
    doc.append_element(wrapper, Element::new("textarea").with_attr("name", "message"));
    doc.append_element(
        form,
        Element::new("div")
            .with_attr("data-feedback", "")
            .with_attr("role", "status")
            .with_attr("aria-live", "polite")
            .hidden(),
    );
    doc.append_element(
        form,
        Element::new("button")
            .with_attr("type", "submit")
            .with_text("Envoyer"),
    );
}
