//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Reservation: error
//!     Le nom est requis.
//!     L'email est requis.
//! ```
//!
//! ## Theme
//!
//! ```text
//! Theme: dark (toggled, saved to .escale-prefs.json)
//! ```
//!
//! ## Render summary (stderr, alongside the HTML on stdout)
//!
//! ```text
//! Page /index.html
//!     Theme: light
//!     Active: index.html
//!     Menu: closed
//!     Slider: 2/3 translateX(-100%)
//! ```

use crate::forms::Feedback;
use crate::page::Page;
use crate::types::{FormKind, Theme};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn form_title(kind: FormKind) -> &'static str {
    match kind {
        FormKind::Reservation => "Reservation",
        FormKind::Contact => "Contact",
    }
}

pub fn format_feedback(kind: FormKind, feedback: &Feedback) -> Vec<String> {
    let status = match feedback {
        Feedback::Hidden => "not submitted",
        Feedback::Error(_) => "error",
        Feedback::Success(_) => "success",
    };
    let mut lines = vec![format!("{}: {}", form_title(kind), status)];
    lines.extend(
        feedback
            .messages()
            .into_iter()
            .map(|m| format!("{}{}", indent(1), m)),
    );
    lines
}

pub fn print_feedback(kind: FormKind, feedback: &Feedback) {
    for line in format_feedback(kind, feedback) {
        println!("{}", line);
    }
}

pub fn format_theme(theme: Theme, toggled: bool, store_path: &Path) -> Vec<String> {
    if toggled {
        vec![format!(
            "Theme: {} (toggled, saved to {})",
            theme,
            store_path.display()
        )]
    } else {
        vec![format!("Theme: {}", theme)]
    }
}

pub fn print_theme(theme: Theme, toggled: bool, store_path: &Path) {
    for line in format_theme(theme, toggled, store_path) {
        println!("{}", line);
    }
}

/// State of every live controller on `page`.
pub fn format_page_summary(page: &Page) -> Vec<String> {
    let doc = page.document();
    let mut lines = vec![format!("Page {}", page.context().location_path)];
    lines.push(format!("{}Theme: {}", indent(1), page.theme()));

    let active: Vec<&str> = doc
        .all_with_tag(doc.root(), "a")
        .into_iter()
        .map(|a| doc.get(a))
        .filter(|a| a.has_class("active"))
        .filter_map(|a| a.attr("href"))
        .collect();
    let active = if active.is_empty() {
        "none".to_string()
    } else {
        active.join(", ")
    };
    lines.push(format!("{}Active: {}", indent(1), active));

    if let Some(menu) = page.menu() {
        let state = if menu.is_open() { "open" } else { "closed" };
        lines.push(format!("{}Menu: {}", indent(1), state));
    }
    if let Some(slider) = page.slider() {
        lines.push(format!(
            "{}Slider: {}/{} {}",
            indent(1),
            slider.index() + 1,
            slider.slide_count(),
            slider.transform()
        ));
    }
    for kind in [FormKind::Reservation, FormKind::Contact] {
        if let Some(feedback) = page.feedback(kind) {
            for line in format_feedback(kind, feedback) {
                lines.push(format!("{}{}", indent(1), line));
            }
        }
    }
    lines
}

pub fn print_page_summary(page: &Page) {
    for line in format_page_summary(page) {
        eprintln!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::site::{self, PageKind, SiteOptions};
    use crate::store::MemoryStore;
    use crate::test_helpers::context;
    use crate::validate::FieldError;

    #[test]
    fn feedback_lists_messages_indented() {
        let feedback = Feedback::Error(vec![FieldError::NameRequired, FieldError::EmailInvalid]);
        assert_eq!(
            format_feedback(FormKind::Contact, &feedback),
            vec![
                "Contact: error",
                "    Le nom est requis.",
                "    L'email n'est pas valide.",
            ]
        );
    }

    #[test]
    fn hidden_feedback_has_no_messages() {
        assert_eq!(
            format_feedback(FormKind::Reservation, &Feedback::Hidden),
            vec!["Reservation: not submitted"]
        );
    }

    #[test]
    fn theme_line_mentions_store_only_when_toggled() {
        let path = Path::new("prefs.json");
        assert_eq!(format_theme(Theme::Dark, false, path), vec!["Theme: dark"]);
        assert_eq!(
            format_theme(Theme::Light, true, path),
            vec!["Theme: light (toggled, saved to prefs.json)"]
        );
    }

    #[test]
    fn page_summary_covers_live_controllers() {
        let mut page = Page::ready(
            site::build(PageKind::Home, &SiteOptions::default()),
            context("/index.html"),
            &SiteConfig::default(),
            Box::new(MemoryStore::new()),
        );
        page.advance(std::time::Duration::from_secs(5));

        let lines = format_page_summary(&page);
        assert_eq!(
            lines,
            vec![
                "Page /index.html",
                "    Theme: light",
                "    Active: index.html",
                "    Menu: closed",
                "    Slider: 2/3 translateX(-100%)",
            ]
        );
    }
}
