//! Shared test utilities for the escale test suite.
//!
//! Pages are built from [`crate::site`] markup, so tests only need a fixed
//! date and a way to type into form fields.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut doc = site::build(PageKind::Contact, &SiteOptions::default());
//! let mut form = FormController::init(&mut doc, FormKind::Contact, &forms, today()).unwrap();
//! fill(&mut doc, &form, &[("name", "Bob"), ("email", "bob@x.io")]);
//! ```

use chrono::NaiveDate;

use crate::dom::Document;
use crate::forms::FormController;
use crate::page::PageContext;

/// The date every test treats as "today".
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

/// Light-preferring context at `path`, dated [`today`].
pub fn context(path: &str) -> PageContext {
    PageContext {
        location_path: path.to_string(),
        prefers_dark: false,
        today: today(),
    }
}

/// Set live values of the named fields. Panics on an unknown field name.
pub fn fill(doc: &mut Document, form: &FormController, values: &[(&str, &str)]) {
    for (name, value) in values {
        let id = form
            .field(name)
            .unwrap_or_else(|| panic!("field '{name}' not found in {:?} form", form.kind()));
        doc.get_mut(id).value = value.to_string();
    }
}
