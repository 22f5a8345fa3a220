//! # Escale
//!
//! The interaction layer of a small static tourism site, run headless.
//! The site's pages are plain HTML; this crate owns the few things that move:
//! the hamburger menu, the active nav link, the hero slider, the light/dark
//! theme, and client-side validation of the reservation and contact forms.
//!
//! # Architecture
//!
//! ```text
//! Document (dom)  ←  controllers (theme, nav, slider, forms)  ←  Page
//!                                   ↑                              ↑
//!                         Listeners / Scheduler            UI events, time
//! ```
//!
//! Every controller is an owned struct holding [`dom::NodeId`]s for the
//! elements it drives plus its own state. [`page::Page`] builds them all at
//! startup, registers their listeners, and routes events and timer ticks to
//! them. No controller knows about another.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`dom`] | In-memory element tree with fallible lookups and HTML output |
//! | [`events`] | Event kinds, listener registry, bubbling, implicit form submission |
//! | [`scheduler`] | Virtual-clock interval timers for slider autoplay |
//! | [`store`] | Preference store trait, in-memory and JSON file implementations |
//! | [`theme`] | Theme resolution, toggle, icons, toggle injection |
//! | [`nav`] | Active-link highlighting and the hamburger menu |
//! | [`slider`] | Cyclic slide index and autoplay with hover pause |
//! | [`validate`] | Field rules, pattern matchers and French error messages |
//! | [`forms`] | Reservation and contact form controllers and feedback |
//! | [`page`] | Startup wiring and event dispatch |
//! | [`site`] | Reference markup for the home, reservation and contact pages |
//! | [`config`] | `escale.toml` loading, merging over stock defaults, validation |
//! | [`types`] | Shared enums (`Theme`, `FormKind`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Absent Means Disabled
//!
//! Pages differ: only the home page has a slider, only two pages have forms.
//! Every lookup returns `Option`, and every controller's `init` returns
//! `None` (or degrades, for the theme) when its elements are missing. A
//! missing element is never an error.
//!
//! ## Actions Are Data
//!
//! Listeners map `(node, event kind)` to an [`page::Action`] value rather than
//! a closure. The page owns every controller, so dispatch is a `match` with
//! plain `&mut` borrows: no `Rc<RefCell<_>>`, no callbacks capturing state.
//!
//! ## Deterministic Time
//!
//! The slider's autoplay runs on [`scheduler::Scheduler`], whose clock only
//! moves when [`page::Page::advance`] is called. Hover pause and restart
//! semantics are therefore testable to the millisecond.

pub mod config;
pub mod dom;
pub mod events;
pub mod forms;
pub mod nav;
pub mod output;
pub mod page;
pub mod scheduler;
pub mod site;
pub mod slider;
pub mod store;
pub mod theme;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
