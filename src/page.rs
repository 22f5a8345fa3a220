//! Page runtime: startup wiring and event dispatch.
//!
//! [`Page::ready`] plays the role of the page-ready event. It runs every
//! initializer once, in a fixed order, against whatever the document
//! contains:
//!
//! 1. theme (always active; may inject its toggle)
//! 2. active nav link
//! 3. hamburger menu
//! 4. hero slider (starts autoplay)
//! 5. reservation form
//! 6. contact form
//!
//! A controller whose elements are missing is simply absent. Controllers do
//! not know about each other; the page owns them all together with the
//! document, the listener registry, the timer scheduler and the preference
//! store, and routes each [`Action`] to its owner.

use crate::config::SiteConfig;
use crate::dom::{Document, NodeId};
use crate::events::{Dispatch, EventKind, Listeners, UiEvent, implicit_submit_target};
use crate::forms::{Feedback, FormController};
use crate::nav::{self, MenuController};
use crate::scheduler::Scheduler;
use crate::slider::{SliderActions, SliderController};
use crate::store::PreferenceStore;
use crate::theme::ThemeController;
use crate::types::{FormKind, Theme};
use chrono::NaiveDate;
use std::time::Duration;
use tracing::debug;

/// Host environment the page runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// Location path, e.g. `/reservation.html`.
    pub location_path: String,
    /// System-level dark color-scheme hint.
    pub prefers_dark: bool,
    /// Local calendar date used by the reservation date rules.
    pub today: NaiveDate,
}

impl PageContext {
    /// Context for `location_path` using the local clock.
    pub fn local(location_path: &str, prefers_dark: bool) -> Self {
        Self {
            location_path: location_path.to_string(),
            prefers_dark,
            today: chrono::Local::now().date_naive(),
        }
    }
}

/// Everything a listener or timer can ask the page to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleMenu,
    CloseMenu,
    SlideNext,
    SlidePrev,
    PauseSlider,
    ResumeSlider,
    ToggleTheme,
    Submit(FormKind),
}

pub struct Page {
    document: Document,
    context: PageContext,
    store: Box<dyn PreferenceStore>,
    listeners: Listeners<Action>,
    scheduler: Scheduler<Action>,
    theme: ThemeController,
    menu: Option<MenuController>,
    slider: Option<SliderController>,
    forms: Vec<FormController>,
}

impl Page {
    /// Initialize every controller against `document`.
    pub fn ready(
        mut document: Document,
        context: PageContext,
        config: &SiteConfig,
        store: Box<dyn PreferenceStore>,
    ) -> Self {
        let mut listeners = Listeners::new();
        let mut scheduler = Scheduler::new();

        let theme = ThemeController::init(
            &mut document,
            store.as_ref(),
            context.prefers_dark,
            &config.theme,
        );
        theme.bind(&mut listeners, Action::ToggleTheme);

        nav::highlight_active_links(
            &mut document,
            &context.location_path,
            &config.navigation.home_page,
        );

        let menu = MenuController::init(&document);
        if let Some(menu) = &menu {
            menu.bind(&mut listeners, Action::ToggleMenu, Action::CloseMenu);
        }

        let mut slider = SliderController::init(&document, config.slider.interval());
        if let Some(slider) = &mut slider {
            slider.bind(
                &mut listeners,
                SliderActions {
                    next: Action::SlideNext,
                    prev: Action::SlidePrev,
                    pause: Action::PauseSlider,
                    resume: Action::ResumeSlider,
                },
            );
            slider.play(&mut scheduler, Action::SlideNext);
        }

        let forms: Vec<FormController> = [FormKind::Reservation, FormKind::Contact]
            .into_iter()
            .filter_map(|kind| {
                FormController::init(&mut document, kind, &config.forms, context.today)
            })
            .collect();
        for form in &forms {
            form.bind(&mut listeners, Action::Submit(form.kind()));
        }

        debug!(
            path = %context.location_path,
            listeners = listeners.len(),
            menu = menu.is_some(),
            slider = slider.is_some(),
            forms = forms.len(),
            "page ready"
        );

        Self {
            document,
            context,
            store,
            listeners,
            scheduler,
            theme,
            menu,
            slider,
            forms,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access, e.g. to type into form fields before submitting.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn context(&self) -> &PageContext {
        &self.context
    }

    pub fn store(&self) -> &dyn PreferenceStore {
        self.store.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn theme_toggle(&self) -> Option<NodeId> {
        self.theme.toggle_button()
    }

    pub fn menu(&self) -> Option<&MenuController> {
        self.menu.as_ref()
    }

    pub fn slider(&self) -> Option<&SliderController> {
        self.slider.as_ref()
    }

    pub fn slide_index(&self) -> Option<usize> {
        self.slider.as_ref().map(SliderController::index)
    }

    pub fn form(&self, kind: FormKind) -> Option<&FormController> {
        self.forms.iter().find(|f| f.kind() == kind)
    }

    pub fn feedback(&self, kind: FormKind) -> Option<&Feedback> {
        self.form(kind).map(FormController::feedback)
    }

    /// Set the live value of a form field. Returns `false` when the page has
    /// no such form or field.
    pub fn set_field(&mut self, kind: FormKind, name: &str, value: &str) -> bool {
        let Some(id) = self.form(kind).and_then(|f| f.field(name)) else {
            return false;
        };
        self.document.get_mut(id).value = value.to_string();
        true
    }

    // ========================================================================
    // Events
    // ========================================================================

    pub fn click(&mut self, target: NodeId) -> Dispatch {
        let mut result = self.dispatch(UiEvent::new(target, EventKind::Click));
        if let Some(form) = implicit_submit_target(&self.document, target) {
            result.merge(self.dispatch(UiEvent::new(form, EventKind::Submit)));
        }
        result
    }

    pub fn submit(&mut self, form: NodeId) -> Dispatch {
        self.dispatch(UiEvent::new(form, EventKind::Submit))
    }

    pub fn pointer_enter(&mut self, target: NodeId) -> Dispatch {
        self.dispatch(UiEvent::new(target, EventKind::PointerEnter))
    }

    pub fn pointer_leave(&mut self, target: NodeId) -> Dispatch {
        self.dispatch(UiEvent::new(target, EventKind::PointerLeave))
    }

    /// Run every action the event reaches.
    pub fn dispatch(&mut self, event: UiEvent) -> Dispatch {
        let actions = self.listeners.resolve(&self.document, event);
        let mut result = Dispatch::default();
        for action in actions {
            result.handled += 1;
            result.default_prevented |= self.run(action);
        }
        result
    }

    /// Let `by` pass, firing due timers in order. Returns how many fired.
    /// The clock stops at [`Duration::MAX`].
    pub fn advance(&mut self, by: Duration) -> usize {
        let deadline = self.scheduler.now().saturating_add(by);
        let mut fired = 0;
        while let Some(action) = self.scheduler.next_due(deadline) {
            self.run(action);
            fired += 1;
        }
        self.scheduler.settle(deadline);
        fired
    }

    /// Execute one action. Returns whether it prevents the default action.
    fn run(&mut self, action: Action) -> bool {
        let doc = &mut self.document;
        match action {
            Action::ToggleMenu => {
                if let Some(menu) = &mut self.menu {
                    menu.toggle(doc);
                }
            }
            Action::CloseMenu => {
                if let Some(menu) = &mut self.menu {
                    menu.close(doc);
                }
            }
            Action::SlideNext => {
                if let Some(slider) = &mut self.slider {
                    slider.next(doc);
                }
            }
            Action::SlidePrev => {
                if let Some(slider) = &mut self.slider {
                    slider.prev(doc);
                }
            }
            Action::PauseSlider => {
                if let Some(slider) = &mut self.slider {
                    slider.pause(&mut self.scheduler);
                }
            }
            Action::ResumeSlider => {
                if let Some(slider) = &mut self.slider {
                    slider.play(&mut self.scheduler, Action::SlideNext);
                }
            }
            Action::ToggleTheme => {
                self.theme.toggle(doc, self.store.as_mut());
            }
            Action::Submit(kind) => {
                let today = self.context.today;
                if let Some(form) = self.forms.iter_mut().find(|f| f.kind() == kind) {
                    form.submit(doc, today);
                }
                return true;
            }
        }
        false
    }
}
