//! Reservation and contact form controllers.
//!
//! Both forms run the same algorithm over a different [`FormSchema`]:
//!
//! 1. The submit event's default navigation is prevented.
//! 2. Every field is read from the page and checked (see [`crate::validate`]).
//! 3. Errors, if any, are joined into the feedback region with the `error`
//!    class and the inputs are left untouched.
//! 4. Otherwise the fixed success message is shown with the `success` class
//!    and the form is reset.
//!
//! Nothing is sent anywhere; success is a local acknowledgment.

use crate::config::FormsConfig;
use crate::dom::{Document, NodeId};
use crate::events::{EventKind, Listeners};
use crate::types::FormKind;
use crate::validate::{FieldError, FormSchema, format_date};
use chrono::NaiveDate;
use tracing::debug;

/// What the feedback region currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    Hidden,
    Error(Vec<FieldError>),
    Success(String),
}

impl Feedback {
    /// Messages in display order.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Feedback::Hidden => Vec::new(),
            Feedback::Error(errors) => errors.iter().map(ToString::to_string).collect(),
            Feedback::Success(message) => vec![message.clone()],
        }
    }

    /// Rendered text: messages joined by one space.
    pub fn text(&self) -> String {
        self.messages().join(" ")
    }

    /// Class written onto the feedback region.
    pub fn class_name(&self) -> &'static str {
        match self {
            Feedback::Hidden => "",
            Feedback::Error(_) => "error",
            Feedback::Success(_) => "success",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Feedback::Success(_))
    }
}

#[derive(Debug)]
pub struct FormController {
    schema: FormSchema,
    form: NodeId,
    /// Element per schema field, in schema order; `None` when missing.
    fields: Vec<Option<NodeId>>,
    feedback_region: Option<NodeId>,
    state: Feedback,
}

impl FormController {
    /// Attach to `#reservation-form` or `#contact-form`. Returns `None` when
    /// the page has no such form.
    ///
    /// The reservation form's date input gets `min` set to `today` so the
    /// widget itself discourages past dates.
    pub fn init(
        doc: &mut Document,
        kind: FormKind,
        forms: &FormsConfig,
        today: NaiveDate,
    ) -> Option<Self> {
        let Some(form) = doc.element_by_id(kind.form_id()) else {
            debug!(form = kind.label(), "form absent, validation disabled");
            return None;
        };
        let schema = FormSchema::for_kind(kind, forms);
        let fields: Vec<Option<NodeId>> = schema
            .fields
            .iter()
            .map(|f| doc.form_field(form, f.control.tag(), f.name))
            .collect();
        let feedback_region = doc.first_with_attr(form, "data-feedback", None);

        if kind == FormKind::Reservation
            && let Some(date) = schema
                .fields
                .iter()
                .position(|f| f.name == "date")
                .and_then(|i| fields[i])
        {
            doc.get_mut(date).set_attr("min", &format_date(today));
        }

        Some(Self {
            schema,
            form,
            fields,
            feedback_region,
            state: Feedback::Hidden,
        })
    }

    pub fn bind<A: Clone>(&self, listeners: &mut Listeners<A>, on_submit: A) {
        listeners.listen(self.form, EventKind::Submit, on_submit);
    }

    pub fn kind(&self) -> FormKind {
        self.schema.kind
    }

    pub fn form(&self) -> NodeId {
        self.form
    }

    pub fn feedback(&self) -> &Feedback {
        &self.state
    }

    /// Element holding `name`'s value, if the page has it.
    pub fn field(&self, name: &str) -> Option<NodeId> {
        self.schema
            .fields
            .iter()
            .position(|f| f.name == name)
            .and_then(|i| self.fields[i])
    }

    /// Validate, render feedback, and reset on success.
    pub fn submit(&mut self, doc: &mut Document, today: NaiveDate) -> &Feedback {
        let errors = {
            let doc: &Document = doc;
            self.schema.validate(
                |spec| self.field(spec.name).map(|id| doc.get(id).value.as_str()),
                today,
            )
        };

        self.state = if errors.is_empty() {
            Feedback::Success(self.schema.success_message.to_string())
        } else {
            Feedback::Error(errors)
        };
        debug!(
            form = self.kind().label(),
            outcome = self.state.class_name(),
            messages = self.state.messages().len(),
            "form submitted"
        );

        self.render(doc);
        if self.state.is_success() {
            doc.reset_form(self.form);
        }
        &self.state
    }

    fn render(&self, doc: &mut Document) {
        let Some(region) = self.feedback_region else {
            return;
        };
        let element = doc.get_mut(region);
        element.set_class_name(self.state.class_name());
        element.text = Some(self.state.text());
        element.set_hidden(false);
    }
}
