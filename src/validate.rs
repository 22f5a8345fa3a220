//! Field validation rules for the reservation and contact forms.
//!
//! A form is described by a [`FormSchema`]: an ordered list of fields, each
//! with an ordered list of [`Rule`]s. Validation walks every field in order and
//! collects errors from all of them. Within one field the first failing rule
//! wins, so an empty email reports "required" and never "invalid".
//!
//! | Field | Rules |
//! |-------|-------|
//! | name | required |
//! | email | required, `local@domain.tld` |
//! | phone (reservation) | required, digits `+ ( ) -` and spaces, min length |
//! | date (reservation) | required, `YYYY-MM-DD`, not before today |
//! | people (reservation) | leading integer ≥ 1 |
//! | message (reservation) | max length |
//! | message (contact) | required |
//!
//! Error messages are the French strings shown to visitors; they are the
//! `Display` of [`FieldError`].

use crate::config::FormsConfig;
use crate::types::FormKind;
use chrono::NaiveDate;
use thiserror::Error;

/// One failed rule, displayed as the visitor-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Le nom est requis.")]
    NameRequired,
    #[error("L'email est requis.")]
    EmailRequired,
    #[error("L'email n'est pas valide.")]
    EmailInvalid,
    #[error("Le numéro de téléphone est requis.")]
    PhoneRequired,
    #[error("Le numéro de téléphone est invalide.")]
    PhoneInvalid,
    #[error("La date est requise.")]
    DateRequired,
    #[error("La date n'est pas valide.")]
    DateInvalid,
    #[error("La date doit être dans le futur.")]
    DateInPast,
    #[error("Le nombre de personnes doit être au moins 1.")]
    TooFewPeople,
    #[error("Le message est trop long ({max} caractères max).")]
    MessageTooLong { max: usize },
    #[error("Le message est requis.")]
    MessageRequired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Non-blank after trimming; fails with the given error.
    Required(FieldError),
    Email,
    Phone { min_chars: usize },
    /// `YYYY-MM-DD`, on or after today.
    DateNotPast,
    /// Leading integer of at least 1.
    AtLeastOne,
    /// At most this many characters, untrimmed.
    MaxChars(usize),
}

impl Rule {
    pub fn check(&self, value: &str, today: NaiveDate) -> Result<(), FieldError> {
        match self {
            Rule::Required(error) => {
                if trim_blank(value).is_empty() {
                    return Err(error.clone());
                }
            }
            Rule::Email => {
                if !is_valid_email(trim_blank(value)) {
                    return Err(FieldError::EmailInvalid);
                }
            }
            Rule::Phone { min_chars } => {
                if !is_valid_phone(trim_blank(value), *min_chars) {
                    return Err(FieldError::PhoneInvalid);
                }
            }
            Rule::DateNotPast => {
                let date = parse_date(trim_blank(value)).ok_or(FieldError::DateInvalid)?;
                if date < today {
                    return Err(FieldError::DateInPast);
                }
            }
            Rule::AtLeastOne => match parse_leading_int(value) {
                Some(n) if n >= 1 => {}
                _ => return Err(FieldError::TooFewPeople),
            },
            Rule::MaxChars(max) => {
                if value.chars().count() > *max {
                    return Err(FieldError::MessageTooLong { max: *max });
                }
            }
        }
        Ok(())
    }
}

/// Which element carries a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Input,
    Textarea,
}

impl Control {
    pub fn tag(self) -> &'static str {
        match self {
            Control::Input => "input",
            Control::Textarea => "textarea",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub control: Control,
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    fn new(name: &'static str, control: Control, rules: Vec<Rule>) -> Self {
        Self {
            name,
            control,
            rules,
        }
    }

    /// First failing rule for `value`, if any.
    pub fn check(&self, value: &str, today: NaiveDate) -> Option<FieldError> {
        self.rules.iter().find_map(|rule| rule.check(value, today).err())
    }
}

/// Field list, rules and success message of one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    pub kind: FormKind,
    pub fields: Vec<FieldSpec>,
    pub success_message: &'static str,
}

impl FormSchema {
    pub fn for_kind(kind: FormKind, forms: &FormsConfig) -> Self {
        match kind {
            FormKind::Reservation => Self::reservation(forms),
            FormKind::Contact => Self::contact(),
        }
    }

    pub fn reservation(forms: &FormsConfig) -> Self {
        Self {
            kind: FormKind::Reservation,
            fields: vec![
                name_field(),
                email_field(),
                FieldSpec::new(
                    "phone",
                    Control::Input,
                    vec![
                        Rule::Required(FieldError::PhoneRequired),
                        Rule::Phone {
                            min_chars: forms.phone_min_chars,
                        },
                    ],
                ),
                FieldSpec::new(
                    "date",
                    Control::Input,
                    vec![Rule::Required(FieldError::DateRequired), Rule::DateNotPast],
                ),
                FieldSpec::new("people", Control::Input, vec![Rule::AtLeastOne]),
                FieldSpec::new(
                    "message",
                    Control::Textarea,
                    vec![Rule::MaxChars(forms.message_max_chars)],
                ),
            ],
            success_message: "Votre réservation a bien été enregistrée. Vous recevrez un email de confirmation.",
        }
    }

    pub fn contact() -> Self {
        Self {
            kind: FormKind::Contact,
            fields: vec![
                name_field(),
                email_field(),
                FieldSpec::new(
                    "message",
                    Control::Textarea,
                    vec![Rule::Required(FieldError::MessageRequired)],
                ),
            ],
            success_message: "Merci pour votre message. Nous reviendrons vers vous rapidement.",
        }
    }

    /// Run every field's rules in order. `value_of` returns `None` for a field
    /// the page does not contain, which is read as an empty value.
    pub fn validate<'a>(
        &self,
        mut value_of: impl FnMut(&FieldSpec) -> Option<&'a str>,
        today: NaiveDate,
    ) -> Vec<FieldError> {
        self.fields
            .iter()
            .filter_map(|field| field.check(value_of(field).unwrap_or_default(), today))
            .collect()
    }
}

fn name_field() -> FieldSpec {
    FieldSpec::new(
        "name",
        Control::Input,
        vec![Rule::Required(FieldError::NameRequired)],
    )
}

fn email_field() -> FieldSpec {
    FieldSpec::new(
        "email",
        Control::Input,
        vec![Rule::Required(FieldError::EmailRequired), Rule::Email],
    )
}

// ============================================================================
// Pattern matchers
// ============================================================================

/// Whitespace as browsers see it, which includes the byte order mark.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

fn trim_blank(value: &str) -> &str {
    value.trim_matches(is_blank)
}

/// `local@domain.tld`: exactly one `@`, no whitespace, a non-empty local
/// part, and a domain with a dot preceded by at least one character and
/// followed by at least two.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(is_blank) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // The first dot that has something before it leaves the longest tail.
    domain
        .char_indices()
        .find(|&(i, c)| c == '.' && i > 0)
        .is_some_and(|(i, _)| domain[i + 1..].chars().count() >= 2)
}

/// At least `min_chars` characters, all digits, `+`, `(`, `)`, `-` or whitespace.
pub fn is_valid_phone(phone: &str, min_chars: usize) -> bool {
    phone.chars().count() >= min_chars
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '(' | ')' | '-') || is_blank(c))
}

/// Calendar date as produced by `<input type="date">`: exactly `YYYY-MM-DD`.
/// chrono alone would also take `2026-1-5` or a signed year.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    (format_date(date) == value).then_some(date)
}

/// Integer prefix of `value`: leading whitespace, optional sign, then digits
/// up to the first non-digit. `"2 adultes"` is 2; `"abc"` is `None`.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let s = value.trim_start_matches(is_blank);
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// `YYYY-MM-DD`, as written into the date input's `min` attribute.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
