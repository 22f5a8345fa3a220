//! Shared types used across controllers, the page runtime and the CLI.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Color theme applied to the document root as `data-theme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown theme '{0}' (expected light or dark)")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// The two validated forms on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Reservation,
    Contact,
}

impl FormKind {
    /// Id of the `<form>` element.
    pub fn form_id(self) -> &'static str {
        match self {
            FormKind::Reservation => "reservation-form",
            FormKind::Contact => "contact-form",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormKind::Reservation => "reservation",
            FormKind::Contact => "contact",
        }
    }
}
