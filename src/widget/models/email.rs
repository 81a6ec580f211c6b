//! # Email Model
//!
//! Validation of the single field the widget cares about.

use crate::widget::error::WidgetError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// `local@domain.tld` with a 2 to 4 letter TLD
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,4}$";

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

/// Check a raw input value against the email pattern
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// An email that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and wrap a raw input value.
    ///
    /// The value is taken verbatim; surrounding whitespace makes it invalid,
    /// the same as it does for the keystroke check.
    pub fn parse(value: &str) -> Result<Self, WidgetError> {
        if is_valid_email(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(WidgetError::InvalidEmail(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
