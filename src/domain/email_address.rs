use std::fmt;
use std::str::FromStr;

use regex::Regex;

use serde::Serialize;

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

lazy_static::lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Permissive syntactic check: `local@domain.tld`, no whitespace and a single `@`
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// A user supplied email-address, trimmed and lowercased
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalize a raw value without validating it.
    /// Used for audit records of attempts that never passed validation.
    pub fn normalize(value: &str) -> String {
        value.trim().to_lowercase()
    }
}

impl FromStr for EmailAddress {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        // The raw value is checked, so surrounding whitespace is rejected
        if !is_valid_email(value) {
            return Err(INVALID_EMAIL_MESSAGE.into());
        }

        Ok(Self(Self::normalize(value)))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
