//! Indian mobile number type with validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Validation errors for phone numbers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhoneError {
    #[error("phone number cannot be empty")]
    Empty,

    #[error("phone number contains invalid character '{0}'")]
    InvalidCharacter(char),

    #[error("phone number must have exactly 10 digits, got {0}")]
    WrongLength(usize),

    #[error("mobile numbers must start with 6, 7, 8 or 9")]
    InvalidLeadingDigit,
}

/// A validated Indian mobile number, stored as its 10 significant digits.
///
/// Accepts common input shapes: bare 10 digits, a leading `0` trunk
/// prefix, or a `+91`/`91` country code, with spaces and dashes allowed
/// as separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse and validate a phone number.
    ///
    /// # Errors
    ///
    /// Returns a [`PhoneError`] describing the first failed check.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, PhoneError> {
        let mut digits = String::with_capacity(12);
        for ch in input.as_ref().chars() {
            match ch {
                '0'..='9' => digits.push(ch),
                ' ' | '-' | '+' | '(' | ')' => {}
                other => return Err(PhoneError::InvalidCharacter(other)),
            }
        }

        if digits.is_empty() {
            return Err(PhoneError::Empty);
        }

        // Strip the country code or trunk prefix when present.
        let significant = if digits.len() == 12 {
            digits.strip_prefix("91").unwrap_or(&digits)
        } else if digits.len() == 11 {
            digits.strip_prefix('0').unwrap_or(&digits)
        } else {
            digits.as_str()
        };

        if significant.len() != 10 {
            return Err(PhoneError::WrongLength(significant.len()));
        }

        if !significant.starts_with(['6', '7', '8', '9']) {
            return Err(PhoneError::InvalidLeadingDigit);
        }

        Ok(Self(significant.to_owned()))
    }

    /// Get the 10 significant digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Format the number in E.164, e.g. `+919876543210`.
    #[must_use]
    pub fn e164(&self) -> String {
        format!("+91{}", self.0)
    }

    /// Consume the number and return its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PhoneNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
