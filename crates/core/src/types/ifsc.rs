//! IFSC bank branch code type with validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Validation errors for IFSC codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IfscError {
    #[error("IFSC code cannot be empty")]
    Empty,

    #[error("IFSC code must be exactly 11 characters, got {0}")]
    WrongLength(usize),

    #[error("IFSC bank code must be 4 letters")]
    InvalidBankCode,

    #[error("IFSC fifth character must be 0")]
    InvalidReserved,

    #[error("IFSC branch code must be alphanumeric")]
    InvalidBranchCode,
}

/// A validated IFSC code identifying an Indian bank branch.
///
/// Format: 4 letters (bank), the literal `0`, then 6 alphanumeric
/// characters (branch). Stored uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IfscCode(String);

impl IfscCode {
    /// Parse and validate an IFSC code.
    ///
    /// Input is trimmed and uppercased before validation.
    ///
    /// # Errors
    ///
    /// Returns an [`IfscError`] describing the first failed check.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, IfscError> {
        let code = input.as_ref().trim().to_uppercase();

        if code.is_empty() {
            return Err(IfscError::Empty);
        }

        let bytes = code.as_bytes();
        if bytes.len() != 11 {
            return Err(IfscError::WrongLength(bytes.len()));
        }

        if !bytes.iter().take(4).all(u8::is_ascii_uppercase) {
            return Err(IfscError::InvalidBankCode);
        }

        if bytes.get(4) != Some(&b'0') {
            return Err(IfscError::InvalidReserved);
        }

        if !bytes.iter().skip(5).all(u8::is_ascii_alphanumeric) {
            return Err(IfscError::InvalidBranchCode);
        }

        Ok(Self(code))
    }

    /// Get the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the 4-letter bank code portion.
    #[must_use]
    pub fn bank_code(&self) -> &str {
        self.0.get(..4).unwrap_or_default()
    }

    /// Consume the code and return its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for IfscCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IfscCode {
    type Err = IfscError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for IfscCode {
    type Error = IfscError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<IfscCode> for String {
    fn from(code: IfscCode) -> Self {
        code.0
    }
}

impl AsRef<str> for IfscCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
