//! Exchange handles: the 8-digit public identifiers issued per account.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of decimal digits in a handle.
pub const HANDLE_DIGITS: usize = 8;

/// Size of the handle space (`10^8`).
pub const HANDLE_SPACE: u32 = 100_000_000;

/// Validation errors returned by [`Handle::parse`] and [`Handle::from_index`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandleValidationError {
    /// The input was not exactly eight ASCII digits.
    #[error("handle must be exactly {HANDLE_DIGITS} decimal digits")]
    Malformed,
    /// The numeric index fell outside `0..HANDLE_SPACE`.
    #[error("handle index {index} is outside the handle space")]
    OutOfRange { index: u32 },
}

/// An 8-digit exchange handle, leading zeros included.
///
/// # Examples
/// ```
/// use starledger::domain::Handle;
///
/// let handle = Handle::from_index(42_017).expect("in range");
/// assert_eq!(handle.as_str(), "00042017");
/// assert_eq!(Handle::parse("00042017"), Ok(handle));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Handle(String);

impl Handle {
    /// Validate an 8-digit string.
    pub fn parse(raw: &str) -> Result<Self, HandleValidationError> {
        if raw.len() != HANDLE_DIGITS || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(HandleValidationError::Malformed);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Render a position in the handle space as a zero-padded handle.
    pub fn from_index(index: u32) -> Result<Self, HandleValidationError> {
        if index >= HANDLE_SPACE {
            return Err(HandleValidationError::OutOfRange { index });
        }
        Ok(Self(format!("{index:0width$}", width = HANDLE_DIGITS)))
    }

    /// The eight digits.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Handle> for String {
    fn from(value: Handle) -> Self {
        value.0
    }
}

impl TryFrom<String> for Handle {
    type Error = HandleValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}
