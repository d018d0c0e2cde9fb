//! External account identifier.
//!
//! Account ids are supplied by the messaging platform the front end runs
//! inside. They are non-negative integers of unbounded width and travel as
//! digit strings, so the type never converts them to a machine integer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest digit string accepted as an account id.
pub const ACCOUNT_ID_MAX_DIGITS: usize = 64;

/// Validation errors returned by [`AccountId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountIdValidationError {
    /// The input was empty.
    #[error("account id must not be empty")]
    Empty,
    /// The input contained something other than ASCII digits.
    #[error("account id must contain only decimal digits")]
    NonDigit,
    /// The input exceeded [`ACCOUNT_ID_MAX_DIGITS`].
    #[error("account id must be at most {max} digits")]
    TooLong { max: usize },
}

/// Canonical external account id.
///
/// ## Invariants
/// - Contains only ASCII digits.
/// - Has no leading zeros, except the single id `"0"`, so `"0042"` and `"42"`
///   name the same account.
///
/// # Examples
/// ```
/// use starledger::domain::AccountId;
///
/// let id = AccountId::parse("000123").expect("digits");
/// assert_eq!(id.as_str(), "123");
/// assert!(AccountId::parse("12a").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Validate and canonicalise a digit string.
    pub fn parse(raw: &str) -> Result<Self, AccountIdValidationError> {
        if raw.is_empty() {
            return Err(AccountIdValidationError::Empty);
        }
        if !raw.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(AccountIdValidationError::NonDigit);
        }
        if raw.len() > ACCOUNT_ID_MAX_DIGITS {
            return Err(AccountIdValidationError::TooLong {
                max: ACCOUNT_ID_MAX_DIGITS,
            });
        }

        let trimmed = raw.trim_start_matches('0');
        let canonical = if trimmed.is_empty() { "0" } else { trimmed };
        Ok(Self(canonical.to_owned()))
    }

    /// Canonical digit string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}
