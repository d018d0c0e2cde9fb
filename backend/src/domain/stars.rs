//! Star amounts accepted by deposits.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned when constructing a [`StarAmount`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StarAmountValidationError {
    /// Zero or negative amounts.
    #[error("amount must be a positive integer")]
    NotPositive,
    /// Text that is not a base-10 integer, or a fractional number.
    #[error("amount must be a whole number")]
    NotAnInteger,
    /// A positive integer larger than a balance can hold.
    #[error("amount exceeds the largest representable balance")]
    TooLarge,
}

/// A strictly positive number of stars.
///
/// Balances are stored as signed 64-bit integers, so amounts share that
/// range.
///
/// # Examples
/// ```
/// use starledger::domain::StarAmount;
///
/// assert_eq!(StarAmount::new(25).map(StarAmount::get), Ok(25));
/// assert!(StarAmount::new(0).is_err());
/// assert!(StarAmount::parse_decimal("-5").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct StarAmount(i64);

impl StarAmount {
    /// Validate a signed amount.
    pub fn new(value: i64) -> Result<Self, StarAmountValidationError> {
        if value <= 0 {
            return Err(StarAmountValidationError::NotPositive);
        }
        Ok(Self(value))
    }

    /// Validate an unsigned amount that may exceed `i64::MAX`.
    pub fn from_unsigned(value: u64) -> Result<Self, StarAmountValidationError> {
        let signed = i64::try_from(value).map_err(|_| StarAmountValidationError::TooLarge)?;
        Self::new(signed)
    }

    /// Parse a base-10 integer, tolerating surrounding whitespace and a
    /// leading sign.
    pub fn parse_decimal(raw: &str) -> Result<Self, StarAmountValidationError> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix('+')
            .or_else(|| trimmed.strip_prefix('-'))
            .unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(StarAmountValidationError::NotAnInteger);
        }
        if trimmed.starts_with('-') {
            return Err(StarAmountValidationError::NotPositive);
        }
        let value: u64 = digits
            .parse()
            .map_err(|_| StarAmountValidationError::TooLarge)?;
        Self::from_unsigned(value)
    }

    /// The amount as a signed integer.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for StarAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<StarAmount> for i64 {
    fn from(value: StarAmount) -> Self {
        value.0
    }
}

impl TryFrom<i64> for StarAmount {
    type Error = StarAmountValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
