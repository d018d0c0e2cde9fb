//! Request field parsing shared by the HTTP handlers.
//!
//! Every failure becomes an `invalid_request` error whose details name the
//! offending field and a stable sub-code, e.g.
//! `{"field": "uid8", "code": "invalid_uid8"}`.

use serde_json::{Value, json};

use crate::domain::{AccountId, Error, Handle, StarAmount, StarAmountValidationError};

/// Largest integer a JSON number can carry without losing precision.
const MAX_EXACT_FLOAT_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Sub-codes carried in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldErrorCode {
    MissingField,
    InvalidAccountId,
    InvalidHandle,
    InvalidAmount,
}

impl FieldErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidAccountId => "invalid_account_id",
            Self::InvalidHandle => "invalid_uid8",
            Self::InvalidAmount => "invalid_amount",
        }
    }
}

fn field_error(field: &str, code: FieldErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

/// Error for a required field that was absent or null.
pub(crate) fn missing_field_error(field: &str) -> Error {
    field_error(
        field,
        FieldErrorCode::MissingField,
        format!("missing required field: {field}"),
    )
}

/// Parse an account id given as a digit string, ignoring surrounding
/// whitespace.
pub(crate) fn parse_account_id_text(field: &str, raw: &str) -> Result<AccountId, Error> {
    AccountId::parse(raw.trim())
        .map_err(|err| field_error(field, FieldErrorCode::InvalidAccountId, err.to_string()))
}

/// Parse an account id given as a JSON string or non-negative integer.
pub(crate) fn parse_account_id(field: &str, raw: &Value) -> Result<AccountId, Error> {
    match raw {
        Value::String(text) => parse_account_id_text(field, text),
        Value::Number(number) => match number.as_u64() {
            Some(value) => parse_account_id_text(field, &value.to_string()),
            None => Err(field_error(
                field,
                FieldErrorCode::InvalidAccountId,
                "account id must be a non-negative integer",
            )),
        },
        _ => Err(field_error(
            field,
            FieldErrorCode::InvalidAccountId,
            "account id must be a digit string",
        )),
    }
}

/// Parse an 8-digit handle, ignoring surrounding whitespace.
pub(crate) fn parse_handle(field: &str, raw: &str) -> Result<Handle, Error> {
    Handle::parse(raw.trim())
        .map_err(|err| field_error(field, FieldErrorCode::InvalidHandle, err.to_string()))
}

fn amount_from_number(number: &serde_json::Number) -> Result<StarAmount, StarAmountValidationError> {
    if let Some(value) = number.as_i64() {
        return StarAmount::new(value);
    }
    if let Some(value) = number.as_u64() {
        return StarAmount::from_unsigned(value);
    }
    match number.as_f64() {
        Some(value) if value.fract() != 0.0 || !value.is_finite() => {
            Err(StarAmountValidationError::NotAnInteger)
        }
        Some(value) if value <= 0.0 => Err(StarAmountValidationError::NotPositive),
        Some(value) if value <= MAX_EXACT_FLOAT_INTEGER => {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "whole value within the exact f64 integer range"
            )]
            let whole = value as i64;
            StarAmount::new(whole)
        }
        Some(_) => Err(StarAmountValidationError::TooLarge),
        None => Err(StarAmountValidationError::NotAnInteger),
    }
}

/// Parse a deposit amount given as a JSON integer or a decimal string.
pub(crate) fn parse_amount(field: &str, raw: &Value) -> Result<StarAmount, Error> {
    let parsed = match raw {
        Value::Number(number) => amount_from_number(number),
        Value::String(text) => StarAmount::parse_decimal(text),
        _ => Err(StarAmountValidationError::NotAnInteger),
    };
    parsed.map_err(|err| field_error(field, FieldErrorCode::InvalidAmount, err.to_string()))
}
