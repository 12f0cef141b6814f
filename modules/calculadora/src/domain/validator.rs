//! Numeric input validation.
//!
//! Every value that reaches an arithmetic function or a register passes
//! through here first. Inputs come either from query strings (always text)
//! or from JSON bodies, where the browser client sends form values as
//! strings and API clients send plain numbers. Both shapes are accepted.

use serde_json::Value;

/// Reason a raw input could not be turned into a usable number.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Falta el campo '{field}'")]
    MissingField { field: &'static str },

    #[error("Los valores deben ser n\u{fa}meros")]
    NotANumber { field: &'static str },

    #[error("El campo '{field}' debe ser un arreglo")]
    NotAnArray { field: &'static str },

    #[error("El arreglo '{field}' no puede estar vac\u{ed}o")]
    EmptyArray { field: &'static str },
}

impl ValidationError {
    /// Name of the request field that failed validation.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field }
            | Self::NotANumber { field }
            | Self::NotAnArray { field }
            | Self::EmptyArray { field } => field,
        }
    }
}

/// Parse a textual token as a finite `f64`.
///
/// Surrounding whitespace is ignored. `inf`, `NaN` and anything else that
/// does not yield a finite value is rejected.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Interpret a JSON value as a finite number (number or numeric string).
#[must_use]
pub fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|value| value.is_finite()),
        Value::String(text) => parse_number(text),
        _ => None,
    }
}

/// Require a numeric JSON body field. `null` counts as absent.
///
/// # Errors
/// `MissingField` when the field is absent or `null`, `NotANumber` when it
/// holds anything that is not a finite number.
pub fn require_number(field: &'static str, value: Option<&Value>) -> Result<f64, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::MissingField { field }),
        Some(value) => number_from_value(value).ok_or(ValidationError::NotANumber { field }),
    }
}

/// Require a numeric query-string parameter.
///
/// # Errors
/// `MissingField` when the parameter is absent, `NotANumber` when it does
/// not parse as a finite number (an empty value included).
pub fn require_query_number(
    field: &'static str,
    raw: Option<&str>,
) -> Result<f64, ValidationError> {
    let raw = raw.ok_or(ValidationError::MissingField { field })?;
    parse_number(raw).ok_or(ValidationError::NotANumber { field })
}

/// Require a JSON array field and borrow its elements.
///
/// # Errors
/// `NotAnArray` when the field is absent or holds a non-array value.
pub fn require_list<'a>(
    field: &'static str,
    value: Option<&'a Value>,
) -> Result<&'a [Value], ValidationError> {
    match value {
        Some(Value::Array(items)) => Ok(items.as_slice()),
        _ => Err(ValidationError::NotAnArray { field }),
    }
}

/// Like [`require_list`], additionally rejecting an empty array.
///
/// # Errors
/// `NotAnArray` as in [`require_list`], `EmptyArray` when there are no
/// elements.
pub fn require_non_empty_list<'a>(
    field: &'static str,
    value: Option<&'a Value>,
) -> Result<&'a [Value], ValidationError> {
    let items = require_list(field, value)?;
    if items.is_empty() {
        return Err(ValidationError::EmptyArray { field });
    }
    Ok(items)
}

/// Lenient element conversion used by the list endpoints: anything that is
/// not a number or a numeric string counts as `0`.
#[must_use]
pub fn lenient_numbers(items: &[Value]) -> Vec<f64> {
    items
        .iter()
        .map(|item| number_from_value(item).unwrap_or(0.0))
        .collect()
}
