// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coercion of loosely typed host values.
//!
//! Two grammars exist. [`to_boolean`] is the permissive one used for
//! configuration-like properties (`html:disabled`, `tri-state`, class
//! membership); it never fails. [`field_value_to_boolean`] and
//! [`field_value_to_tristate`] are the strict ones used for field values; they
//! return a [`FormatError`] for anything the control cannot represent.

use alloc::borrow::Cow;

use thiserror::Error;

use crate::value::PropertyValue;

/// Message shown when a field value cannot be represented by the control.
pub const DEFAULT_FORMAT_ERROR_MESSAGE: &str = "ERROR: Internal value cannot be represented by control. Either correct value or contact your system administrator.";

/// A field value could not be coerced into the control's representation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FormatError {
    message: Cow<'static, str>,
}

impl FormatError {
    /// Creates a format error with a custom message.
    #[must_use]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the user-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for FormatError {
    fn default() -> Self {
        Self::new(DEFAULT_FORMAT_ERROR_MESSAGE)
    }
}

/// Permissive truthiness.
///
/// Strings are true when their first character, uppercased, is one of
/// `1`, `T`, `Y` or `J`. Numbers are true when non-zero.
///
/// ```rust
/// use uxbind_property::{PropertyValue, to_boolean};
///
/// assert!(to_boolean(&PropertyValue::from("yes")));
/// assert!(to_boolean(&PropertyValue::from("Ja")));
/// assert!(!to_boolean(&PropertyValue::from("no")));
/// assert!(!to_boolean(&PropertyValue::Null));
/// ```
#[must_use]
pub fn to_boolean(value: &PropertyValue) -> bool {
    match value {
        PropertyValue::Bool(b) => *b,
        PropertyValue::String(s) => s
            .chars()
            .next()
            .is_some_and(|c| matches!(c.to_ascii_uppercase(), '1' | 'T' | 'Y' | 'J')),
        PropertyValue::Number(n) => *n != 0.0 && !n.is_nan(),
        PropertyValue::Null | PropertyValue::ValRep(_) => false,
    }
}

fn string_to_boolean(text: &str) -> Option<bool> {
    match text.to_lowercase().as_str() {
        "1" | "t" | "true" | "on" | "yes" => Some(true),
        "0" | "f" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn number_to_boolean(n: f64) -> Option<bool> {
    if n == 1.0 {
        Some(true)
    } else if n == 0.0 {
        Some(false)
    } else {
        None
    }
}

/// Strict two-state coercion of a field value.
///
/// # Errors
///
/// Returns [`FormatError`] for `null`, the empty string, unrecognized strings,
/// numbers other than `0` and `1`, and tables.
pub fn field_value_to_boolean(value: &PropertyValue) -> Result<bool, FormatError> {
    let coerced = match value {
        PropertyValue::Bool(b) => Some(*b),
        PropertyValue::String(s) => string_to_boolean(s),
        PropertyValue::Number(n) => number_to_boolean(*n),
        PropertyValue::Null | PropertyValue::ValRep(_) => None,
    };
    coerced.ok_or_else(FormatError::default)
}

/// Strict three-state coercion of a field value.
///
/// `null` and `""` map to `None` (indeterminate).
///
/// ```rust
/// use uxbind_property::{PropertyValue, field_value_to_tristate};
///
/// assert_eq!(field_value_to_tristate(&PropertyValue::from("ON")), Ok(Some(true)));
/// assert_eq!(field_value_to_tristate(&PropertyValue::from("")), Ok(None));
/// assert_eq!(field_value_to_tristate(&PropertyValue::from(0)), Ok(Some(false)));
/// assert!(field_value_to_tristate(&PropertyValue::from("bogus")).is_err());
/// ```
///
/// # Errors
///
/// Returns [`FormatError`] for unrecognized strings, numbers other than `0`
/// and `1`, and tables.
pub fn field_value_to_tristate(value: &PropertyValue) -> Result<Option<bool>, FormatError> {
    match value {
        PropertyValue::Null => Ok(None),
        PropertyValue::String(s) if s.is_empty() => Ok(None),
        other => field_value_to_boolean(other).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permissive_grammar() {
        for truthy in ["1", "t", "True", "y", "J", "yes please"] {
            assert!(to_boolean(&PropertyValue::from(truthy)), "{truthy}");
        }
        for falsy in ["", "0", "false", "n", "off", "on"] {
            assert!(!to_boolean(&PropertyValue::from(falsy)), "{falsy}");
        }
        assert!(to_boolean(&PropertyValue::from(-2)));
        assert!(!to_boolean(&PropertyValue::from(0)));
        assert!(!to_boolean(&PropertyValue::Number(f64::NAN)));
    }

    #[test]
    fn strict_boolean_table() {
        assert_eq!(field_value_to_boolean(&PropertyValue::from(true)), Ok(true));
        assert_eq!(field_value_to_boolean(&PropertyValue::from("OFF")), Ok(false));
        assert_eq!(field_value_to_boolean(&PropertyValue::from(1)), Ok(true));
        assert!(field_value_to_boolean(&PropertyValue::from(2)).is_err());
        assert!(field_value_to_boolean(&PropertyValue::Null).is_err());
        assert!(field_value_to_boolean(&PropertyValue::from("")).is_err());
    }

    #[test]
    fn tristate_table() {
        let cases = [
            (PropertyValue::from(false), Some(Some(false))),
            (PropertyValue::from(""), Some(None)),
            (PropertyValue::from("Yes"), Some(Some(true))),
            (PropertyValue::from("f"), Some(Some(false))),
            (PropertyValue::from("maybe"), None),
            (PropertyValue::from(1), Some(Some(true))),
            (PropertyValue::from(0.5), None),
            (PropertyValue::Null, Some(None)),
        ];
        for (input, expected) in cases {
            assert_eq!(field_value_to_tristate(&input).ok(), expected, "{input:?}");
        }
    }

    #[test]
    fn format_error_carries_the_standard_message() {
        let err = field_value_to_tristate(&PropertyValue::from("x")).unwrap_err();
        assert_eq!(err.message(), DEFAULT_FORMAT_ERROR_MESSAGE);
        assert_eq!(alloc::string::ToString::to_string(&err), DEFAULT_FORMAT_ERROR_MESSAGE);
    }
}
