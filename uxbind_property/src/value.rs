// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dynamic property values.

use alloc::format;
use alloc::string::{String, ToString};
use core::fmt;

use crate::valrep::ValRep;

/// A property value as pushed by the host or stored in a widget's data bag.
///
/// Values are loosely typed: the host may send `"1"`, `1` or `true` for the
/// same boolean property. Workers coerce on read.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PropertyValue {
    /// No value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    String(String),
    /// A value → representation table.
    ValRep(ValRep),
}

impl PropertyValue {
    /// Returns `true` for [`PropertyValue::Null`].
    #[must_use]
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for `Null` and for the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns the string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the numeric payload, if this is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the table payload, if this is a valrep table.
    #[must_use]
    pub fn as_valrep(&self) -> Option<&ValRep> {
        match self {
            Self::ValRep(v) => Some(v),
            _ => None,
        }
    }

    /// Stringifies the value the way a DOM attribute write would.
    ///
    /// `Null` becomes the empty string and integral numbers print without a
    /// fractional part.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::String(s) => s.clone(),
            Self::ValRep(v) => v.to_gold_string(),
        }
    }

    /// Parses a leading integer, like `parseInt(value, 10)`.
    ///
    /// Leading whitespace and a sign are accepted and trailing garbage is
    /// ignored; a value without leading digits yields `None`.
    #[must_use]
    pub fn parse_integer(&self) -> Option<i64> {
        match self {
            Self::Number(n) if n.is_finite() => {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "truncation toward zero is the parseInt behavior"
                )]
                let truncated = *n as i64;
                Some(truncated)
            }
            Self::String(s) => parse_int_prefix(s),
            _ => None,
        }
    }
}

/// Integral numbers print without a fraction. The integer casts stand in
/// for `f64::trunc`/`f64::fract`, which `core` lacks.
fn format_number(n: f64) -> String {
    if n > -1e15 && n < 1e15 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "within i64 range; compared back to detect a fraction"
        )]
        let int = n as i64;
        #[allow(
            clippy::cast_precision_loss,
            reason = "|int| < 1e15 is exactly representable"
        )]
        let round_trip = int as f64;
        if round_trip == n {
            return format!("{int}");
        }
    }
    format!("{n}")
}

fn parse_int_prefix(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<ValRep> for PropertyValue {
    fn from(value: ValRep) -> Self {
        Self::ValRep(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_of_numbers() {
        assert_eq!(PropertyValue::from(3).to_text(), "3");
        assert_eq!(PropertyValue::from(-0.5).to_text(), "-0.5");
        assert_eq!(PropertyValue::Null.to_text(), "");
        assert_eq!(PropertyValue::from(true).to_text(), "true");
    }

    #[test]
    fn text_of_number_edges() {
        assert_eq!(PropertyValue::from(-0.0).to_text(), "0");
        assert_eq!(PropertyValue::from(-12.0).to_text(), "-12");
        assert_eq!(PropertyValue::from(1e15).to_text(), "1000000000000000");
        assert_eq!(PropertyValue::from(f64::NAN).to_text(), "NaN");
        assert_eq!(PropertyValue::from(f64::INFINITY).to_text(), "inf");
    }

    #[test]
    fn parse_integer_prefix() {
        assert_eq!(PropertyValue::from("12px").parse_integer(), Some(12));
        assert_eq!(PropertyValue::from("  -7").parse_integer(), Some(-7));
        assert_eq!(PropertyValue::from("+4").parse_integer(), Some(4));
        assert_eq!(PropertyValue::from("px").parse_integer(), None);
        assert_eq!(PropertyValue::from("-").parse_integer(), None);
        assert_eq!(PropertyValue::from(2.9).parse_integer(), Some(2));
        assert_eq!(PropertyValue::from(-2.9).parse_integer(), Some(-2));
        assert_eq!(PropertyValue::from(f64::NAN).parse_integer(), None);
        assert_eq!(PropertyValue::Null.parse_integer(), None);
        assert_eq!(PropertyValue::from(true).parse_integer(), None);
    }

    #[test]
    fn empty_values() {
        assert!(PropertyValue::Null.is_empty());
        assert!(PropertyValue::from("").is_empty());
        assert!(!PropertyValue::from(0).is_empty());
        assert!(!PropertyValue::from(false).is_empty());
    }

    #[test]
    fn option_conversion() {
        assert_eq!(PropertyValue::from(None::<bool>), PropertyValue::Null);
        assert_eq!(PropertyValue::from(Some(true)), PropertyValue::Bool(true));
    }
}
