// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value → representation tables.

use alloc::string::String;
use alloc::vec::Vec;

/// Separator between list items in host strings.
pub const GOLD_SEPARATOR: char = '\u{1b}';

/// One row of a [`ValRep`] table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValRepEntry {
    /// The field value.
    pub value: String,
    /// The text shown for the value.
    pub representation: String,
}

/// An ordered value → representation lookup table.
///
/// # Example
///
/// ```rust
/// use uxbind_property::ValRep;
///
/// let valrep = ValRep::parse("1=one\u{1b}2=two");
/// assert_eq!(valrep.len(), 2);
/// assert_eq!(valrep.position("2"), Some(1));
/// assert_eq!(valrep.find("1").map(|e| e.representation.as_str()), Some("one"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValRep {
    entries: Vec<ValRepEntry>,
}

impl ValRep {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the host string form: `value=rep` items separated by [`GOLD_SEPARATOR`].
    ///
    /// Only the first `=` of an item separates value and representation. An
    /// item without `=` has an empty representation.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self::new();
        }
        text.split(GOLD_SEPARATOR)
            .map(|item| match item.split_once('=') {
                Some((value, representation)) => (value, representation),
                None => (item, ""),
            })
            .collect()
    }

    /// Appends a row.
    pub fn push(&mut self, value: impl Into<String>, representation: impl Into<String>) {
        self.entries.push(ValRepEntry {
            value: value.into(),
            representation: representation.into(),
        });
    }

    /// Returns the number of rows.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no rows.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the row at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ValRepEntry> {
        self.entries.get(index)
    }

    /// Returns the first row whose value is `value`.
    #[must_use]
    pub fn find(&self, value: &str) -> Option<&ValRepEntry> {
        self.entries.iter().find(|e| e.value == value)
    }

    /// Returns the index of the first row whose value is `value`.
    #[must_use]
    pub fn position(&self, value: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.value == value)
    }

    /// Iterates the rows in order.
    pub fn iter(&self) -> core::slice::Iter<'_, ValRepEntry> {
        self.entries.iter()
    }

    /// Formats the table back into the host string form.
    #[must_use]
    pub fn to_gold_string(&self) -> String {
        let mut out = String::new();
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push(GOLD_SEPARATOR);
            }
            out.push_str(&entry.value);
            out.push('=');
            out.push_str(&entry.representation);
        }
        out
    }
}

impl<V: Into<String>, R: Into<String>> FromIterator<(V, R)> for ValRep {
    fn from_iter<I: IntoIterator<Item = (V, R)>>(iter: I) -> Self {
        let mut valrep = Self::new();
        for (value, representation) in iter {
            valrep.push(value, representation);
        }
        valrep
    }
}

impl<'a> IntoIterator for &'a ValRep {
    type Item = &'a ValRepEntry;
    type IntoIter = core::slice::Iter<'a, ValRepEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_first_equals() {
        let valrep = ValRep::parse("a=x=y\u{1b}b");
        assert_eq!(valrep.get(0).unwrap().representation, "x=y");
        assert_eq!(valrep.get(1).unwrap().value, "b");
        assert_eq!(valrep.get(1).unwrap().representation, "");
    }

    #[test]
    fn empty_string_is_empty_table() {
        assert!(ValRep::parse("").is_empty());
    }

    #[test]
    fn gold_string_round_trip() {
        let text = "1=one\u{1b}2=two";
        assert_eq!(ValRep::parse(text).to_gold_string(), text);
    }

    #[test]
    fn duplicate_values_resolve_to_first_row() {
        let valrep: ValRep = [("1", "first"), ("1", "second")].into_iter().collect();
        assert_eq!(valrep.find("1").unwrap().representation, "first");
        assert_eq!(valrep.position("1"), Some(0));
    }
}
