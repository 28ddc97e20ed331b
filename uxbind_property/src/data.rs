// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance property data.
//!
//! [`PropertyData`] is the bag of last-applied values a widget instance keeps,
//! and also the shape of a widget class's default values.
//!
//! # Implementation
//!
//! Entries live in a sorted `SmallVec` searched with binary search rather
//! than in a hash map. Widgets carry a few dozen properties at most, so this
//! keeps lookups cheap and the storage contiguous, and iteration comes out
//! grouped by [`Namespace`].

use alloc::string::String;
use smallvec::SmallVec;

use crate::coerce::to_boolean;
use crate::key::{Namespace, PropertyKey};
use crate::valrep::ValRep;
use crate::value::PropertyValue;

/// Inline capacity for property entries.
///
/// Most widgets register fewer than 16 defaults.
const INLINE_CAPACITY: usize = 16;

/// A sorted map from [`PropertyKey`] to [`PropertyValue`].
///
/// # Example
///
/// ```rust
/// use uxbind_property::{PropertyData, PropertyKey};
///
/// let mut data = PropertyData::new();
/// assert!(data.set(PropertyKey::html("disabled"), true.into()));
/// // Writing the same value again reports no change.
/// assert!(!data.set(PropertyKey::html("disabled"), true.into()));
/// assert!(data.flag("html:disabled"));
/// assert_eq!(data.text("value"), "");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyData {
    entries: SmallVec<[(PropertyKey, PropertyValue); INLINE_CAPACITY]>,
}

impl PropertyData {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    fn find(&self, key: &PropertyKey) -> Result<usize, usize> {
        self.entries.binary_search_by(|(k, _)| k.cmp(key))
    }

    /// Returns the value stored for `key`.
    #[must_use]
    pub fn get(&self, key: &PropertyKey) -> Option<&PropertyValue> {
        self.find(key).ok().map(|i| &self.entries[i].1)
    }

    /// Returns the value stored for the flat host key `name`.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&PropertyValue> {
        self.get(&PropertyKey::parse(name))
    }

    /// Returns `true` if a value is stored for `key`.
    #[must_use]
    pub fn contains(&self, key: &PropertyKey) -> bool {
        self.find(key).is_ok()
    }

    /// Stores `value` for `key`.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set(&mut self, key: PropertyKey, value: PropertyValue) -> bool {
        match self.find(&key) {
            Ok(i) => {
                if self.entries[i].1 == value {
                    false
                } else {
                    self.entries[i].1 = value;
                    true
                }
            }
            Err(i) => {
                self.entries.insert(i, (key, value));
                true
            }
        }
    }

    /// Removes and returns the value stored for `key`.
    pub fn remove(&mut self, key: &PropertyKey) -> Option<PropertyValue> {
        self.find(key).ok().map(|i| self.entries.remove(i).1)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&PropertyKey, &PropertyValue)> + '_ {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterates the entries of one namespace.
    pub fn namespace(
        &self,
        namespace: Namespace,
    ) -> impl Iterator<Item = (&PropertyKey, &PropertyValue)> + '_ {
        self.iter().filter(move |(k, _)| k.namespace() == namespace)
    }

    /// Returns the stringified value of `name`, or `""` when unset.
    #[must_use]
    pub fn text(&self, name: &str) -> String {
        self.value(name).map(PropertyValue::to_text).unwrap_or_default()
    }

    /// Returns the permissive boolean of `name`, `false` when unset.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.value(name).is_some_and(to_boolean)
    }

    /// Returns the leading integer of `name`, `None` when unset or not numeric.
    #[must_use]
    pub fn number(&self, name: &str) -> Option<i64> {
        self.value(name).and_then(PropertyValue::parse_integer)
    }

    /// Returns the table of `name`; a string value is parsed from its host
    /// form and anything else reads as an empty table.
    #[must_use]
    pub fn valrep(&self, name: &str) -> ValRep {
        match self.value(name) {
            Some(PropertyValue::ValRep(valrep)) => valrep.clone(),
            Some(PropertyValue::String(text)) => ValRep::parse(text),
            _ => ValRep::new(),
        }
    }
}

impl FromIterator<(PropertyKey, PropertyValue)> for PropertyData {
    fn from_iter<I: IntoIterator<Item = (PropertyKey, PropertyValue)>>(iter: I) -> Self {
        let mut data = Self::new();
        for (key, value) in iter {
            data.set(key, value);
        }
        data
    }
}

impl Extend<(PropertyKey, PropertyValue)> for PropertyData {
    fn extend<I: IntoIterator<Item = (PropertyKey, PropertyValue)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}
