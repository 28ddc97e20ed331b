// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property updates pushed by the host.

use alloc::vec::Vec;

use crate::data::PropertyData;
use crate::key::{PropertyKey, VALREP};
use crate::valrep::ValRep;
use crate::value::PropertyValue;

/// The value side of one update entry.
///
/// A key that is absent from a [`PropertyUpdate`] means "no change";
/// [`UpdateValue::Reset`] means "clear back to the registered default".
#[derive(Clone, Debug, PartialEq)]
pub enum UpdateValue {
    /// Set the property to this value.
    Explicit(PropertyValue),
    /// Restore the property's registered default.
    Reset,
}

impl UpdateValue {
    /// Returns `true` for [`UpdateValue::Reset`].
    #[must_use]
    #[inline]
    pub fn is_reset(&self) -> bool {
        matches!(self, Self::Reset)
    }

    /// Returns the explicit value, if any.
    #[must_use]
    pub fn explicit(&self) -> Option<&PropertyValue> {
        match self {
            Self::Explicit(v) => Some(v),
            Self::Reset => None,
        }
    }
}

impl From<PropertyValue> for UpdateValue {
    fn from(value: PropertyValue) -> Self {
        Self::Explicit(value)
    }
}

/// An insertion-ordered set of property assignments.
///
/// Every key appears at most once; inserting a key again replaces its value
/// in place.
///
/// # Example
///
/// ```rust
/// use uxbind_property::{PropertyKey, PropertyUpdate, UpdateValue};
///
/// let update = PropertyUpdate::new()
///     .with("value", "yes")
///     .with("html:disabled", true)
///     .with_reset("label-text");
///
/// assert_eq!(update.len(), 3);
/// assert_eq!(
///     update.get(&PropertyKey::uniface("label-text")),
///     Some(&UpdateValue::Reset)
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyUpdate {
    entries: Vec<(PropertyKey, UpdateValue)>,
}

impl PropertyUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an update that explicitly assigns every entry of `data`.
    #[must_use]
    pub fn from_data(data: &PropertyData) -> Self {
        data.iter()
            .map(|(k, v)| (k.clone(), UpdateValue::Explicit(v.clone())))
            .collect()
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

    fn position(&self, key: &PropertyKey) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Inserts an entry, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<PropertyKey>, value: UpdateValue) -> Option<UpdateValue> {
        let key = key.into();
        match self.position(&key) {
            Some(i) => Some(core::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Assigns an explicit value.
    pub fn set(&mut self, key: impl Into<PropertyKey>, value: impl Into<PropertyValue>) {
        self.insert(key, UpdateValue::Explicit(value.into()));
    }

    /// Requests a reset to default.
    pub fn reset(&mut self, key: impl Into<PropertyKey>) {
        self.insert(key, UpdateValue::Reset);
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, key: impl Into<PropertyKey>, value: impl Into<PropertyValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Builder form of [`reset`](Self::reset).
    #[must_use]
    pub fn with_reset(mut self, key: impl Into<PropertyKey>) -> Self {
        self.reset(key);
        self
    }

    /// Returns the entry for `key`.
    #[must_use]
    pub fn get(&self, key: &PropertyKey) -> Option<&UpdateValue> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    /// Returns `true` if the update touches `key`.
    #[must_use]
    pub fn contains(&self, key: &PropertyKey) -> bool {
        self.position(key).is_some()
    }

    /// Removes the entry for `key`.
    pub fn remove(&mut self, key: &PropertyKey) -> Option<UpdateValue> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    /// Keeps only the entries for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&PropertyKey, &UpdateValue) -> bool) {
        self.entries.retain(|(k, v)| keep(k, v));
    }

    /// Iterates the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&PropertyKey, &UpdateValue)> + '_ {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterates the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &PropertyKey> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Moves every `<prefix>:<rest>` entry into a new update keyed by `<rest>`.
    ///
    /// The remainder is re-parsed, so `a:html:disabled` becomes `html:disabled`.
    /// A `valrep` given in host string form is parsed into a table.
    pub fn extract_prefixed(&mut self, prefix: &str) -> Self {
        let mut extracted = Self::new();
        self.entries.retain(|(key, value)| {
            let Some(child_key) = key.strip_sub_widget_prefix(prefix) else {
                return true;
            };
            let value = match value {
                UpdateValue::Explicit(PropertyValue::String(text)) if child_key.is_uniface(VALREP) => {
                    UpdateValue::Explicit(PropertyValue::ValRep(ValRep::parse(text)))
                }
                other => other.clone(),
            };
            extracted.insert(child_key, value);
            false
        });
        extracted
    }

    /// Copies the entries for `keys` into `target` without removing them here.
    ///
    /// Entries already present in `target` are left alone.
    pub fn copy_into<'a>(&self, keys: impl IntoIterator<Item = &'a PropertyKey>, target: &mut Self) {
        for key in keys {
            if let Some(value) = self.get(key)
                && !target.contains(key)
            {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

impl<K: Into<PropertyKey>> FromIterator<(K, UpdateValue)> for PropertyUpdate {
    fn from_iter<I: IntoIterator<Item = (K, UpdateValue)>>(iter: I) -> Self {
        let mut update = Self::new();
        for (key, value) in iter {
            update.insert(key, value);
        }
        update
    }
}

impl IntoIterator for PropertyUpdate {
    type Item = (PropertyKey, UpdateValue);
    type IntoIter = alloc::vec::IntoIter<(PropertyKey, UpdateValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
