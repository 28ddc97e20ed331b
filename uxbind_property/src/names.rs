// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sets of property names touched since init.

use alloc::collections::BTreeSet;

use crate::key::{Namespace, PropertyKey};
use crate::update::PropertyUpdate;

/// The property names a widget must clean up.
///
/// Names are kept sorted, which groups them per [`Namespace`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyNameSets {
    names: BTreeSet<PropertyKey>,
}

impl PropertyNameSets {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every key of `update`.
    pub fn record(&mut self, update: &PropertyUpdate) {
        self.names.extend(update.keys().cloned());
    }

    /// Adds a name. Returns `true` if it was not present.
    pub fn insert(&mut self, key: impl Into<PropertyKey>) -> bool {
        self.names.insert(key.into())
    }

    /// Returns `true` if `key` is in the set.
    #[must_use]
    pub fn contains(&self, key: &PropertyKey) -> bool {
        self.names.contains(key)
    }

    /// Removes a name.
    pub fn remove(&mut self, key: &PropertyKey) -> bool {
        self.names.remove(key)
    }

    /// Returns the number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyKey> + '_ {
        self.names.iter()
    }

    /// Iterates the names of one namespace.
    pub fn namespace(&self, namespace: Namespace) -> impl Iterator<Item = &PropertyKey> + '_ {
        self.names.iter().filter(move |k| k.namespace() == namespace)
    }

    /// Moves every `<prefix>:<rest>` name into a new set keyed by `<rest>`.
    pub fn extract_prefixed(&mut self, prefix: &str) -> Self {
        let mut extracted = Self::new();
        self.names.retain(|key| match key.strip_sub_widget_prefix(prefix) {
            Some(child) => {
                extracted.names.insert(child);
                false
            }
            None => true,
        });
        extracted
    }
}

impl<K: Into<PropertyKey>> FromIterator<K> for PropertyNameSets {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_extract() {
        let update = PropertyUpdate::new()
            .with("a:value", 1)
            .with("a:class:x", true)
            .with("label-text", "l");
        let mut names = PropertyNameSets::new();
        names.record(&update);
        let a = names.extract_prefixed("a");
        assert!(a.contains(&PropertyKey::uniface("value")));
        assert!(a.contains(&PropertyKey::class("x")));
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn namespace_filter() {
        let names: PropertyNameSets = ["class:a", "html:b", "value"].into_iter().collect();
        assert_eq!(names.namespace(Namespace::Class).count(), 1);
        assert_eq!(names.iter().next(), Some(&PropertyKey::uniface("value")));
    }
}
