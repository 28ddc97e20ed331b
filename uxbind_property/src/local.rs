// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-erased worker-local instance state.
//!
//! Workers are shared by every instance of a widget class, so anything a
//! worker needs to remember per instance (the last value it wrote, a
//! reentrancy guard) lives in the instance's [`LocalState`], keyed by a
//! static name the worker chooses.

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;
use smallvec::SmallVec;

/// A type-erased local value.
struct LocalValue {
    inner: Box<dyn Any>,
    type_id: TypeId,
}

impl LocalValue {
    fn new<T: 'static>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            inner: Box::new(value),
        }
    }

    fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.inner.downcast_mut()
    }
}

/// Per-instance scratch storage for workers.
///
/// # Example
///
/// ```rust
/// use uxbind_property::LocalState;
///
/// let mut locals = LocalState::new();
/// locals.set("ignore-change", true);
/// assert_eq!(locals.get::<bool>("ignore-change"), Some(&true));
/// // Reading with the wrong type yields nothing.
/// assert_eq!(locals.get::<u32>("ignore-change"), None);
/// ```
#[derive(Default)]
pub struct LocalState {
    entries: SmallVec<[(&'static str, LocalValue); 4]>,
}

impl LocalState {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn find(&self, key: &str) -> Result<usize, usize> {
        self.entries.binary_search_by(|(k, _)| (*k).cmp(key))
    }

    /// Returns the value stored under `key` if it has type `T`.
    #[must_use]
    pub fn get<T: 'static>(&self, key: &str) -> Option<&T> {
        let i = self.find(key).ok()?;
        self.entries[i].1.downcast_ref()
    }

    /// Returns a mutable reference to the value under `key` if it has type `T`.
    pub fn get_mut<T: 'static>(&mut self, key: &str) -> Option<&mut T> {
        let i = self.find(key).ok()?;
        self.entries[i].1.downcast_mut()
    }

    /// Returns a copy of the value under `key`, or `default`.
    #[must_use]
    pub fn get_or<T: Copy + 'static>(&self, key: &str, default: T) -> T {
        self.get(key).copied().unwrap_or(default)
    }

    /// Stores `value` under `key`, replacing any previous value of any type.
    pub fn set<T: 'static>(&mut self, key: &'static str, value: T) {
        let value = LocalValue::new(value);
        match self.find(key) {
            Ok(i) => self.entries[i].1 = value,
            Err(i) => self.entries.insert(i, (key, value)),
        }
    }

    /// Removes the value under `key`. Returns `true` if one was present.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.find(key) {
            Ok(i) => {
                self.entries.remove(i);
                true
            }
            Err(_) => false,
        }
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for LocalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for (key, value) in &self.entries {
            list.entry(&(key, value.type_id));
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::String;

    #[test]
    fn set_replaces_across_types() {
        let mut locals = LocalState::new();
        locals.set("k", 1_u32);
        locals.set("k", String::from("x"));
        assert_eq!(locals.len(), 1);
        assert_eq!(locals.get::<u32>("k"), None);
        assert_eq!(locals.get::<String>("k").map(String::as_str), Some("x"));
    }

    #[test]
    fn get_mut_and_remove() {
        let mut locals = LocalState::new();
        locals.set("count", 1_i32);
        *locals.get_mut::<i32>("count").unwrap() += 1;
        assert_eq!(locals.get_or("count", 0_i32), 2);
        assert!(locals.remove("count"));
        assert!(!locals.remove("count"));
        assert_eq!(locals.get_or("count", 0_i32), 0);
    }

    #[test]
    fn debug_lists_keys() {
        let mut locals = LocalState::new();
        locals.set("guard", false);
        let debug = format!("{locals:?}");
        assert!(debug.contains("guard"));
    }
}
