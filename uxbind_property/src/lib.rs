// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uxbind Property: the vocabulary of widget property updates.
//!
//! Hosts drive widgets with flat, loosely typed property updates. This crate
//! models those updates and the state a widget keeps about them. It has no
//! knowledge of the DOM or of workers; see `uxbind_worker` for the engine.
//!
//! ## Core Concepts
//!
//! - [`PropertyKey`]: a [`Namespace`] (`uniface`, `html:`, `style:`, `class:`)
//!   plus a bare name, parsed from host strings like `"html:disabled"`.
//! - [`PropertyValue`]: `Null`, bool, number, string or a [`ValRep`] table.
//! - [`PropertyUpdate`]: an ordered set of [`UpdateValue`]s. A missing key
//!   means "no change" and [`UpdateValue::Reset`] means "back to default".
//! - [`PropertyData`]: the sorted bag of last-applied values an instance keeps.
//! - [`PropertyNameSets`]: the names a widget must clean up.
//! - [`LocalState`]: type-erased per-instance scratch state for workers.
//!
//! Coercion follows two grammars: the permissive [`to_boolean`] and the
//! strict [`field_value_to_boolean`] / [`field_value_to_tristate`], which
//! return a [`FormatError`] instead of guessing.
//!
//! ## Quick Start
//!
//! ```rust
//! use uxbind_property::{
//!     PropertyData, PropertyKey, PropertyUpdate, UpdateValue, field_value_to_tristate,
//! };
//!
//! let defaults: PropertyData = [(PropertyKey::uniface("value"), false.into())]
//!     .into_iter()
//!     .collect();
//!
//! let update = PropertyUpdate::new().with_reset("value");
//! for (key, change) in update.iter() {
//!     let resolved = match change {
//!         UpdateValue::Explicit(v) => v.clone(),
//!         UpdateValue::Reset => defaults.get(key).cloned().unwrap_or_default(),
//!     };
//!     assert_eq!(field_value_to_tristate(&resolved), Ok(Some(false)));
//! }
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod coerce;
mod data;
mod key;
mod local;
mod names;
mod update;
mod valrep;
mod value;

pub use coerce::{
    DEFAULT_FORMAT_ERROR_MESSAGE, FormatError, field_value_to_boolean, field_value_to_tristate,
    to_boolean,
};
pub use data::PropertyData;
pub use key::{
    ERROR, ERROR_MESSAGE, FORMAT_ERROR, FORMAT_ERROR_MESSAGE, Namespace, PropertyKey, UI_BLOCKED,
    VALREP, VALUE, WILDCARD,
};
pub use local::LocalState;
pub use names::PropertyNameSets;
pub use update::{PropertyUpdate, UpdateValue};
pub use valrep::{GOLD_SEPARATOR, ValRep, ValRepEntry};
pub use value::PropertyValue;
