// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uxbind Widgets: widget classes for Fluent web components.
//!
//! Each module declares one class with the worker library of
//! [`uxbind_worker`] plus the few workers specific to its control:
//!
//! - [`button`]: `UX.Button`, text and icon.
//! - [`checkbox`]: `UX.Checkbox`, with an optional indeterminate state.
//! - [`switch`]: `UX.Switch`.
//! - [`text_field`] and [`number_field`]: `UX.TextField` and
//!   `UX.NumberField`, with label, prefix, suffix and a commit button.
//! - [`select`]: `UX.Select` over a valrep.
//! - [`radio_group`] and [`listbox`]: `UX.RadioGroup` and `UX.Listbox`,
//!   one item per valrep entry.
//! - [`plain_text`]: `UX.PlainText`, read-only text in several formats.
//! - [`controlbar`]: `UX.Controlbar`, sub-widgets listed by the object.
//!
//! [`components`] models the custom elements themselves for an in-memory
//! [`Document`](uxbind_dom::Document).
//!
//! # Quick Start
//!
//! ```rust
//! use uxbind_dom::Document;
//! use uxbind_property::{PropertyUpdate, PropertyValue};
//! use uxbind_worker::{ClassRegistry, ObjectDefinition, Widget};
//! use uxbind_widgets::{checkbox, register_all, register_components};
//!
//! let mut registry = ClassRegistry::new();
//! register_all(&mut registry).unwrap();
//! let mut doc = Document::new();
//! register_components(&mut doc);
//!
//! let descriptor = registry.get(checkbox::NAME).unwrap().clone();
//! let skeleton = doc.create_element("div").unwrap();
//! let mut object = ObjectDefinition::new("AGREE", checkbox::NAME);
//! let root = Widget::process_layout(&descriptor, &registry, &mut doc, skeleton, &mut object).unwrap();
//! let mut widget = Widget::new(descriptor);
//! widget.on_connect(&mut doc, root, &registry).unwrap();
//! widget.data_init(&mut doc).unwrap();
//!
//! widget
//!     .data_update(&mut doc, PropertyUpdate::new().with("value", "1"))
//!     .unwrap();
//! assert!(doc.property_flag(root, "checked"));
//! assert_eq!(widget.value(&doc), PropertyValue::from(true));
//! ```

mod control;
mod indexed;
mod shadow;

pub mod button;
pub mod checkbox;
pub mod components;
pub mod controlbar;
pub mod listbox;
pub mod number_field;
pub mod plain_text;
pub mod radio_group;
pub mod select;
pub mod switch;
pub mod text_field;

pub use components::register_components;

use uxbind_worker::{ClassRegistry, WidgetDescriptor, WidgetError};

/// Registers every widget class.
///
/// `UX.Button` comes first, as the text and number fields embed it.
///
/// # Errors
///
/// [`WidgetError::DuplicateClass`] when a class is already registered, and
/// registration conflicts while building a class.
pub fn register_all(registry: &mut ClassRegistry) -> Result<(), WidgetError> {
    let classes: [fn() -> Result<WidgetDescriptor, WidgetError>; 10] = [
        button::descriptor,
        checkbox::descriptor,
        switch::descriptor,
        text_field::descriptor,
        number_field::descriptor,
        select::descriptor,
        radio_group::descriptor,
        listbox::descriptor,
        plain_text::descriptor,
        controlbar::descriptor,
    ];
    for class in classes {
        let descriptor = registry.register(class()?)?;
        tracing::debug!(widget = %descriptor.name(), "registered");
    }
    Ok(())
}
