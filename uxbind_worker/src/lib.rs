// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uxbind Worker: declarative widget classes and their instances.
//!
//! A widget class is a tree of [`Worker`]s. Each worker claims the
//! properties it renders and is refreshed whenever one of them changes, so
//! a class reads as a declaration of which property ends up where.
//!
//! - [`WidgetDescriptorBuilder`] numbers and registers a structure tree and
//!   produces an immutable [`WidgetDescriptor`]: setters, getters, defaults,
//!   triggers and sub-widgets.
//! - [`ClassRegistry`] holds descriptors by host name.
//! - [`Widget`] is one instance: layout, connect, data init, update and
//!   cleanup, value and event plumbing, validation and error display.
//! - [`workers`] is the library classes are assembled from.
//!
//! Updates are applied in two phases: every entry is written to the data
//! first, and then each affected worker refreshes exactly once. Workers
//! owning several related properties therefore always see them together.
//!
//! # Quick Start
//!
//! ```rust
//! use uxbind_dom::Document;
//! use uxbind_property::PropertyUpdate;
//! use uxbind_worker::workers::{Element, HtmlAttributeBoolean, StyleClass};
//! use uxbind_worker::{ClassRegistry, ObjectDefinition, Widget, WidgetDescriptorBuilder};
//!
//! let toggle = WidgetDescriptorBuilder::new("Toggle")
//!     .structure(
//!         Element::new("button")
//!             .child(StyleClass::new(["u-toggle"]))
//!             .child(HtmlAttributeBoolean::property("html:disabled", "disabled").default(false))
//!             .into_worker(),
//!     )
//!     .build()
//!     .unwrap();
//! let mut registry = ClassRegistry::new();
//! let toggle = registry.register(toggle).unwrap();
//!
//! let mut doc = Document::new();
//! let skeleton = doc.create_element("div").unwrap();
//! let mut object = ObjectDefinition::new("TOGGLE", "Toggle");
//! let root = Widget::process_layout(&toggle, &registry, &mut doc, skeleton, &mut object).unwrap();
//!
//! let mut widget = Widget::new(toggle);
//! widget.on_connect(&mut doc, root, &registry).unwrap();
//! widget.data_init(&mut doc).unwrap();
//! assert!(doc.has_class(root, "u-toggle"));
//!
//! widget
//!     .data_update(&mut doc, PropertyUpdate::new().with("html:disabled", "T"))
//!     .unwrap();
//! assert!(doc.property_flag(root, "disabled"));
//! ```

mod cx;
mod descriptor;
mod error;
mod format;
mod layout;
mod registry;
mod widget;
mod worker;

pub mod workers;

pub use cx::{ErrorState, InstanceView, WorkerCx};
pub use descriptor::{ValueFormatter, WidgetDescriptor, WidgetDescriptorBuilder};
pub use error::WidgetError;
pub use format::{FormattedValue, error_message};
pub use layout::{LayoutCx, ObjectDefinition};
pub use registry::ClassRegistry;
pub use widget::{VALIDATION_ERRORS_ID, Widget};
pub use worker::{
    Registrar, SubWidgetPlacement, SubWidgetRecord, TriggerMapping, Updater, Worker, WorkerId,
    sub_widget_style_class,
};
