// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uxbind DOM: a small in-memory element tree for widget adapters.
//!
//! Widget adapters manipulate elements: they toggle classes, write
//! attributes and inline styles, set DOM properties on custom elements and
//! listen for events. This crate provides just enough of a document model to
//! run them headless and to observe exactly what they did.
//!
//! - [`Document`]: an arena of elements addressed by [`NodeId`], with light
//!   and shadow children, attributes, classes, styles, DOM properties and text.
//! - [`Selector`]: compound selectors (`tag.class#id[attr=value]`) for
//!   [`Document::query_selector`].
//! - [`Component`]: per-tag behavior standing in for third-party custom
//!   elements. A component can build shadow content, veto property writes,
//!   react to property changes and handle clicks.
//! - [`DomEvent`]: events are queued by [`Document::dispatch_event`] and
//!   drained by the owner of the event loop.
//!
//! # Quick Start
//!
//! ```rust
//! use uxbind_dom::{Document, DomEvent, Selector};
//!
//! let mut doc = Document::new();
//! let field = doc.create_element("div").unwrap();
//! let label = doc.create_element("span").unwrap();
//! doc.add_class(label, "u-label-text").unwrap();
//! doc.append_child(field, label).unwrap();
//! doc.append_child(doc.body(), field).unwrap();
//!
//! let found = doc.query_selector(field, &Selector::class("u-label-text"));
//! assert_eq!(found, Some(label));
//!
//! doc.set_text(label, "Name").unwrap();
//! assert_eq!(doc.text_content(field), "Name");
//!
//! doc.dispatch_event(DomEvent::new(field, "change"));
//! assert_eq!(doc.take_events_for(field, "change").len(), 1);
//! assert!(doc.pending_events().is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod component;
mod document;
mod error;
mod event;
mod node;
mod selector;

pub use component::Component;
pub use document::Document;
pub use error::DomError;
pub use event::DomEvent;
pub use node::NodeId;
pub use selector::Selector;
