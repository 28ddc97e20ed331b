// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM events.

use alloc::string::String;
use uxbind_property::PropertyValue;

use crate::node::NodeId;

/// An event dispatched on a node.
///
/// Dispatch only queues the event; whoever owns the event loop drains the
/// queue with [`Document::take_events`](crate::Document::take_events) and
/// routes each event to its subscribers.
#[derive(Clone, Debug, PartialEq)]
pub struct DomEvent {
    /// The node the event was dispatched on.
    pub target: NodeId,
    /// The event type, such as `"change"` or `"valuechange"`.
    pub name: String,
    /// Event payload.
    pub detail: PropertyValue,
    /// Whether a listener may cancel the default action.
    pub cancelable: bool,
}

impl DomEvent {
    /// Creates a non-cancelable event without payload.
    #[must_use]
    pub fn new(target: NodeId, name: impl Into<String>) -> Self {
        Self {
            target,
            name: name.into(),
            detail: PropertyValue::Null,
            cancelable: false,
        }
    }

    /// Sets the payload.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<PropertyValue>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Marks the event as cancelable.
    #[must_use]
    pub fn cancelable(mut self) -> Self {
        self.cancelable = true;
        self
    }

    /// Returns `true` if this is a `name` event on `target`.
    #[must_use]
    pub fn is(&self, target: NodeId, name: &str) -> bool {
        self.target == target && self.name == name
    }
}
