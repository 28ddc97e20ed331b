// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Custom element behavior.

use core::fmt;
use uxbind_property::PropertyValue;

use crate::document::Document;
use crate::error::DomError;
use crate::node::NodeId;

/// Behavior of a custom element, registered per tag name.
///
/// This is how a [`Document`] models third-party web components: they build
/// their own shadow structure, may reject property writes, emit events when
/// their state changes, and react to user activation.
///
/// All hooks default to doing nothing.
pub trait Component: fmt::Debug {
    /// Called once when an element with this component's tag is created.
    ///
    /// # Errors
    ///
    /// Propagates document errors from building the internal structure.
    fn construct(&self, doc: &mut Document, host: NodeId) -> Result<(), DomError> {
        let _ = (doc, host);
        Ok(())
    }

    /// Called before a DOM property is written. Returning an error aborts
    /// the write, like a setter that throws.
    ///
    /// # Errors
    ///
    /// [`DomError::Component`] when the component refuses the value.
    fn will_set_property(
        &self,
        doc: &Document,
        host: NodeId,
        name: &str,
        value: &PropertyValue,
    ) -> Result<(), DomError> {
        let _ = (doc, host, name, value);
        Ok(())
    }

    /// Called after a DOM property changed value.
    ///
    /// # Errors
    ///
    /// Propagates document errors from reacting to the change.
    fn property_changed(
        &self,
        doc: &mut Document,
        host: NodeId,
        name: &str,
        old: &PropertyValue,
    ) -> Result<(), DomError> {
        let _ = (doc, host, name, old);
        Ok(())
    }

    /// Simulates a user click on the element.
    ///
    /// The default dispatches a `click` event.
    ///
    /// # Errors
    ///
    /// Propagates document errors from reacting to the click.
    fn activate(&self, doc: &mut Document, host: NodeId) -> Result<(), DomError> {
        doc.dispatch_event(crate::DomEvent::new(host, "click"));
        Ok(())
    }
}
