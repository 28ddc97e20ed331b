// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Building a widget's DOM from its structure tree.

use std::fmt;
use std::rc::Rc;

use uxbind_dom::{Document, NodeId};
use uxbind_property::{PropertyData, PropertyKey, PropertyValue};

use crate::error::WidgetError;
use crate::registry::ClassRegistry;
use crate::widget::Widget;
use crate::worker::Worker;

/// The host's static description of one object: its widget class and the
/// properties known before any instance exists.
///
/// Layout reads it (dynamic sub-widget lists, child classes) and writes
/// back to it (skeleton classes, the sub-widget ids that were created).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectDefinition {
    name: String,
    widget_class: String,
    properties: PropertyData,
}

impl ObjectDefinition {
    /// Creates a definition for object `name` rendered by `widget_class`.
    #[must_use]
    pub fn new(name: impl Into<String>, widget_class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            widget_class: widget_class.into(),
            properties: PropertyData::new(),
        }
    }

    /// Adds a property.
    #[must_use]
    pub fn with_property(
        mut self,
        key: impl Into<PropertyKey>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.set_property(key, value);
        self
    }

    /// The object name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The widget class rendering this object.
    #[must_use]
    #[inline]
    pub fn widget_class(&self) -> &str {
        &self.widget_class
    }

    /// Reads the property with flat host key `key`.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(&PropertyKey::parse(key))
    }

    /// Reads a property as text; unset and empty read as `None`.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        self.property(key)
            .filter(|v| !v.is_empty())
            .map(PropertyValue::to_text)
    }

    /// Writes a property.
    pub fn set_property(&mut self, key: impl Into<PropertyKey>, value: impl Into<PropertyValue>) {
        self.properties.set(key.into(), value.into());
    }

    /// All properties.
    #[must_use]
    #[inline]
    pub fn properties(&self) -> &PropertyData {
        &self.properties
    }
}

/// Context for [`Worker::layout`].
pub struct LayoutCx<'a> {
    doc: &'a mut Document,
    registry: &'a ClassRegistry,
    object: &'a mut ObjectDefinition,
    widget: &'a str,
}

impl fmt::Debug for LayoutCx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutCx")
            .field("widget", &self.widget)
            .field("object", &self.object.name())
            .finish_non_exhaustive()
    }
}

impl<'a> LayoutCx<'a> {
    pub(crate) fn new(
        doc: &'a mut Document,
        registry: &'a ClassRegistry,
        object: &'a mut ObjectDefinition,
        widget: &'a str,
    ) -> Self {
        Self {
            doc,
            registry,
            object,
            widget,
        }
    }

    /// The document being built into.
    #[inline]
    pub fn doc(&mut self) -> &mut Document {
        self.doc
    }

    /// Widget classes available to sub-widgets.
    #[must_use]
    #[inline]
    pub fn registry(&self) -> &ClassRegistry {
        self.registry
    }

    /// The object being laid out.
    #[must_use]
    #[inline]
    pub fn object(&self) -> &ObjectDefinition {
        self.object
    }

    /// The object being laid out, for writing back.
    #[inline]
    pub fn object_mut(&mut self) -> &mut ObjectDefinition {
        self.object
    }

    /// Name of the widget class being laid out.
    #[must_use]
    #[inline]
    pub fn widget_name(&self) -> &str {
        self.widget
    }

    /// Lays out `children` and appends their elements to `parent`.
    ///
    /// # Errors
    ///
    /// The first failing child layout.
    pub fn layout_children(
        &mut self,
        children: &[Rc<dyn Worker>],
        parent: NodeId,
    ) -> Result<(), WidgetError> {
        for child in children {
            for node in child.layout(self)? {
                self.doc.append_child(parent, node)?;
            }
        }
        Ok(())
    }

    /// Lays out an instance of widget class `class_name` as a sub-widget and
    /// returns its root element.
    ///
    /// # Errors
    ///
    /// [`WidgetError::UnknownWidgetClass`] and layout failures of the child.
    pub fn layout_sub_widget(&mut self, class_name: &str, tag: &str) -> Result<NodeId, WidgetError> {
        let descriptor = Rc::clone(self.registry.get(class_name)?);
        let skeleton = self.doc.create_element(tag)?;
        Widget::process_layout(&descriptor, self.registry, self.doc, skeleton, self.object)
    }
}
