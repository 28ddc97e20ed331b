// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use uxbind_dom::{Document, NodeId, Selector};
use uxbind_property::{
    ERROR, ERROR_MESSAGE, FORMAT_ERROR, FORMAT_ERROR_MESSAGE, PropertyKey, PropertyValue,
};

use crate::cx::WorkerCx;
use crate::error::WidgetError;
use crate::layout::LayoutCx;
use crate::worker::{Registrar, Worker};

const ICON_CLASS: &str = "ms-Icon";

/// Removes `ms-Icon` and every `ms-Icon--<name>` class from `element`.
///
/// # Errors
///
/// [`DomError::UnknownNode`](uxbind_dom::DomError::UnknownNode).
pub fn remove_icon_classes(doc: &mut Document, element: NodeId) -> Result<(), WidgetError> {
    let icons: Vec<String> = doc
        .classes(element)
        .iter()
        .filter(|c| c.starts_with(ICON_CLASS))
        .cloned()
        .collect();
    for class in icons {
        doc.remove_class(element, &class)?;
    }
    Ok(())
}

fn show_icon(doc: &mut Document, element: NodeId, icon: &str) -> Result<(), WidgetError> {
    doc.add_class(element, ICON_CLASS)?;
    doc.add_class(element, &format!("{ICON_CLASS}--{icon}"))?;
    Ok(())
}

/// A hidden-by-default element projected into a slot of the widget's
/// custom element, showing either an icon or a text.
///
/// The icon wins over the text. With neither, the element is hidden and
/// leaves its slot.
#[derive(Debug)]
pub struct SlottedElement {
    tag: String,
    class: String,
    selector: Selector,
    slot: String,
    text: Option<(PropertyKey, PropertyValue)>,
    icon: Option<(PropertyKey, PropertyValue)>,
}

impl SlottedElement {
    /// Creates a `<tag class="class">` element.
    #[must_use]
    pub fn new(tag: impl Into<String>, class: impl Into<String>) -> Self {
        let class = class.into();
        Self {
            tag: tag.into(),
            selector: Selector::class(class.as_str()),
            class,
            slot: String::new(),
            text: None,
            icon: None,
        }
    }

    /// The slot the element occupies while shown.
    #[must_use]
    pub fn slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }

    /// Binds the text to `key`.
    #[must_use]
    pub fn text(mut self, key: impl Into<PropertyKey>, default: impl Into<PropertyValue>) -> Self {
        self.text = Some((key.into(), default.into()));
        self
    }

    /// Binds the icon name to `key`.
    #[must_use]
    pub fn icon(mut self, key: impl Into<PropertyKey>, default: impl Into<PropertyValue>) -> Self {
        self.icon = Some((key.into(), default.into()));
        self
    }

    fn read(cx: &WorkerCx<'_>, binding: Option<&(PropertyKey, PropertyValue)>) -> String {
        binding
            .and_then(|(key, _)| cx.data().get(key))
            .map(PropertyValue::to_text)
            .unwrap_or_default()
    }
}

impl Worker for SlottedElement {
    fn register(&self, reg: &mut Registrar<'_>) {
        for (key, default) in self.text.iter().chain(&self.icon) {
            reg.setter(key);
            reg.default_value(key, default.clone());
        }
    }

    fn selector(&self) -> Option<&Selector> {
        Some(&self.selector)
    }

    fn layout(&self, cx: &mut LayoutCx<'_>) -> Result<Vec<NodeId>, WidgetError> {
        let element = cx.doc().create_element(&self.tag)?;
        cx.doc().add_class(element, &self.class)?;
        cx.doc().set_hidden(element, true)?;
        Ok(vec![element])
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let element = cx.element()?;
        let icon = Self::read(cx, self.icon.as_ref());
        let text = Self::read(cx, self.text.as_ref());
        let doc = cx.doc();
        remove_icon_classes(doc, element)?;
        if !icon.is_empty() {
            doc.set_hidden(element, false)?;
            doc.set_attribute(element, "slot", self.slot.as_str())?;
            show_icon(doc, element, &icon)?;
            doc.set_text(element, "")?;
        } else if !text.is_empty() {
            doc.set_hidden(element, false)?;
            doc.set_attribute(element, "slot", self.slot.as_str())?;
            doc.set_text(element, text)?;
        } else {
            doc.set_hidden(element, true)?;
            doc.set_attribute(element, "slot", "")?;
            doc.set_text(element, "")?;
        }
        Ok(())
    }
}

/// Shows the error indicator: an alert icon whose tooltip carries the
/// message, plus `u-invalid` or `u-format-invalid` on the widget root.
///
/// A format error takes precedence over a validation error.
#[derive(Debug)]
pub struct SlottedError {
    tag: String,
    class: String,
    selector: Selector,
    slot: String,
}

impl SlottedError {
    /// Creates a `<tag class="class">` indicator element.
    #[must_use]
    pub fn new(tag: impl Into<String>, class: impl Into<String>) -> Self {
        let class = class.into();
        Self {
            tag: tag.into(),
            selector: Selector::class(class.as_str()),
            class,
            slot: String::new(),
        }
    }

    /// The slot the indicator occupies while shown.
    #[must_use]
    pub fn slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }
}

impl Worker for SlottedError {
    fn register(&self, reg: &mut Registrar<'_>) {
        reg.setter(PropertyKey::uniface(ERROR));
        reg.setter(PropertyKey::uniface(ERROR_MESSAGE));
        reg.setter(PropertyKey::uniface(FORMAT_ERROR));
        reg.setter(PropertyKey::uniface(FORMAT_ERROR_MESSAGE));
        reg.default_value(PropertyKey::uniface(ERROR), false);
        reg.default_value(PropertyKey::uniface(ERROR_MESSAGE), "");
        reg.default_value(PropertyKey::uniface(FORMAT_ERROR), false);
        reg.default_value(PropertyKey::uniface(FORMAT_ERROR_MESSAGE), "");
    }

    fn selector(&self) -> Option<&Selector> {
        Some(&self.selector)
    }

    fn layout(&self, cx: &mut LayoutCx<'_>) -> Result<Vec<NodeId>, WidgetError> {
        let element = cx.doc().create_element(&self.tag)?;
        cx.doc().add_class(element, &self.class)?;
        cx.doc().set_hidden(element, true)?;
        Ok(vec![element])
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let element = cx.element()?;
        let root = cx.root()?;
        let data = cx.data();
        let message = if data.flag(FORMAT_ERROR) {
            Some((data.text(FORMAT_ERROR_MESSAGE), "u-format-invalid", "u-invalid"))
        } else if data.flag(ERROR) {
            Some((data.text(ERROR_MESSAGE), "u-invalid", "u-format-invalid"))
        } else {
            None
        };
        let doc = cx.doc();
        match message {
            Some((message, shown, other)) => {
                doc.add_class(root, shown)?;
                doc.remove_class(root, other)?;
                doc.set_attribute(element, "title", message)?;
                doc.set_hidden(element, false)?;
                doc.set_attribute(element, "slot", self.slot.as_str())?;
                show_icon(doc, element, "AlertSolid")?;
            }
            None => {
                doc.remove_class(root, "u-invalid")?;
                doc.remove_class(root, "u-format-invalid")?;
                doc.set_attribute(element, "title", "")?;
                doc.set_hidden(element, true)?;
                doc.set_attribute(element, "slot", "")?;
                remove_icon_classes(doc, element)?;
            }
        }
        Ok(())
    }
}
