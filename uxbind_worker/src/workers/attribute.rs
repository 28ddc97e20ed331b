// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use uxbind_dom::{Document, NodeId};
use uxbind_property::{PropertyKey, PropertyValue, VALUE, to_boolean};

use crate::cx::{InstanceView, WorkerCx};
use crate::error::WidgetError;
use crate::worker::{Registrar, Updater, Worker};

/// Attributes that may invalidate a value the control already holds.
const VALUE_SENSITIVE: [&str; 7] = [
    "readonly",
    "type",
    "pattern",
    "min",
    "max",
    "minlength",
    "maxlength",
];

/// Where a worker writes its value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Target {
    /// A DOM property, which custom elements observe.
    Property,
    /// A markup attribute.
    Attribute,
}

impl Target {
    pub(crate) fn write(
        self,
        doc: &mut Document,
        element: NodeId,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), WidgetError> {
        match self {
            Self::Property => {
                doc.set_property(element, name, value)?;
            }
            Self::Attribute => doc.set_attribute(element, name, value.to_text())?,
        }
        Ok(())
    }

    pub(crate) fn clear(
        self,
        doc: &mut Document,
        element: NodeId,
        name: &str,
    ) -> Result<(), WidgetError> {
        doc.remove_attribute(element, name)?;
        if self == Self::Property {
            doc.set_property(element, name, PropertyValue::Null)?;
        }
        Ok(())
    }
}

/// Mirrors one property onto an HTML attribute or DOM property.
///
/// `innerText` is special: it replaces the element's text content.
#[derive(Debug)]
pub struct HtmlAttribute {
    key: Option<PropertyKey>,
    name: String,
    target: Target,
    default: Option<PropertyValue>,
    fixed: Option<String>,
    value_event: Option<String>,
}

impl HtmlAttribute {
    fn with_target(key: impl Into<PropertyKey>, name: impl Into<String>, target: Target) -> Self {
        Self {
            key: Some(key.into()),
            name: name.into(),
            target,
            default: None,
            fixed: None,
            value_event: None,
        }
    }

    /// Binds `key` to DOM property `name`.
    #[must_use]
    pub fn property(key: impl Into<PropertyKey>, name: impl Into<String>) -> Self {
        Self::with_target(key, name, Target::Property)
    }

    /// Binds `key` to attribute `name`.
    #[must_use]
    pub fn attribute(key: impl Into<PropertyKey>, name: impl Into<String>) -> Self {
        Self::with_target(key, name, Target::Attribute)
    }

    /// A constant attribute, written when the instance connects.
    #[must_use]
    pub fn fixed(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: None,
            name: name.into(),
            target: Target::Attribute,
            default: None,
            fixed: Some(value.into()),
            value_event: None,
        }
    }

    /// Registers a default.
    #[must_use]
    pub fn default(mut self, value: impl Into<PropertyValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// The control announces user edits with `event`.
    ///
    /// Only meaningful on the `value` worker.
    #[must_use]
    pub fn value_event(mut self, event: impl Into<String>) -> Self {
        self.value_event = Some(event.into());
        self
    }
}

/// Writes `value` to `name` on the worker's element.
///
/// Returns `Ok(false)` when the write was refused.
pub(crate) fn write_html(
    cx: &mut WorkerCx<'_>,
    name: &str,
    target: Target,
    value: &PropertyValue,
) -> Result<bool, WidgetError> {
    let element = cx.element()?;
    if VALUE_SENSITIVE.contains(&name.to_ascii_lowercase().as_str()) {
        let holds_value = cx
            .document()
            .property(element, VALUE)
            .is_some_and(|v| !v.is_empty());
        if holds_value {
            tracing::warn!(
                widget = %cx.widget_name(),
                attribute = name,
                "cannot change attribute while the control holds a value"
            );
            return Ok(false);
        }
    }
    if name == "innerText" {
        cx.doc().set_text(element, value.to_text())?;
    } else if value.is_null() {
        target.clear(cx.doc(), element, name)?;
    } else {
        target.write(cx.doc(), element, name, value.clone())?;
    }
    Ok(true)
}

impl Worker for HtmlAttribute {
    fn register(&self, reg: &mut Registrar<'_>) {
        let Some(key) = &self.key else {
            return;
        };
        reg.setter(key);
        if let Some(value) = &self.default {
            reg.default_value(key, value.clone());
        }
        if key.is_uniface(VALUE) {
            reg.getter(key);
        }
    }

    fn connect(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        if let Some(value) = &self.fixed {
            let element = cx.element()?;
            cx.doc().set_attribute(element, &self.name, value.as_str())?;
        }
        Ok(())
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let Some(key) = &self.key else {
            return Ok(());
        };
        let value = cx.data().get(key).cloned().unwrap_or_default();
        write_html(cx, &self.name, self.target, &value)?;
        Ok(())
    }

    fn value(&self, view: InstanceView<'_>) -> PropertyValue {
        let Some(element) = view.element() else {
            return PropertyValue::Null;
        };
        let doc = view.document();
        if self.name == "innerText" {
            return doc.text(element).into();
        }
        match self.target {
            Target::Property => doc.property(element, &self.name).cloned().unwrap_or_default(),
            Target::Attribute => doc
                .attribute(element, &self.name)
                .map(PropertyValue::from)
                .unwrap_or_default(),
        }
    }

    fn value_updaters(&self, view: InstanceView<'_>) -> Vec<Updater> {
        match (&self.value_event, view.element()) {
            (Some(event), Some(element)) => vec![Updater {
                element,
                event_name: event.clone(),
                handler: None,
            }],
            _ => Vec::new(),
        }
    }
}

/// Mirrors a boolean property.
///
/// Values are coerced permissively; as an attribute, `false` removes it.
#[derive(Debug)]
pub struct HtmlAttributeBoolean {
    key: PropertyKey,
    name: String,
    target: Target,
    default: Option<bool>,
}

impl HtmlAttributeBoolean {
    /// Binds `key` to boolean DOM property `name`.
    #[must_use]
    pub fn property(key: impl Into<PropertyKey>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            target: Target::Property,
            default: None,
        }
    }

    /// Binds `key` to boolean attribute `name`.
    #[must_use]
    pub fn attribute(key: impl Into<PropertyKey>, name: impl Into<String>) -> Self {
        Self {
            target: Target::Attribute,
            ..Self::property(key, name)
        }
    }

    /// Registers a default.
    #[must_use]
    pub fn default(mut self, value: bool) -> Self {
        self.default = Some(value);
        self
    }
}

impl Worker for HtmlAttributeBoolean {
    fn register(&self, reg: &mut Registrar<'_>) {
        reg.setter(&self.key);
        if let Some(value) = self.default {
            reg.default_value(&self.key, value);
        }
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let element = cx.element()?;
        let on = cx.data().get(&self.key).is_some_and(to_boolean);
        match self.target {
            Target::Property => {
                cx.doc().set_property(element, &self.name, on)?;
            }
            Target::Attribute if on => cx.doc().set_attribute(element, &self.name, "true")?,
            Target::Attribute => {
                cx.doc().remove_attribute(element, &self.name)?;
            }
        }
        Ok(())
    }
}

/// Mirrors an integer property, optionally bounded.
///
/// Unparsable and out-of-range values are logged and ignored, leaving the
/// previous value in place. Empty values remove the attribute.
#[derive(Debug)]
pub struct HtmlAttributeNumber {
    key: PropertyKey,
    name: String,
    target: Target,
    default: Option<PropertyValue>,
    min: Option<i64>,
    max: Option<i64>,
}

impl HtmlAttributeNumber {
    /// Binds `key` to numeric DOM property `name`.
    #[must_use]
    pub fn property(key: impl Into<PropertyKey>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            target: Target::Property,
            default: None,
            min: None,
            max: None,
        }
    }

    /// Binds `key` to numeric attribute `name`.
    #[must_use]
    pub fn attribute(key: impl Into<PropertyKey>, name: impl Into<String>) -> Self {
        Self {
            target: Target::Attribute,
            ..Self::property(key, name)
        }
    }

    /// Registers a default.
    #[must_use]
    pub fn default(mut self, value: impl Into<PropertyValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Accepts only values in `min..=max`.
    #[must_use]
    pub fn range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    fn in_range(&self, n: i64) -> bool {
        self.min.is_none_or(|min| n >= min) && self.max.is_none_or(|max| n <= max)
    }
}

impl Worker for HtmlAttributeNumber {
    fn register(&self, reg: &mut Registrar<'_>) {
        reg.setter(&self.key);
        if let Some(value) = &self.default {
            reg.default_value(&self.key, value.clone());
        }
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let element = cx.element()?;
        let value = cx.data().get(&self.key).cloned().unwrap_or_default();
        if value.is_empty() {
            return self.target.clear(cx.doc(), element, &self.name);
        }
        let Some(n) = value.parse_integer() else {
            tracing::warn!(widget = %cx.widget_name(), property = %self.key, %value, "not a number");
            return Ok(());
        };
        if !self.in_range(n) {
            tracing::warn!(
                widget = %cx.widget_name(),
                property = %self.key,
                value = n,
                min = ?self.min,
                max = ?self.max,
                "number out of range"
            );
            return Ok(());
        }
        #[allow(
            clippy::cast_precision_loss,
            reason = "attribute numbers are small integers"
        )]
        let number = PropertyValue::Number(n as f64);
        self.target.write(cx.doc(), element, &self.name, number)
    }
}

/// Mirrors a property restricted to a fixed set of values.
///
/// Anything outside the set is logged and replaced by the declared default,
/// or removes the attribute when there is none.
#[derive(Debug)]
pub struct HtmlAttributeChoice {
    key: PropertyKey,
    name: String,
    choices: Vec<String>,
    default: Option<String>,
}

impl HtmlAttributeChoice {
    /// Binds `key` to attribute `name`, accepting only `choices`.
    #[must_use]
    pub fn new<S: Into<String>>(
        key: impl Into<PropertyKey>,
        name: impl Into<String>,
        choices: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            choices: choices.into_iter().map(Into::into).collect(),
            default: None,
        }
    }

    /// Registers a default, also used for invalid values.
    #[must_use]
    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }
}

impl Worker for HtmlAttributeChoice {
    fn register(&self, reg: &mut Registrar<'_>) {
        reg.setter(&self.key);
        if let Some(value) = &self.default {
            reg.default_value(&self.key, value.as_str());
        }
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let element = cx.element()?;
        let value = cx
            .data()
            .get(&self.key)
            .filter(|v| !v.is_empty())
            .map(PropertyValue::to_text);
        let choice = match value {
            Some(value) if self.choices.contains(&value) => Some(value),
            Some(value) => {
                tracing::warn!(
                    widget = %cx.widget_name(),
                    property = %self.key,
                    %value,
                    choices = ?self.choices,
                    "invalid choice, using the default"
                );
                self.default.clone()
            }
            None => self.default.clone(),
        };
        match choice {
            Some(choice) => cx.doc().set_attribute(element, &self.name, choice)?,
            None => {
                cx.doc().remove_attribute(element, &self.name)?;
            }
        }
        Ok(())
    }
}
