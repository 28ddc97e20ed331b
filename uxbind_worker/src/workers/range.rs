// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use uxbind_property::{PropertyKey, PropertyValue, VALUE};

use crate::cx::WorkerCx;
use crate::error::WidgetError;
use crate::workers::attribute::Target;
use crate::worker::{Registrar, Worker};

const MAXLENGTH_HAS_BEEN_SET: &str = "maxlength-has-been-set";

/// Refuses bound changes while the control holds a value, since they could
/// invalidate it.
fn holds_value(cx: &WorkerCx<'_>, min: &PropertyKey, max: &PropertyKey) -> Result<bool, WidgetError> {
    let element = cx.element()?;
    let holds = cx
        .document()
        .property(element, VALUE)
        .is_some_and(|v| !v.is_empty());
    if holds {
        tracing::warn!(
            widget = %cx.widget_name(),
            min = %min,
            max = %max,
            "cannot change bounds while the control holds a value"
        );
    }
    Ok(holds)
}

#[allow(
    clippy::cast_precision_loss,
    reason = "length and range bounds are small integers"
)]
fn number(n: i64) -> PropertyValue {
    PropertyValue::Number(n as f64)
}

/// Drives the `minlength` and `maxlength` properties together, so that the
/// control never sees a crossed pair.
///
/// A `maxlength` of 0 means no maximum. Once a maximum has been applied,
/// removing it writes the fallback maximum instead, because some controls
/// turn a removed `maxlength` into 0.
#[derive(Debug)]
pub struct HtmlAttributeMinMaxLength {
    min: PropertyKey,
    max: PropertyKey,
    fallback_max: i64,
}

impl HtmlAttributeMinMaxLength {
    /// Binds `min` and `max`; `fallback_max` replaces a removed maximum.
    #[must_use]
    pub fn new(min: impl Into<PropertyKey>, max: impl Into<PropertyKey>, fallback_max: i64) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
            fallback_max,
        }
    }

    fn parse(&self, cx: &WorkerCx<'_>, key: &PropertyKey) -> Result<Option<i64>, ()> {
        let Some(n) = cx.data().get(key).and_then(PropertyValue::parse_integer) else {
            return Ok(None);
        };
        if n < 0 {
            tracing::warn!(widget = %cx.widget_name(), property = %key, value = n, "negative length");
            return Err(());
        }
        Ok(Some(n))
    }
}

impl Worker for HtmlAttributeMinMaxLength {
    fn register(&self, reg: &mut Registrar<'_>) {
        reg.setter(&self.min);
        reg.setter(&self.max);
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        if holds_value(cx, &self.min, &self.max)? {
            return Ok(());
        }
        let element = cx.element()?;
        let (Ok(minlength), Ok(maxlength)) = (self.parse(cx, &self.min), self.parse(cx, &self.max))
        else {
            return Ok(());
        };
        let mut maxlength = maxlength.filter(|&n| n != 0);
        if maxlength.is_some() {
            cx.locals().set(MAXLENGTH_HAS_BEEN_SET, true);
        } else if cx.locals().get_or(MAXLENGTH_HAS_BEEN_SET, false) {
            maxlength = Some(self.fallback_max);
        }

        let target = Target::Property;
        match (minlength, maxlength) {
            (None, None) => {
                target.clear(cx.doc(), element, "minlength")?;
                target.clear(cx.doc(), element, "maxlength")?;
            }
            (None, Some(max)) => {
                target.clear(cx.doc(), element, "minlength")?;
                target.write(cx.doc(), element, "maxlength", number(max))?;
            }
            (Some(min), None) => {
                target.clear(cx.doc(), element, "maxlength")?;
                target.write(cx.doc(), element, "minlength", number(min))?;
            }
            (Some(min), Some(max)) if min > max => {
                tracing::warn!(
                    widget = %cx.widget_name(),
                    minlength = min,
                    maxlength = max,
                    "minlength exceeds maxlength"
                );
            }
            (Some(min), Some(max)) => {
                // Widen first so neither intermediate pair is crossed.
                target.write(cx.doc(), element, "maxlength", number(self.fallback_max))?;
                target.write(cx.doc(), element, "minlength", number(0))?;
                target.write(cx.doc(), element, "minlength", number(min))?;
                target.write(cx.doc(), element, "maxlength", number(max))?;
            }
        }
        Ok(())
    }
}

/// Drives the `min` and `max` attributes together.
///
/// Neither bound can be removed once set; clearing one is logged and leaves
/// the attribute alone.
#[derive(Debug)]
pub struct HtmlAttributeMinMax {
    min: PropertyKey,
    max: PropertyKey,
    default_min: Option<PropertyValue>,
    default_max: Option<PropertyValue>,
}

impl HtmlAttributeMinMax {
    /// Binds `min` and `max`.
    #[must_use]
    pub fn new(min: impl Into<PropertyKey>, max: impl Into<PropertyKey>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
            default_min: None,
            default_max: None,
        }
    }

    /// Registers defaults for both bounds.
    #[must_use]
    pub fn defaults(
        mut self,
        min: impl Into<PropertyValue>,
        max: impl Into<PropertyValue>,
    ) -> Self {
        self.default_min = Some(min.into());
        self.default_max = Some(max.into());
        self
    }
}

impl Worker for HtmlAttributeMinMax {
    fn register(&self, reg: &mut Registrar<'_>) {
        reg.setter(&self.min);
        reg.setter(&self.max);
        if let Some(value) = &self.default_min {
            reg.default_value(&self.min, value.clone());
        }
        if let Some(value) = &self.default_max {
            reg.default_value(&self.max, value.clone());
        }
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        if holds_value(cx, &self.min, &self.max)? {
            return Ok(());
        }
        let element = cx.element()?;
        let min_given = cx.data().contains(&self.min);
        let max_given = cx.data().contains(&self.max);
        let min = cx.data().get(&self.min).and_then(PropertyValue::parse_integer);
        let max = cx.data().get(&self.max).and_then(PropertyValue::parse_integer);

        match (min, max) {
            (None, None) => {
                if min_given && max_given {
                    tracing::warn!(widget = %cx.widget_name(), "bounds cannot be removed");
                }
            }
            (None, Some(max)) => {
                cx.doc().set_attribute(element, "max", max.to_string())?;
                if min_given {
                    tracing::warn!(widget = %cx.widget_name(), property = %self.min, "bound cannot be removed");
                }
            }
            (Some(min), None) => {
                cx.doc().set_attribute(element, "min", min.to_string())?;
                if max_given {
                    tracing::warn!(widget = %cx.widget_name(), property = %self.max, "bound cannot be removed");
                }
            }
            (Some(min), Some(max)) if min > max => {
                tracing::warn!(widget = %cx.widget_name(), min, max, "min exceeds max");
            }
            (Some(min), Some(max)) => {
                cx.doc().set_attribute(element, "min", min.to_string())?;
                cx.doc().set_attribute(element, "max", max.to_string())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use uxbind_dom::Document;
    use uxbind_property::PropertyUpdate;

    use crate::registry::ClassRegistry;
    use crate::layout::ObjectDefinition;
    use crate::widget::Widget;
    use crate::workers::Element;
    use crate::descriptor::WidgetDescriptorBuilder;

    use super::*;

    fn connected(doc: &mut Document) -> (Widget, uxbind_dom::NodeId) {
        let descriptor = WidgetDescriptorBuilder::new("Range")
            .structure(
                Element::new("input")
                    .child(HtmlAttributeMinMaxLength::new("html:minlength", "html:maxlength", 10_000))
                    .into_worker(),
            )
            .build()
            .unwrap();
        let mut registry = ClassRegistry::new();
        let descriptor = registry.register(descriptor).unwrap();
        let skeleton = doc.create_element("input").unwrap();
        let mut object = ObjectDefinition::new("F", "Range");
        let root = Widget::process_layout(&descriptor, &registry, doc, skeleton, &mut object).unwrap();
        let mut widget = registry.instantiate("Range").unwrap();
        widget.on_connect(doc, root, &registry).unwrap();
        widget.data_init(doc).unwrap();
        (widget, root)
    }

    #[test]
    fn crossed_lengths_keep_the_previous_pair() {
        let mut doc = Document::new();
        let (mut widget, root) = connected(&mut doc);
        widget
            .data_update(
                &mut doc,
                PropertyUpdate::new().with("html:minlength", 2).with("html:maxlength", 5),
            )
            .unwrap();
        assert_eq!(doc.property(root, "minlength"), Some(&PropertyValue::Number(2.0)));
        assert_eq!(doc.property(root, "maxlength"), Some(&PropertyValue::Number(5.0)));

        widget
            .data_update(&mut doc, PropertyUpdate::new().with("html:minlength", 9))
            .unwrap();
        assert_eq!(doc.property(root, "minlength"), Some(&PropertyValue::Number(2.0)));
    }

    #[test]
    fn removed_maximum_falls_back_once_set() {
        let mut doc = Document::new();
        let (mut widget, root) = connected(&mut doc);
        widget
            .data_update(&mut doc, PropertyUpdate::new().with("html:maxlength", 0))
            .unwrap();
        assert_eq!(doc.property(root, "maxlength"), Some(&PropertyValue::Null));

        widget
            .data_update(&mut doc, PropertyUpdate::new().with("html:maxlength", 4))
            .unwrap();
        widget
            .data_update(&mut doc, PropertyUpdate::new().with("html:maxlength", 0))
            .unwrap();
        assert_eq!(
            doc.property(root, "maxlength"),
            Some(&PropertyValue::Number(10_000.0))
        );
    }

    #[test]
    fn lengths_are_frozen_while_holding_a_value() {
        let mut doc = Document::new();
        let (mut widget, root) = connected(&mut doc);
        doc.set_property(root, "value", "abc").unwrap();
        widget
            .data_update(&mut doc, PropertyUpdate::new().with("html:maxlength", 4))
            .unwrap();
        assert_eq!(doc.property(root, "maxlength"), None);
    }
}
