// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `UX.Switch`: an on/off `<fluent-switch>`.

use uxbind_dom::DomEvent;
use uxbind_property::{PropertyData, PropertyValue, VALUE, field_value_to_boolean};
use uxbind_worker::workers::{
    Element, HtmlAttribute, HtmlAttributeBoolean, HtmlAttributeChoice, HtmlAttributeNumber,
    IgnoreProperty, SlottedElement, SlottedError, StyleClass, Trigger, UiBlock, UiBlocking,
};
use uxbind_worker::{
    FormattedValue, InstanceView, Registrar, Updater, WidgetDescriptor, WidgetDescriptorBuilder,
    WidgetError, Worker, WorkerCx, error_message,
};

use crate::control::{clear_errors, set_format_error, write_control};
use crate::shadow::{ErrorSlot, SlotPart};

/// Registered class name.
pub const NAME: &str = "UX.Switch";

/// Tag of the rendered control.
pub const TAG: &str = "fluent-switch";

const CHECKED_MESSAGE: &str = "checked-message";
const UNCHECKED_MESSAGE: &str = "unchecked-message";

/// Owns `value` and maps it onto `checked`.
///
/// A switch has no indeterminate state, so `null` and `""` are format
/// errors like any other value that is not a boolean.
#[derive(Debug)]
struct BooleanValue;

impl Worker for BooleanValue {
    fn register(&self, reg: &mut Registrar<'_>) {
        reg.setter(VALUE);
        reg.getter(VALUE);
        reg.default_value(VALUE, false);
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let value = cx.data().value(VALUE).cloned().unwrap_or_default();
        match field_value_to_boolean(&value) {
            Ok(checked) => {
                let element = cx.element()?;
                write_control(cx, element, &[("checked", checked.into())])?;
                set_format_error(cx, None)
            }
            Err(error) => set_format_error(cx, Some(&error)),
        }
    }

    fn value(&self, view: InstanceView<'_>) -> PropertyValue {
        view.element()
            .map(|element| view.document().property_flag(element, "checked").into())
            .unwrap_or_default()
    }

    fn value_updaters(&self, view: InstanceView<'_>) -> Vec<Updater> {
        view.element()
            .map(|element| Updater {
                element,
                event_name: "change".into(),
                handler: Some(view.worker_id()),
            })
            .into_iter()
            .collect()
    }

    fn handle_event(&self, cx: &mut WorkerCx<'_>, event: &DomEvent) -> Result<bool, WidgetError> {
        if event.name != "change" {
            return Ok(false);
        }
        clear_errors(cx)?;
        Ok(true)
    }
}

fn format(properties: &PropertyData) -> FormattedValue {
    let value = properties.value(VALUE).cloned().unwrap_or_default();
    let message = |key: &str, fallback: &str| {
        let text = properties.text(key);
        if text.is_empty() { fallback.to_owned() } else { text }
    };
    let (text, error) = match field_value_to_boolean(&value) {
        Ok(true) => (message(CHECKED_MESSAGE, "On"), error_message(properties)),
        Ok(false) => (message(UNCHECKED_MESSAGE, "Off"), error_message(properties)),
        Err(error) => ("ERROR".to_owned(), error.message().to_owned()),
    };
    FormattedValue {
        primary_plain_text: text,
        error_message: error,
        ..FormattedValue::default()
    }
}

/// Builds the `UX.Switch` class.
///
/// # Errors
///
/// Registration conflicts in the structure.
pub fn descriptor() -> Result<WidgetDescriptor, WidgetError> {
    WidgetDescriptorBuilder::new(NAME)
        .structure(
            Element::new(TAG)
                .child(StyleClass::new(["u-switch"]))
                .child(HtmlAttribute::fixed("role", "switch"))
                .child(HtmlAttribute::property("html:title", "title"))
                .child(IgnoreProperty::new("html:minlength"))
                .child(IgnoreProperty::new("html:maxlength"))
                .child(BooleanValue)
                .child(HtmlAttributeBoolean::property("html:readonly", "readOnly").default(false))
                .child(HtmlAttributeBoolean::attribute("html:hidden", "hidden").default(false))
                .child(
                    HtmlAttributeNumber::property("html:tabindex", "tabIndex")
                        .default(0)
                        .range(Some(-1), None),
                )
                .child(
                    HtmlAttributeChoice::new("label-position", "u-label-position", ["before", "after"])
                        .default("before"),
                )
                .child(SlottedElement::new("span", "u-label-text").text("label-text", ""))
                .child(
                    SlottedElement::new("span", "u-checked-message")
                        .slot(CHECKED_MESSAGE)
                        .text(CHECKED_MESSAGE, ""),
                )
                .child(
                    SlottedElement::new("span", "u-unchecked-message")
                        .slot(UNCHECKED_MESSAGE)
                        .text(UNCHECKED_MESSAGE, ""),
                )
                .child(SlottedError::new("span", "u-error-icon").slot("error"))
                .child(UiBlock::new(UiBlocking::Disabled))
                .child(ErrorSlot)
                .child(SlotPart::new("switch", "switch-toggle"))
                .child(Trigger::new("onchange", "change").validate(true))
                .into_worker(),
        )
        .value_formatter(
            format,
            [VALUE, CHECKED_MESSAGE, UNCHECKED_MESSAGE, "error", "error-message"],
        )
        .build()
}
