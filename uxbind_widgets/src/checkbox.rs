// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `UX.Checkbox`: a two- or three-state `<fluent-checkbox>`.
//!
//! The value is `true`, `false`, or `""` for the indeterminate state. With
//! `tri-state` off, user clicks only alternate between checked and
//! unchecked; the host can still set the indeterminate state.

use uxbind_dom::DomEvent;
use uxbind_property::{PropertyData, PropertyValue, VALUE, field_value_to_tristate};
use uxbind_worker::workers::{
    Element, HtmlAttribute, HtmlAttributeBoolean, HtmlAttributeChoice, HtmlAttributeNumber,
    IgnoreProperty, SlottedElement, SlottedError, StyleClass, Trigger, UiBlock, UiBlocking,
};
use uxbind_worker::{
    FormattedValue, InstanceView, Registrar, Updater, WidgetDescriptor, WidgetDescriptorBuilder,
    WidgetError, Worker, WorkerCx, error_message,
};

use crate::control::{clear_errors, set_format_error, write_control};

/// Registered class name.
pub const NAME: &str = "UX.Checkbox";

/// Tag of the rendered control.
pub const TAG: &str = "fluent-checkbox";

const TRI_STATE: &str = "tri-state";

/// The state last written to the control.
const CURRENT_VALUE: &str = "current_value";

/// Owns `value` and maps it onto `checked` and `indeterminate`.
#[derive(Debug)]
struct TriStateValue;

impl TriStateValue {
    fn current(cx: &WorkerCx<'_>) -> Option<Option<bool>> {
        cx.view().locals().get::<Option<bool>>(CURRENT_VALUE).copied()
    }

    /// Shows `state` and announces it with a cancelable `valuechange`.
    fn change_value(cx: &mut WorkerCx<'_>, state: Option<bool>) -> Result<(), WidgetError> {
        let element = cx.element()?;
        write_control(
            cx,
            element,
            &[
                ("indeterminate", state.is_none().into()),
                ("checked", state.unwrap_or(false).into()),
            ],
        )?;
        cx.locals().set(CURRENT_VALUE, state);
        let detail = state.map_or(PropertyValue::Null, PropertyValue::from);
        cx.doc()
            .dispatch_event(DomEvent::new(element, "valuechange").with_detail(detail).cancelable());
        Ok(())
    }
}

impl Worker for TriStateValue {
    fn register(&self, reg: &mut Registrar<'_>) {
        reg.setter(VALUE);
        reg.getter(VALUE);
        reg.default_value(VALUE, PropertyValue::Null);
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let value = cx.data().value(VALUE).cloned().unwrap_or_default();
        match field_value_to_tristate(&value) {
            Ok(state) => {
                set_format_error(cx, None)?;
                if Self::current(cx) != Some(state) {
                    Self::change_value(cx, state)?;
                }
                Ok(())
            }
            // The control keeps showing the last valid state.
            Err(error) => set_format_error(cx, Some(&error)),
        }
    }

    fn value(&self, view: InstanceView<'_>) -> PropertyValue {
        let Some(element) = view.element() else {
            return PropertyValue::Null;
        };
        let doc = view.document();
        if doc.property_flag(element, "indeterminate") {
            PropertyValue::from("")
        } else {
            doc.property_flag(element, "checked").into()
        }
    }

    fn value_updaters(&self, view: InstanceView<'_>) -> Vec<Updater> {
        let Some(element) = view.element() else {
            return Vec::new();
        };
        vec![
            Updater {
                element,
                event_name: "change".into(),
                handler: Some(view.worker_id()),
            },
            Updater {
                element,
                event_name: "valuechange".into(),
                handler: None,
            },
        ]
    }

    fn handle_event(&self, cx: &mut WorkerCx<'_>, event: &DomEvent) -> Result<bool, WidgetError> {
        if event.name != "change" {
            return Ok(false);
        }
        clear_errors(cx)?;
        let tri_state = cx.data().flag(TRI_STATE);
        let next = match Self::current(cx).flatten() {
            None => Some(true),
            Some(true) => Some(false),
            Some(false) if tri_state => None,
            Some(false) => Some(true),
        };
        tracing::debug!(widget = %cx.widget_name(), state = ?next, "user toggled");
        Self::change_value(cx, next)?;
        Ok(true)
    }
}

fn format(properties: &PropertyData) -> FormattedValue {
    let value = properties.value(VALUE).cloned().unwrap_or_default();
    let (text, error) = match field_value_to_tristate(&value) {
        Ok(None) => ("Unset", error_message(properties)),
        Ok(Some(true)) => ("Checked", error_message(properties)),
        Ok(Some(false)) => ("Unchecked", error_message(properties)),
        Err(error) => ("ERROR", error.message().to_owned()),
    };
    FormattedValue {
        primary_plain_text: text.into(),
        error_message: error,
        ..FormattedValue::default()
    }
}

/// Builds the `UX.Checkbox` class.
///
/// # Errors
///
/// Registration conflicts in the structure.
pub fn descriptor() -> Result<WidgetDescriptor, WidgetError> {
    WidgetDescriptorBuilder::new(NAME)
        .structure(
            Element::new(TAG)
                .child(StyleClass::new(["u-checkbox"]))
                .child(HtmlAttribute::fixed("role", "checkbox"))
                .child(HtmlAttribute::property("html:title", "title"))
                .child(IgnoreProperty::new(TRI_STATE).default(false))
                .child(IgnoreProperty::new("html:minlength"))
                .child(IgnoreProperty::new("html:maxlength"))
                .child(TriStateValue)
                .child(HtmlAttributeBoolean::property("html:disabled", "disabled").default(false))
                .child(HtmlAttributeBoolean::attribute("html:hidden", "hidden").default(false))
                .child(
                    HtmlAttributeNumber::property("html:tabindex", "tabIndex")
                        .default(0)
                        .range(Some(-1), None),
                )
                .child(
                    HtmlAttributeChoice::new("label-position", "u-label-position", ["before", "after"])
                        .default("after"),
                )
                .child(SlottedElement::new("span", "u-label-text").text("label-text", ""))
                .child(UiBlock::new(UiBlocking::Readonly))
                .child(SlottedError::new("span", "u-error-icon"))
                .child(Trigger::new("onchange", "valuechange").validate(true))
                .into_worker(),
        )
        .value_formatter(format, [VALUE, "error", "error-message"])
        .build()
}
