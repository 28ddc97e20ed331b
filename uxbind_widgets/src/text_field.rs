// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `UX.TextField`: a single-line `<fluent-text-field>`.
//!
//! Besides the input itself, the field can show a label, a prefix and a
//! suffix, each as text or icon, and a `changebutton` sub-widget at its end
//! which commits the value like pressing Enter.

use uxbind_dom::{DomEvent, Selector};
use uxbind_property::{PropertyData, PropertyValue, VALUE};
use uxbind_worker::workers::{
    Element, HtmlAttribute, HtmlAttributeBoolean, HtmlAttributeChoice, HtmlAttributeMinMaxLength,
    HtmlAttributeNumber, SlottedElement, SlottedError, SlottedSubWidget, StyleClass, Trigger,
    UiBlock, UiBlocking,
};
use uxbind_worker::{
    FormattedValue, InstanceView, Registrar, Updater, WidgetDescriptor, WidgetDescriptorBuilder,
    WidgetError, Worker, WorkerCx, sub_widget_style_class,
};

use crate::button;
use crate::shadow::ErrorSlot;

/// Registered class name.
pub const NAME: &str = "UX.TextField";

/// Tag of the rendered control.
pub const TAG: &str = "fluent-text-field";

/// Sub-widget id of the commit button.
pub const CHANGE_BUTTON: &str = "changebutton";

/// `maxlength` written while the host sets none.
const MAX_LENGTH: i64 = 10000;

/// The commit button, as declared by the text and number fields.
pub(crate) fn change_button() -> SlottedSubWidget {
    SlottedSubWidget::new("span", CHANGE_BUTTON, button::NAME)
        .slot("end")
        .defaults([
            ("icon-position", "end"),
            ("html:tabindex", "-1"),
            ("html:appearance", "stealth"),
        ])
        .visible(false)
        .triggers(["detail"])
        .delegated(["html:disabled"])
}

/// Updater turning a click on the commit button into a `change` on the
/// field; empty when the button is missing.
fn change_button_updater(view: InstanceView<'_>) -> Option<Updater> {
    let root = view.root()?;
    let selector = Selector::class(sub_widget_style_class(CHANGE_BUTTON));
    let button = view.document().query_selector(root, &selector)?;
    Some(Updater {
        element: button,
        event_name: "click".into(),
        handler: Some(view.worker_id()),
    })
}

/// Raises `change` on the field for a click on its commit button.
fn commit_on_click(cx: &mut WorkerCx<'_>, event: &DomEvent) -> Result<bool, WidgetError> {
    if event.name != "click" {
        return Ok(false);
    }
    let root = cx.root()?;
    tracing::debug!(widget = %cx.widget_name(), "commit button clicked");
    cx.doc().dispatch_event(DomEvent::new(root, "change"));
    Ok(true)
}

/// Owns `value`, kept in the control's `value` property.
///
/// With length checks on, validation compares the text against
/// `html:minlength`, which the control itself only checks for user input.
#[derive(Debug)]
pub(crate) struct TextValue {
    check_length: bool,
}

impl TextValue {
    pub(crate) fn new(check_length: bool) -> Self {
        Self { check_length }
    }
}

impl Worker for TextValue {
    fn register(&self, reg: &mut Registrar<'_>) {
        reg.setter(VALUE);
        reg.getter(VALUE);
        reg.default_value(VALUE, "");
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let element = cx.element()?;
        let value = cx.data().text(VALUE);
        cx.doc().set_property(element, VALUE, value)?;
        Ok(())
    }

    fn value(&self, view: InstanceView<'_>) -> PropertyValue {
        view.element()
            .and_then(|element| view.document().property(element, VALUE))
            .map_or_else(|| PropertyValue::from(""), |value| value.to_text().into())
    }

    fn value_updaters(&self, view: InstanceView<'_>) -> Vec<Updater> {
        let Some(element) = view.element() else {
            return Vec::new();
        };
        let mut updaters = vec![Updater {
            element,
            event_name: "change".into(),
            handler: None,
        }];
        updaters.extend(change_button_updater(view));
        updaters
    }

    fn handle_event(&self, cx: &mut WorkerCx<'_>, event: &DomEvent) -> Result<bool, WidgetError> {
        commit_on_click(cx, event)
    }

    fn validate(&self, view: InstanceView<'_>) -> Option<String> {
        if !self.check_length {
            return None;
        }
        let min = view.data().number("html:minlength").filter(|&min| min > 0)?;
        let text = self.value(view).to_text();
        let length = i64::try_from(text.chars().count()).unwrap_or(i64::MAX);
        (length < min).then(|| {
            format!(
                "Please lengthen this text to {min} characters or more \
                 (you are currently using {length} characters)."
            )
        })
    }
}

/// Properties [`format_affixed`] reads.
pub(crate) const AFFIXED_PROPERTIES: [&str; 7] = [
    VALUE,
    "error",
    "error-message",
    "prefix-icon",
    "prefix-text",
    "suffix-icon",
    "suffix-text",
];

/// The value with its prefix and suffix; an icon replaces the text.
pub(crate) fn format_affixed(properties: &PropertyData) -> FormattedValue {
    let icon_or_text = |icon_key: &str, text_key: &str| {
        let icon = properties.text(icon_key);
        if icon.is_empty() {
            (icon, properties.text(text_key))
        } else {
            (icon, String::new())
        }
    };
    let (prefix_icon, prefix_text) = icon_or_text("prefix-icon", "prefix-text");
    let (suffix_icon, suffix_text) = icon_or_text("suffix-icon", "suffix-text");
    FormattedValue {
        prefix_icon,
        prefix_text,
        suffix_icon,
        suffix_text,
        ..FormattedValue::plain(properties)
    }
}

/// Builds the `UX.TextField` class.
///
/// # Errors
///
/// Registration conflicts in the structure.
pub fn descriptor() -> Result<WidgetDescriptor, WidgetError> {
    WidgetDescriptorBuilder::new(NAME)
        .structure(
            Element::new(TAG)
                .child(StyleClass::new(["u-text-field", "outline"]))
                .child(TextValue::new(true))
                .child(HtmlAttribute::property("html:title", "title"))
                .child(HtmlAttribute::attribute("html:size", "size").default("20"))
                .child(HtmlAttribute::property("html:pattern", "pattern"))
                .child(HtmlAttribute::property("html:placeholder", "placeholder"))
                .child(
                    HtmlAttributeNumber::property("html:tabindex", "tabIndex")
                        .default(0)
                        .range(Some(-1), None),
                )
                .child(
                    HtmlAttributeChoice::new("html:appearance", "appearance", ["outline", "filled"])
                        .default("outline"),
                )
                .child(
                    HtmlAttributeChoice::new(
                        "html:type",
                        "type",
                        ["text", "email", "password", "tel", "url", "date"],
                    )
                    .default("text"),
                )
                .child(
                    HtmlAttributeChoice::new(
                        "label-position",
                        "u-label-position",
                        ["above", "below", "before", "after"],
                    )
                    .default("above"),
                )
                .child(HtmlAttributeBoolean::attribute("html:hidden", "hidden").default(false))
                .child(HtmlAttributeBoolean::property("html:disabled", "disabled").default(false))
                .child(HtmlAttributeBoolean::property("html:spellcheck", "spellcheck").default(false))
                .child(HtmlAttributeMinMaxLength::new(
                    "html:minlength",
                    "html:maxlength",
                    MAX_LENGTH,
                ))
                .child(SlottedElement::new("span", "u-label-text").text("label-text", ""))
                .child(
                    SlottedElement::new("span", "u-prefix")
                        .slot("start")
                        .text("prefix-text", "")
                        .icon("prefix-icon", ""),
                )
                .child(SlottedError::new("span", "u-error-icon").slot("error"))
                .child(
                    SlottedElement::new("span", "u-suffix")
                        .slot("end")
                        .text("suffix-text", "")
                        .icon("suffix-icon", ""),
                )
                .child(change_button())
                .child(UiBlock::new(UiBlocking::Readonly))
                .child(ErrorSlot)
                .child(Trigger::new("onchange", "change").validate(true))
                .into_worker(),
        )
        .value_formatter(format_affixed, AFFIXED_PROPERTIES)
        .build()
}
