// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `UX.Button`: a `<fluent-button>` with a text and an optional icon.

use uxbind_dom::{NodeId, Selector};
use uxbind_property::{PropertyData, PropertyValue, VALUE};
use uxbind_worker::workers::{
    Element, HtmlAttribute, HtmlAttributeBoolean, HtmlAttributeChoice, HtmlAttributeNumber,
    IgnoreProperty, StyleClass, Trigger, UiBlock, UiBlocking, remove_icon_classes,
};
use uxbind_worker::{
    FormattedValue, InstanceView, LayoutCx, Registrar, WidgetDescriptor, WidgetDescriptorBuilder,
    WidgetError, Worker, WorkerCx, error_message,
};

/// Registered class name.
pub const NAME: &str = "UX.Button";

/// Tag of the rendered control.
pub const TAG: &str = "fluent-button";

const ICON: &str = "icon";
const ICON_POSITION: &str = "icon-position";

/// Creates a hidden `<span class="class">`.
fn hidden_span(cx: &mut LayoutCx<'_>, class: &str) -> Result<Vec<NodeId>, WidgetError> {
    let doc = cx.doc();
    let span = doc.create_element("span")?;
    doc.add_class(span, class)?;
    doc.set_hidden(span, true)?;
    Ok(vec![span])
}

/// The icon, placed at the start or the end of the text.
///
/// Without a text the icon takes the default slot and the button shows the
/// icon alone.
#[derive(Debug)]
struct ButtonIcon {
    selector: Selector,
}

impl ButtonIcon {
    fn new() -> Self {
        Self {
            selector: Selector::class("u-icon"),
        }
    }
}

impl Worker for ButtonIcon {
    fn register(&self, reg: &mut Registrar<'_>) {
        reg.setter(VALUE);
        reg.setter(ICON);
        reg.setter(ICON_POSITION);
        reg.default_value(ICON, "");
        reg.default_value(ICON_POSITION, "start");
    }

    fn selector(&self) -> Option<&Selector> {
        Some(&self.selector)
    }

    fn layout(&self, cx: &mut LayoutCx<'_>) -> Result<Vec<NodeId>, WidgetError> {
        hidden_span(cx, "u-icon")
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let element = cx.element()?;
        let data = cx.data();
        let icon = data.text(ICON);
        let has_text = !data.text(VALUE).is_empty();
        let position = match data.text(ICON_POSITION).as_str() {
            "end" => "end",
            "start" => "start",
            other => {
                tracing::warn!(
                    widget = %cx.widget_name(),
                    position = other,
                    "unknown icon position, using start"
                );
                "start"
            }
        };
        let doc = cx.doc();
        remove_icon_classes(doc, element)?;
        if icon.is_empty() {
            doc.set_hidden(element, true)?;
            doc.set_attribute(element, "slot", "")?;
        } else {
            doc.set_hidden(element, false)?;
            doc.add_class(element, "ms-Icon")?;
            doc.add_class(element, &format!("ms-Icon--{icon}"))?;
            doc.set_attribute(element, "slot", if has_text { position } else { "" })?;
        }
        Ok(())
    }
}

/// The button text, which is also the button's value.
#[derive(Debug)]
struct ButtonText {
    selector: Selector,
}

impl ButtonText {
    fn new() -> Self {
        Self {
            selector: Selector::class("u-text"),
        }
    }
}

impl Worker for ButtonText {
    fn register(&self, reg: &mut Registrar<'_>) {
        reg.setter(VALUE);
        reg.getter(VALUE);
        reg.default_value(VALUE, "");
    }

    fn selector(&self) -> Option<&Selector> {
        Some(&self.selector)
    }

    fn layout(&self, cx: &mut LayoutCx<'_>) -> Result<Vec<NodeId>, WidgetError> {
        hidden_span(cx, "u-text")
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let element = cx.element()?;
        let text = cx.data().text(VALUE);
        let doc = cx.doc();
        doc.set_hidden(element, text.is_empty())?;
        doc.set_text(element, text)?;
        Ok(())
    }

    fn value(&self, view: InstanceView<'_>) -> PropertyValue {
        view.data().value(VALUE).cloned().unwrap_or_default()
    }
}

fn format(properties: &PropertyData) -> FormattedValue {
    FormattedValue {
        primary_plain_text: properties.text(VALUE),
        prefix_icon: properties.text(ICON),
        error_message: error_message(properties),
        ..FormattedValue::default()
    }
}

/// Builds the `UX.Button` class.
///
/// # Errors
///
/// Registration conflicts in the structure.
pub fn descriptor() -> Result<WidgetDescriptor, WidgetError> {
    WidgetDescriptorBuilder::new(NAME)
        .structure(
            Element::new(TAG)
                .child(StyleClass::new(["u-button", "neutral"]))
                .child(HtmlAttribute::property("html:title", "title"))
                .child(
                    HtmlAttributeNumber::property("html:tabindex", "tabIndex")
                        .default(0)
                        .range(Some(-1), None),
                )
                .child(
                    HtmlAttributeChoice::new(
                        "html:appearance",
                        "appearance",
                        ["neutral", "accent", "outline", "lightweight", "stealth"],
                    )
                    .default("neutral"),
                )
                .child(HtmlAttributeBoolean::attribute("html:hidden", "hidden").default(false))
                .child(HtmlAttributeBoolean::property("html:disabled", "disabled").default(false))
                .child(IgnoreProperty::new("html:minlength"))
                .child(IgnoreProperty::new("html:maxlength"))
                .child(IgnoreProperty::new("html:readonly"))
                .child(IgnoreProperty::new("error").default(false))
                .child(IgnoreProperty::new("error-message").default(""))
                .child(ButtonIcon::new())
                .child(ButtonText::new())
                .child(UiBlock::new(UiBlocking::Disabled))
                .child(Trigger::new("detail", "click").validate(true))
                .into_worker(),
        )
        .value_formatter(format, [VALUE, ICON, "error", "error-message"])
        .build()
}
