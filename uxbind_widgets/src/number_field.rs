// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `UX.NumberField`: a `<fluent-number-field>` with step buttons.

use uxbind_worker::workers::{
    Element, HtmlAttribute, HtmlAttributeBoolean, HtmlAttributeChoice, HtmlAttributeMinMax,
    HtmlAttributeNumber, IgnoreProperty, SlottedElement, SlottedError, StyleClass, Trigger,
    UiBlock, UiBlocking,
};
use uxbind_worker::{WidgetDescriptor, WidgetDescriptorBuilder, WidgetError};

use crate::text_field::{AFFIXED_PROPERTIES, TextValue, change_button, format_affixed};

/// Registered class name.
pub const NAME: &str = "UX.NumberField";

/// Tag of the rendered control.
pub const TAG: &str = "fluent-number-field";

/// Builds the `UX.NumberField` class.
///
/// `html:min` and `html:max` bound the step buttons. The length properties
/// of text fields are accepted and ignored.
///
/// # Errors
///
/// Registration conflicts in the structure.
pub fn descriptor() -> Result<WidgetDescriptor, WidgetError> {
    WidgetDescriptorBuilder::new(NAME)
        .structure(
            Element::new(TAG)
                .child(StyleClass::new(["u-number-field", "outline"]))
                .child(TextValue::new(false))
                .child(HtmlAttribute::attribute("html:size", "size").default(""))
                .child(HtmlAttribute::property("html:step", "step").default(1))
                .child(HtmlAttribute::property("html:placeholder", "placeholder"))
                .child(HtmlAttribute::property("html:title", "title"))
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
                        "label-position",
                        "u-label-position",
                        ["above", "below", "before", "after"],
                    )
                    .default("above"),
                )
                .child(HtmlAttributeBoolean::attribute("html:hidden", "hidden").default(false))
                .child(HtmlAttributeBoolean::property("html:hide-step", "hideStep").default(false))
                .child(HtmlAttributeBoolean::property("html:disabled", "disabled").default(false))
                .child(IgnoreProperty::new("html:minlength"))
                .child(IgnoreProperty::new("html:maxlength"))
                .child(HtmlAttributeMinMax::new("html:min", "html:max"))
                .child(UiBlock::new(UiBlocking::Readonly))
                .child(SlottedElement::new("span", "u-label-text").text("label-text", ""))
                .child(
                    SlottedElement::new("span", "u-prefix")
                        .slot("start")
                        .text("prefix-text", "")
                        .icon("prefix-icon", ""),
                )
                .child(SlottedError::new("span", "u-error-icon").slot("end"))
                .child(
                    SlottedElement::new("span", "u-suffix")
                        .slot("end")
                        .text("suffix-text", "")
                        .icon("suffix-icon", ""),
                )
                .child(change_button())
                .child(Trigger::new("onchange", "change").validate(true))
                .into_worker(),
        )
        .value_formatter(format_affixed, AFFIXED_PROPERTIES)
        .build()
}
