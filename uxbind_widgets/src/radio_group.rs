// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `UX.RadioGroup`: one `<fluent-radio>` per valrep item inside a
//! `<fluent-radio-group>`.
//!
//! Like [`select`](crate::select), the group selects by position: its
//! `value` property is the index of the checked radio as a string.

use uxbind_property::{VALREP, VALUE};
use uxbind_worker::workers::{
    Element, HtmlAttribute, HtmlAttributeBoolean, HtmlAttributeChoice, HtmlAttributeNumber,
    IgnoreProperty, SlottedElement, SlottedError, StyleClass, Trigger, UiBlock, UiBlocking,
    ValRepElements,
};
use uxbind_worker::{WidgetDescriptor, WidgetDescriptorBuilder, WidgetError};

use crate::indexed::{IndexProperty, IndexedValue};
use crate::select::format;
use crate::shadow::SlotPart;

/// Registered class name.
pub const NAME: &str = "UX.RadioGroup";

/// Tag of the rendered control.
pub const TAG: &str = "fluent-radio-group";

/// Builds the `UX.RadioGroup` class.
///
/// # Errors
///
/// Registration conflicts in the structure.
pub fn descriptor() -> Result<WidgetDescriptor, WidgetError> {
    WidgetDescriptorBuilder::new(NAME)
        .structure(
            Element::new(TAG)
                .child(StyleClass::new(["u-radio-group"]))
                .child(HtmlAttribute::property("html:title", "title"))
                .child(HtmlAttributeBoolean::property("html:disabled", "disabled").default(false))
                .child(HtmlAttributeBoolean::attribute("html:hidden", "hidden").default(false))
                .child(
                    HtmlAttributeNumber::property("html:tabindex", "tabIndex")
                        .default(0)
                        .range(Some(-1), None),
                )
                .child(
                    HtmlAttributeChoice::new("layout", "orientation", ["vertical", "horizontal"])
                        .default("vertical"),
                )
                .child(UiBlock::new(UiBlocking::Readonly))
                .child(IndexedValue::new(IndexProperty::Text("value")))
                .child(IgnoreProperty::new("html:minlength"))
                .child(IgnoreProperty::new("html:maxlength"))
                .child(
                    SlottedElement::new("span", "u-label-text")
                        .slot("label")
                        .text("label-text", ""),
                )
                .child(SlottedError::new("span", "u-error-icon").slot("label"))
                .child(SlotPart::new("label", "label"))
                .child(
                    ValRepElements::new("fluent-radio")
                        .class("u-radio")
                        .selected("checked"),
                )
                .child(Trigger::new("onchange", "change").validate(true))
                .into_worker(),
        )
        .value_formatter(format, [VALUE, VALREP, "display-format", "error", "error-message"])
        .build()
}
