// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `UX.Listbox`: an always-open `<fluent-listbox>` of `<fluent-option>`s.
//!
//! The control's numeric `selectedIndex` is the position of the value in
//! valrep, `-1` when it is not there.

use uxbind_property::{VALREP, VALUE};
use uxbind_worker::workers::{
    Element, HtmlAttribute, HtmlAttributeBoolean, HtmlAttributeNumber, IgnoreProperty,
    SlottedElement, SlottedError, StyleClass, Trigger, UiBlock, UiBlocking, ValRepElements,
};
use uxbind_worker::{WidgetDescriptor, WidgetDescriptorBuilder, WidgetError};

use crate::indexed::{IndexProperty, IndexedValue};
use crate::select::format;
use crate::shadow::LabelSlot;

/// Registered class name.
pub const NAME: &str = "UX.Listbox";

/// Tag of the rendered control.
pub const TAG: &str = "fluent-listbox";

/// Builds the `UX.Listbox` class.
///
/// # Errors
///
/// Registration conflicts in the structure.
pub fn descriptor() -> Result<WidgetDescriptor, WidgetError> {
    WidgetDescriptorBuilder::new(NAME)
        .structure(
            Element::new(TAG)
                .child(StyleClass::new(["u-listbox"]))
                .child(HtmlAttribute::property("html:title", "title"))
                .child(HtmlAttribute::fixed("role", "listbox"))
                .child(HtmlAttributeBoolean::property("html:disabled", "disabled").default(false))
                .child(HtmlAttributeBoolean::attribute("html:hidden", "hidden").default(false))
                .child(
                    HtmlAttributeNumber::property("html:tabindex", "tabIndex")
                        .default(0)
                        .range(Some(-1), None),
                )
                .child(UiBlock::new(UiBlocking::Readonly))
                .child(LabelSlot)
                .child(IndexedValue::new(IndexProperty::Number("selectedIndex")))
                .child(IgnoreProperty::new("html:minlength"))
                .child(IgnoreProperty::new("html:maxlength"))
                .child(
                    SlottedElement::new("span", "u-label-text")
                        .slot("label")
                        .text("label-text", ""),
                )
                .child(SlottedError::new("span", "u-error-icon").slot("error"))
                .child(
                    ValRepElements::new("fluent-option")
                        .class("u-option")
                        .selected("selected"),
                )
                .child(Trigger::new("onchange", "change").validate(true))
                .into_worker(),
        )
        .value_formatter(format, [VALUE, VALREP, "display-format", "error", "error-message"])
        .build()
}
