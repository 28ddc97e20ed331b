// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `UX.Controlbar`: a toolbar of sub-widgets in three sections.
//!
//! The sections are filled at layout time from the object definition:
//! `controls-start`, `controls-center` and `controls-end` each list one
//! sub-widget id per character, and `<id>_widget-class` names the class of
//! each. Sub-widgets are addressed as `<id>:<key>` and their triggers as
//! `<id>_<trigger>`, like declared sub-widgets.

use uxbind_worker::workers::{
    Element, HtmlAttribute, HtmlAttributeBoolean, HtmlAttributeChoice, IdSplit, IgnoreProperty,
    StyleClass, SubWidgetsByProperty,
};
use uxbind_worker::{WidgetDescriptor, WidgetDescriptorBuilder, WidgetError};

/// Registered class name.
pub const NAME: &str = "UX.Controlbar";

fn section(class: &str, layout_property: &str) -> Element {
    Element::new("div").class(class).child(
        SubWidgetsByProperty::new("span", layout_property)
            .class("u-controlbar-item")
            .split(IdSplit::PerChar),
    )
}

/// Builds the `UX.Controlbar` class.
///
/// # Errors
///
/// Registration conflicts in the structure.
pub fn descriptor() -> Result<WidgetDescriptor, WidgetError> {
    WidgetDescriptorBuilder::new(NAME)
        .structure(
            Element::new("div")
                .child(
                    HtmlAttributeChoice::new(
                        "orientation",
                        "u-orientation",
                        ["horizontal", "vertical"],
                    )
                    .default("horizontal"),
                )
                .child(HtmlAttributeBoolean::attribute("html:hidden", "hidden").default(false))
                .child(StyleClass::new(["u-controlbar"]))
                .child(HtmlAttribute::attribute("value", "value").default(""))
                .child(HtmlAttribute::fixed("role", "toolbar"))
                .child(IgnoreProperty::new("error").default(false))
                .child(IgnoreProperty::new("error-message").default(""))
                .child(IgnoreProperty::new("html:disabled").default(false))
                .child(IgnoreProperty::new("html:readonly").default(false))
                .child(IgnoreProperty::new("html:minlength"))
                .child(IgnoreProperty::new("html:maxlength"))
                .child(section("u-start-section", "controls-start"))
                .child(section("u-center-section", "controls-center"))
                .child(section("u-end-section", "controls-end"))
                .into_worker(),
        )
        .build()
}
