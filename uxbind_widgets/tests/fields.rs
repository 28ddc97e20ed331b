// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `UX.Button`, `UX.TextField` and `UX.NumberField`.
//!
//! The fields embed a `UX.Button` as their commit button, so these also
//! cover a declared sub-widget end to end.

mod common;

use common::{Mounted, mount};
use uxbind_dom::DomError;
use uxbind_property::{PropertyUpdate, PropertyValue};
use uxbind_widgets::{button, number_field, text_field};
use uxbind_worker::WidgetError;

fn change_button_root(m: &Mounted) -> uxbind_dom::NodeId {
    m.widget
        .sub_widget(text_field::CHANGE_BUTTON)
        .and_then(|button| button.root())
        .unwrap()
}

#[test]
fn button_icon_follows_the_text() {
    let mut m = mount(button::NAME);
    let icon = m.find("u-icon");
    let text = m.find("u-text");
    assert!(m.doc.is_hidden(icon));
    assert!(m.doc.is_hidden(text));

    m.set("icon", "Save");
    assert!(!m.doc.is_hidden(icon));
    assert!(m.doc.has_class(icon, "ms-Icon--Save"));
    assert_eq!(m.doc.attribute(icon, "slot"), Some(""));

    m.set("value", "Save file");
    assert!(!m.doc.is_hidden(text));
    assert_eq!(m.doc.attribute(icon, "slot"), Some("start"));

    m.set("icon-position", "end");
    assert_eq!(m.doc.attribute(icon, "slot"), Some("end"));
    m.set("icon-position", "sideways");
    assert_eq!(m.doc.attribute(icon, "slot"), Some("start"));

    m.update(PropertyUpdate::new().with_reset("icon"));
    assert!(m.doc.is_hidden(icon));
    assert!(!m.doc.has_class(icon, "ms-Icon"));
}

#[test]
fn button_value_and_formatting() {
    let mut m = mount(button::NAME);
    m.update(PropertyUpdate::new().with("value", "Go").with("icon", "Play"));
    assert_eq!(m.value(), PropertyValue::from("Go"));
    let formatted = m.widget.value_formatted();
    assert_eq!(formatted.primary_plain_text, "Go");
    assert_eq!(formatted.prefix_icon, "Play");

    let mapping = m.widget.map_trigger(&m.doc, "detail").unwrap();
    assert_eq!(mapping.element, m.root);
    assert_eq!(mapping.event_name, "click");
    assert!(mapping.validate);
}

#[test]
fn text_value_lives_in_the_control() {
    let mut m = mount(text_field::NAME);
    m.set("value", "abc");
    assert_eq!(
        m.doc.property(m.root, "value"),
        Some(&PropertyValue::from("abc"))
    );
    m.doc.set_property(m.root, "value", "typed").unwrap();
    assert_eq!(m.value(), PropertyValue::from("typed"));
}

#[test]
fn change_button_is_a_configured_sub_widget() {
    let mut m = mount(text_field::NAME);
    let button = change_button_root(&m);
    assert!(m.doc.is_hidden(button));
    assert_eq!(m.doc.attribute(button, "appearance"), Some("stealth"));

    m.update(
        PropertyUpdate::new()
            .with(text_field::CHANGE_BUTTON, true)
            .with("changebutton:icon", "Send"),
    );
    assert!(!m.doc.is_hidden(button));
    assert_eq!(m.doc.attribute(button, "slot"), Some("end"));
    assert!(m.doc.has_class(m.root, "u-sw-changebutton-shown"));
    let child = m.widget.sub_widget(text_field::CHANGE_BUTTON).unwrap();
    assert_eq!(child.data().text("icon"), "Send");
    assert_eq!(child.data().text("icon-position"), "end");
}

#[test]
fn change_button_click_commits_the_field() {
    let mut m = mount(text_field::NAME);
    m.set(text_field::CHANGE_BUTTON, true);
    let button = change_button_root(&m);
    let root = m.root;
    let events = m.click(button);
    assert!(events.iter().any(|e| e.is(root, "change")));
}

#[test]
fn disabled_reaches_the_change_button() {
    let mut m = mount(text_field::NAME);
    let button = change_button_root(&m);
    m.set("html:disabled", true);
    assert!(m.doc.property_flag(m.root, "disabled"));
    assert!(m.doc.property_flag(button, "disabled"));
}

#[test]
fn minlength_is_validated_for_host_values() {
    let mut m = mount(text_field::NAME);
    m.set("html:minlength", 5);
    m.set("value", "abc");
    assert_eq!(
        m.widget.validate(&m.doc).as_deref(),
        Some(
            "Please lengthen this text to 5 characters or more \
             (you are currently using 3 characters)."
        )
    );
    m.set("value", "abcdef");
    assert_eq!(m.widget.validate(&m.doc), None);
}

#[test]
fn crossed_lengths_are_refused() {
    let mut m = mount(text_field::NAME);
    let length = |m: &Mounted, name: &str| {
        m.doc
            .property(m.root, name)
            .and_then(PropertyValue::parse_integer)
    };
    m.update(
        PropertyUpdate::new()
            .with("html:minlength", 2)
            .with("html:maxlength", 6),
    );
    assert_eq!(length(&m, "minlength"), Some(2));
    assert_eq!(length(&m, "maxlength"), Some(6));

    m.update(
        PropertyUpdate::new()
            .with("html:minlength", 8)
            .with("html:maxlength", 4),
    );
    assert_eq!(length(&m, "minlength"), Some(2));
    assert_eq!(length(&m, "maxlength"), Some(6));

    m.update(
        PropertyUpdate::new()
            .with_reset("html:minlength")
            .with_reset("html:maxlength"),
    );
    assert_eq!(length(&m, "maxlength"), Some(10_000));
}

#[test]
fn read_only_refusal_is_swallowed_only_in_error_state() {
    let mut m = mount(text_field::NAME);
    // The control refuses the write, but the widget does not know why.
    m.set("class:u-invalid", true);
    let refused = m
        .widget
        .data_update(&mut m.doc, PropertyUpdate::new().with("html:readonly", true));
    assert!(matches!(
        refused,
        Err(WidgetError::Dom(DomError::Component { .. }))
    ));

    m.set("class:u-invalid", false);
    m.widget.show_error(&mut m.doc, "too short").unwrap();
    m.set("html:readonly", true);
    assert!(!m.doc.property_flag(m.root, "readOnly"));

    m.widget.hide_error(&mut m.doc).unwrap();
    m.set("html:readonly", true);
    assert!(m.doc.property_flag(m.root, "readOnly"));
}

#[test]
fn affixes_prefer_icons() {
    let mut m = mount(text_field::NAME);
    m.update(
        PropertyUpdate::new()
            .with("value", "42")
            .with("prefix-text", "EUR")
            .with("suffix-text", "net")
            .with("suffix-icon", "Money"),
    );
    let prefix = m.find("u-prefix");
    assert_eq!(m.doc.text(prefix), "EUR");
    assert_eq!(m.doc.attribute(prefix, "slot"), Some("start"));
    let suffix = m.find("u-suffix");
    assert!(m.doc.has_class(suffix, "ms-Icon--Money"));

    let formatted = m.widget.value_formatted();
    assert_eq!(formatted.primary_plain_text, "42");
    assert_eq!(formatted.prefix_text, "EUR");
    assert_eq!(formatted.suffix_icon, "Money");
    assert_eq!(formatted.suffix_text, "");
}

#[test]
fn number_field_bounds_are_attributes() {
    let mut m = mount(number_field::NAME);
    m.update(
        PropertyUpdate::new()
            .with("html:min", 0)
            .with("html:max", 10)
            .with("html:minlength", 3),
    );
    assert_eq!(m.doc.attribute(m.root, "min"), Some("0"));
    assert_eq!(m.doc.attribute(m.root, "max"), Some("10"));
    assert_eq!(m.doc.property(m.root, "minlength"), None);

    m.set("value", "7");
    assert_eq!(m.value(), PropertyValue::from("7"));
    assert_eq!(m.widget.validate(&m.doc), None);
}

#[test]
fn number_field_has_a_change_button_too() {
    let mut m = mount(number_field::NAME);
    m.set(text_field::CHANGE_BUTTON, true);
    let button = change_button_root(&m);
    let root = m.root;
    assert!(m.click(button).iter().any(|e| e.is(root, "change")));
}
