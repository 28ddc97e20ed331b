// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `UX.Switch`, including the patches to its shadow DOM.

mod common;

use std::rc::Rc;

use common::mount;
use uxbind_dom::Selector;
use uxbind_property::{DEFAULT_FORMAT_ERROR_MESSAGE, PropertyValue};
use uxbind_widgets::switch;
use uxbind_worker::Widget;

#[test]
fn boolean_values_drive_checked() {
    let mut m = mount(switch::NAME);
    assert_eq!(m.value(), PropertyValue::from(false));

    m.set("value", "on");
    assert!(m.doc.property_flag(m.root, "checked"));
    assert_eq!(m.value(), PropertyValue::from(true));

    m.set("value", 0);
    assert!(!m.doc.property_flag(m.root, "checked"));
}

#[test]
fn unusable_values_raise_a_format_error() {
    let mut m = mount(switch::NAME);
    m.set("value", "yes");
    for bad in ["maybe", ""] {
        m.set("value", bad);
        assert!(m.format_error(), "{bad:?} is not a boolean");
        assert!(m.doc.property_flag(m.root, "checked"));
        assert!(m.doc.has_class(m.root, "u-format-invalid"));
    }
    let formatted = m.widget.value_formatted();
    assert_eq!(formatted.primary_plain_text, "ERROR");
    assert_eq!(formatted.error_message, DEFAULT_FORMAT_ERROR_MESSAGE);

    m.set("value", "no");
    assert!(!m.format_error());
    assert!(!m.doc.has_class(m.root, "u-format-invalid"));
}

#[test]
fn formatted_value_uses_the_state_messages() {
    let mut m = mount(switch::NAME);
    assert_eq!(m.widget.value_formatted().primary_plain_text, "Off");
    m.set("value", true);
    assert_eq!(m.widget.value_formatted().primary_plain_text, "On");
    m.set("checked-message", "Enabled");
    assert_eq!(m.widget.value_formatted().primary_plain_text, "Enabled");
}

#[test]
fn state_messages_take_their_slots() {
    let mut m = mount(switch::NAME);
    let message = m.find("u-checked-message");
    assert!(m.doc.is_hidden(message));
    m.set("checked-message", "Enabled");
    assert!(!m.doc.is_hidden(message));
    assert_eq!(m.doc.attribute(message, "slot"), Some("checked-message"));
    assert_eq!(m.doc.text(message), "Enabled");
}

#[test]
fn shadow_gets_one_error_slot_and_a_toggle_part() {
    let m = mount(switch::NAME);
    let mut doc = m.doc;
    let shadow = doc.shadow_root(m.root).unwrap();
    let error_part = Selector::attribute("part", Some("error"));
    assert_eq!(doc.query_selector_all(shadow, &error_part).len(), 1);
    let toggle = doc
        .query_selector(shadow, &Selector::attribute("name", Some("switch")))
        .unwrap();
    assert_eq!(doc.attribute(toggle, "part"), Some("switch-toggle"));

    // A second instance connecting to the same element patches nothing twice.
    let descriptor = Rc::clone(m.widget.descriptor());
    let mut again = Widget::new(descriptor);
    again.on_connect(&mut doc, m.root, &m.registry).unwrap();
    assert_eq!(doc.query_selector_all(shadow, &error_part).len(), 1);
}

#[test]
fn validation_error_shows_in_the_error_slot() {
    let mut m = mount(switch::NAME);
    m.widget.show_error(&mut m.doc, "must be on").unwrap();
    let icon = m.find("u-error-icon");
    assert_eq!(m.doc.attribute(icon, "slot"), Some("error"));
    assert_eq!(m.doc.attribute(icon, "title"), Some("must be on"));
    assert!(m.doc.has_class(m.root, "u-invalid"));
}

#[test]
fn user_toggle_is_reported_and_clears_errors() {
    let mut m = mount(switch::NAME);
    m.widget.show_error(&mut m.doc, "must be on").unwrap();
    let root = m.root;
    let events = m.click(root);
    assert!(events.iter().any(|e| e.is(root, "change")));
    assert_eq!(m.value(), PropertyValue::from(true));
    assert!(!m.doc.has_class(root, "u-invalid"));
}

#[test]
fn host_writes_keep_the_validation_error() {
    let mut m = mount(switch::NAME);
    m.widget.show_error(&mut m.doc, "must be on").unwrap();
    m.set("value", true);
    let delivered = m.pump();
    assert!(delivered.iter().all(|e| !e.is(m.root, "change")));
    assert!(m.doc.property_flag(m.root, "checked"));
    assert!(m.widget.data().flag("error"));
    assert!(m.doc.has_class(m.root, "u-invalid"));
}

#[test]
fn read_only_switch_ignores_clicks() {
    let mut m = mount(switch::NAME);
    m.set("html:readonly", true);
    let root = m.root;
    assert!(m.click(root).is_empty());
    assert_eq!(m.value(), PropertyValue::from(false));
}

#[test]
fn unblocking_restores_the_host_disabled_state() {
    let mut m = mount(switch::NAME);
    m.widget.block_ui(&mut m.doc).unwrap();
    assert!(m.doc.has_class(m.root, "u-blocked"));
    assert!(m.doc.property_flag(m.root, "disabled"));
    m.widget.unblock_ui(&mut m.doc).unwrap();
    assert!(!m.doc.property_flag(m.root, "disabled"));

    m.set("html:disabled", true);
    m.widget.block_ui(&mut m.doc).unwrap();
    m.widget.unblock_ui(&mut m.doc).unwrap();
    assert!(!m.doc.has_class(m.root, "u-blocked"));
    assert!(m.doc.property_flag(m.root, "disabled"));
}
