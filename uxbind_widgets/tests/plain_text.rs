// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `UX.PlainText` and its `plaintext-format` options.

mod common;

use common::mount;
use uxbind_dom::Selector;
use uxbind_property::{PropertyUpdate, ValRep};
use uxbind_widgets::plain_text::{self, PlainTextFormat};

fn colors() -> ValRep {
    let mut valrep = ValRep::new();
    valrep.push("r", "Red");
    valrep.push("g", "Green");
    valrep
}

#[test]
fn format_names_parse() {
    assert_eq!(PlainTextFormat::parse("single-line"), Some(PlainTextFormat::SingleLine));
    assert_eq!(PlainTextFormat::parse("value-only"), Some(PlainTextFormat::ValueOnly));
    assert_eq!(PlainTextFormat::parse("bold"), None);
    assert!(PlainTextFormat::ValRepText.uses_valrep());
    assert!(!PlainTextFormat::MultiLine.uses_valrep());
    assert_eq!(PlainTextFormat::FirstLine.apply("one\ntwo"), "one...");
    assert_eq!(PlainTextFormat::FirstLine.apply("one"), "one");
    assert_eq!(PlainTextFormat::SingleLine.apply("one\ntwo"), "one two");
}

#[test]
fn empty_value_hides_the_text() {
    let mut m = mount(plain_text::NAME);
    let control = m.find("u-control");
    assert!(m.doc.is_hidden(control));
    m.set("value", "hello");
    assert!(!m.doc.is_hidden(control));
    assert_eq!(m.doc.text(control), "hello");
    m.update(PropertyUpdate::new().with_reset("value"));
    assert!(m.doc.is_hidden(control));
}

#[test]
fn line_formats_shape_the_text() {
    let mut m = mount(plain_text::NAME);
    let control = m.find("u-control");
    m.set("value", "one\ntwo");
    assert_eq!(m.doc.text(control), "one...");
    assert_eq!(m.widget.value_formatted().primary_plain_text, "one...");

    m.set("plaintext-format", "single-line");
    assert_eq!(m.doc.text(control), "one two");

    m.set("plaintext-format", "multi-line");
    assert_eq!(m.doc.text(control), "one\ntwo");

    m.set("plaintext-format", "multi-paragraphs");
    let paragraphs = m
        .doc
        .query_selector_all(control, &Selector::class("u-paragraph"));
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(m.doc.text(paragraphs[1]), "two");
}

#[test]
fn valrep_formats_look_up_the_value() {
    let mut m = mount(plain_text::NAME);
    let control = m.find("u-control");
    m.update(
        PropertyUpdate::new()
            .with("valrep", colors())
            .with("value", "g")
            .with("plaintext-format", "valrep-text"),
    );
    assert_eq!(m.doc.text(control), "Green (g)");
    let formatted = m.widget.value_formatted();
    assert_eq!(formatted.primary_plain_text, "Green");
    assert_eq!(formatted.secondary_plain_text, "g");

    m.set("plaintext-format", "representation-only");
    let rep = m.find("u-valrep-rep");
    assert_eq!(m.doc.text(rep), "Green");

    m.set("plaintext-format", "value-only");
    assert_eq!(m.doc.text(control), "g");
    assert!(!m.format_error());
}

#[test]
fn missing_valrep_item_is_a_format_error() {
    let mut m = mount(plain_text::NAME);
    let control = m.find("u-control");
    m.update(
        PropertyUpdate::new()
            .with("valrep", colors())
            .with("value", "b")
            .with("plaintext-format", "representation-only"),
    );
    assert_eq!(m.doc.text(control), "b");
    assert!(m.format_error());
    assert!(m.doc.has_class(m.root, "u-format-invalid"));
    assert_eq!(m.widget.value_formatted().primary_plain_text, "ERROR");

    let mut more = colors();
    more.push("b", "Blue");
    m.set("valrep", more);
    assert!(!m.format_error());
    assert_eq!(m.doc.text(m.find("u-valrep-rep")), "Blue");
}

#[test]
fn unknown_format_renders_the_first_line() {
    let mut m = mount(plain_text::NAME);
    m.update(
        PropertyUpdate::new()
            .with("value", "one\ntwo")
            .with("plaintext-format", "bold"),
    );
    assert_eq!(m.doc.text(m.find("u-control")), "one...");
    assert_eq!(m.widget.value_formatted().primary_plain_text, "ERROR");
}

#[test]
fn prefix_and_label_are_slotted_text() {
    let mut m = mount(plain_text::NAME);
    m.update(
        PropertyUpdate::new()
            .with("value", "12")
            .with("label-text", "Amount")
            .with("suffix-icon", "Money"),
    );
    assert_eq!(m.doc.text(m.find("u-label-text")), "Amount");
    assert!(m.doc.has_class(m.find("u-suffix"), "ms-Icon--Money"));
    assert_eq!(m.widget.value_formatted().suffix_icon, "Money");
}
