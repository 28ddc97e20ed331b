// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document behavior as seen by widget adapters.

use std::rc::Rc;

use uxbind_dom::{Component, Document, DomError, DomEvent, NodeId, Selector};
use uxbind_property::PropertyValue;

/// A toggle that builds a shadow indicator, refuses non-boolean `checked`
/// values, emits `change` when `checked` flips and toggles on click.
#[derive(Debug)]
struct Toggle;

impl Component for Toggle {
    fn construct(&self, doc: &mut Document, host: NodeId) -> Result<(), DomError> {
        let shadow = doc.attach_shadow(host)?;
        let indicator = doc.create_element("span")?;
        doc.add_class(indicator, "indicator")?;
        doc.append_child(shadow, indicator)
    }

    fn will_set_property(
        &self,
        _doc: &Document,
        _host: NodeId,
        name: &str,
        value: &PropertyValue,
    ) -> Result<(), DomError> {
        if name == "checked" && value.as_bool().is_none() {
            return Err(DomError::Component {
                tag: "x-toggle".into(),
                property: name.into(),
                message: "not a boolean".into(),
            });
        }
        Ok(())
    }

    fn property_changed(
        &self,
        doc: &mut Document,
        host: NodeId,
        name: &str,
        _old: &PropertyValue,
    ) -> Result<(), DomError> {
        if name == "checked" {
            doc.dispatch_event(DomEvent::new(host, "change"));
        }
        Ok(())
    }

    fn activate(&self, doc: &mut Document, host: NodeId) -> Result<(), DomError> {
        let checked = doc.property_flag(host, "checked");
        doc.set_property(host, "checked", !checked).map(drop)
    }
}

fn toggle_doc() -> (Document, NodeId) {
    let mut doc = Document::new();
    doc.define_component("x-toggle", Rc::new(Toggle));
    let toggle = doc.create_element("x-toggle").unwrap();
    let body = doc.body();
    doc.append_child(body, toggle).unwrap();
    (doc, toggle)
}

#[test]
fn component_constructs_shadow_content() {
    let (doc, toggle) = toggle_doc();
    let shadow = doc.shadow_root(toggle).expect("shadow root");
    assert!(
        doc.query_selector(shadow, &Selector::class("indicator"))
            .is_some()
    );
}

#[test]
fn property_change_emits_once_per_change() {
    let (mut doc, toggle) = toggle_doc();
    assert!(doc.set_property(toggle, "checked", true).unwrap());
    assert!(!doc.set_property(toggle, "checked", true).unwrap());
    let events = doc.take_events();
    assert_eq!(events, vec![DomEvent::new(toggle, "change")]);
}

#[test]
fn vetoed_write_leaves_property_untouched() {
    let (mut doc, toggle) = toggle_doc();
    doc.set_property(toggle, "checked", true).unwrap();
    doc.take_events();
    let err = doc.set_property(toggle, "checked", "maybe").unwrap_err();
    assert!(matches!(err, DomError::Component { .. }));
    assert_eq!(
        doc.property(toggle, "checked"),
        Some(&PropertyValue::Bool(true))
    );
    assert!(doc.pending_events().is_empty());
}

#[test]
fn click_runs_activation() {
    let (mut doc, toggle) = toggle_doc();
    doc.click(toggle).unwrap();
    assert!(doc.property_flag(toggle, "checked"));
    doc.click(toggle).unwrap();
    assert!(!doc.property_flag(toggle, "checked"));
    assert_eq!(doc.take_events_for(toggle, "change").len(), 2);
}

#[test]
fn click_on_plain_element_queues_click() {
    let mut doc = Document::new();
    let button = doc.create_element("button").unwrap();
    doc.click(button).unwrap();
    assert_eq!(doc.take_events(), vec![DomEvent::new(button, "click")]);
}

#[test]
fn take_events_for_keeps_other_events() {
    let mut doc = Document::new();
    let a = doc.create_element("div").unwrap();
    let b = doc.create_element("div").unwrap();
    doc.dispatch_event(DomEvent::new(a, "change"));
    doc.dispatch_event(DomEvent::new(b, "change"));
    doc.dispatch_event(DomEvent::new(a, "input"));
    assert_eq!(doc.take_events_for(a, "change").len(), 1);
    let rest: Vec<_> = doc
        .pending_events()
        .iter()
        .map(|e| (e.target, e.name.as_str()))
        .collect();
    assert_eq!(rest, [(b, "change"), (a, "input")]);
}

#[test]
fn query_selector_walks_in_document_order() {
    let mut doc = Document::new();
    let root = doc.create_element("div").unwrap();
    let first = doc.create_element("span").unwrap();
    let nested = doc.create_element("span").unwrap();
    let second = doc.create_element("span").unwrap();
    for (parent, child) in [(root, first), (first, nested), (root, second)] {
        doc.append_child(parent, child).unwrap();
    }
    let spans = doc.query_selector_all(root, &Selector::tag("span"));
    assert_eq!(spans, [first, nested, second]);
    assert!(!spans.contains(&root));
}

#[test]
fn set_text_detaches_children() {
    let mut doc = Document::new();
    let root = doc.create_element("div").unwrap();
    let child = doc.create_element("span").unwrap();
    doc.append_child(root, child).unwrap();
    doc.set_text(root, "plain").unwrap();
    assert!(doc.children(root).is_empty());
    assert_eq!(doc.parent(child), None);
    assert_eq!(doc.text_content(root), "plain");
}

#[test]
fn classes_attributes_and_styles() {
    let mut doc = Document::new();
    let el = doc.create_element("div").unwrap();
    assert!(doc.add_class(el, "a").unwrap());
    assert!(!doc.add_class(el, "a").unwrap());
    doc.toggle_class(el, "b", true).unwrap();
    assert_eq!(doc.classes(el), ["a", "b"]);
    doc.set_hidden(el, true).unwrap();
    assert!(doc.is_hidden(el));
    doc.set_hidden(el, false).unwrap();
    assert!(!doc.is_hidden(el));
    doc.set_style(el, "color", "red").unwrap();
    doc.set_style(el, "color", "blue").unwrap();
    assert_eq!(doc.style(el, "color"), Some("blue"));
    assert!(doc.remove_style(el, "color").unwrap());
    assert_eq!(doc.style(el, "color"), None);
}
