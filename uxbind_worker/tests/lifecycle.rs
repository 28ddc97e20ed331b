// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the widget lifecycle.
//!
//! These drive small classes through layout, connect, init, update and
//! cleanup against an in-memory document, with a focus on how updates are
//! grouped per worker and forwarded to sub-widgets.

use std::cell::RefCell;
use std::rc::Rc;

use uxbind_dom::{Document, NodeId};
use uxbind_property::{PropertyKey, PropertyNameSets, PropertyUpdate, PropertyValue};
use uxbind_worker::workers::{
    Element, HtmlAttribute, HtmlAttributeBoolean, SlottedSubWidget, StyleClass, StyleProperty,
    Trigger, UiBlock, UiBlocking,
};
use uxbind_worker::{
    ClassRegistry, InstanceView, ObjectDefinition, Registrar, VALIDATION_ERRORS_ID, Widget,
    WidgetDescriptorBuilder, WidgetError, Worker, WorkerCx,
};

type Log = Rc<RefCell<Vec<String>>>;

/// Records what it saw of its keys on every refresh.
#[derive(Debug)]
struct Recorder {
    keys: Vec<&'static str>,
    log: Log,
}

impl Worker for Recorder {
    fn register(&self, reg: &mut Registrar<'_>) {
        for key in &self.keys {
            reg.setter(*key);
            reg.default_value(*key, "d");
        }
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let seen: Vec<String> = self.keys.iter().map(|k| cx.data().text(k)).collect();
        self.log.borrow_mut().push(seen.join(","));
        Ok(())
    }
}

/// Rejects an empty `label`.
#[derive(Debug)]
struct Required;

impl Worker for Required {
    fn register(&self, _reg: &mut Registrar<'_>) {}

    fn refresh(&self, _cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        Ok(())
    }

    fn validate(&self, view: InstanceView<'_>) -> Option<String> {
        view.data().text("label").is_empty().then(|| "required".to_owned())
    }
}

fn mount(registry: &ClassRegistry, class: &str) -> (Document, Widget, NodeId) {
    let mut doc = Document::new();
    let skeleton = doc.create_element("div").unwrap();
    let mut object = ObjectDefinition::new("OBJ", class);
    let descriptor = Rc::clone(registry.get(class).unwrap());
    let root =
        Widget::process_layout(&descriptor, registry, &mut doc, skeleton, &mut object).unwrap();
    let body = doc.body();
    doc.append_child(body, root).unwrap();
    let mut widget = registry.instantiate(class).unwrap();
    widget.on_connect(&mut doc, root, registry).unwrap();
    widget.data_init(&mut doc).unwrap();
    (doc, widget, root)
}

fn recorder_registry(log: &Log) -> ClassRegistry {
    let mut registry = ClassRegistry::new();
    let descriptor = WidgetDescriptorBuilder::new("Rec")
        .structure(
            Element::new("div")
                .child(StyleClass::new(["u-rec"]))
                .child(StyleProperty::new())
                .child(Recorder {
                    keys: vec!["a", "b"],
                    log: Rc::clone(log),
                })
                .into_worker(),
        )
        .build()
        .unwrap();
    registry.register(descriptor).unwrap();
    registry
}

fn child_registry() -> ClassRegistry {
    let mut registry = ClassRegistry::new();
    let child = WidgetDescriptorBuilder::new("Child")
        .structure(
            Element::new("span")
                .child(HtmlAttribute::property("label", "innerText").default(""))
                .child(HtmlAttributeBoolean::property("html:disabled", "disabled").default(false))
                .child(UiBlock::new(UiBlocking::Disabled))
                .child(Trigger::new("detail", "click"))
                .child(Trigger::new("other", "focus"))
                .child(Required)
                .into_worker(),
        )
        .build()
        .unwrap();
    registry.register(child).unwrap();
    let parent = WidgetDescriptorBuilder::new("Parent")
        .structure(
            Element::new("div")
                .child(HtmlAttributeBoolean::property("html:disabled", "disabled").default(false))
                .child(
                    SlottedSubWidget::new("span", "btn", "Child")
                        .defaults([("label", "Go")])
                        .delegated(["html:disabled"])
                        .triggers(["detail"]),
                )
                .into_worker(),
        )
        .build()
        .unwrap();
    registry.register(parent).unwrap();
    registry
}

#[test]
fn init_applies_defaults() {
    let log = Log::default();
    let (doc, widget, root) = mount(&recorder_registry(&log), "Rec");
    assert!(doc.has_class(root, "u-rec"));
    assert_eq!(*log.borrow(), ["d,d"]);
    assert_eq!(widget.data().text("a"), "d");
}

#[test]
fn update_refreshes_each_worker_once_with_every_value() {
    let log = Log::default();
    let (mut doc, mut widget, _) = mount(&recorder_registry(&log), "Rec");
    widget
        .data_update(&mut doc, PropertyUpdate::new().with("a", "1").with("b", "2"))
        .unwrap();
    assert_eq!(*log.borrow(), ["d,d", "1,2"]);
}

#[test]
fn unknown_keys_are_inert() {
    let log = Log::default();
    let (mut doc, mut widget, _) = mount(&recorder_registry(&log), "Rec");
    widget
        .data_update(&mut doc, PropertyUpdate::new().with("nope", "x"))
        .unwrap();
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn reset_restores_defaults_and_unsets_styles() {
    let log = Log::default();
    let (mut doc, mut widget, root) = mount(&recorder_registry(&log), "Rec");
    widget
        .data_update(
            &mut doc,
            PropertyUpdate::new().with("a", "x").with("style:color", "red"),
        )
        .unwrap();
    assert_eq!(doc.style(root, "color"), Some("red"));

    widget
        .data_update(
            &mut doc,
            PropertyUpdate::new().with_reset("a").with_reset("style:color"),
        )
        .unwrap();
    assert_eq!(doc.style(root, "color"), None);
    assert_eq!(widget.data().text("a"), "d");
    assert_eq!(widget.data().text("style:color"), "unset");
}

#[test]
fn cleanup_resets_each_worker_once_and_drops_extra_classes() {
    let log = Log::default();
    let (mut doc, mut widget, root) = mount(&recorder_registry(&log), "Rec");
    let update = PropertyUpdate::new()
        .with("a", "1")
        .with("b", "2")
        .with("class:extra", true);
    let mut names = PropertyNameSets::new();
    names.record(&update);
    widget.data_update(&mut doc, update).unwrap();
    assert!(doc.has_class(root, "extra"));

    widget.data_cleanup(&mut doc, names).unwrap();
    assert!(!doc.has_class(root, "extra"));
    assert!(doc.has_class(root, "u-rec"));
    assert_eq!(*log.borrow(), ["d,d", "1,2", "d,d"]);
}

#[test]
fn class_defaults_come_back_after_cleanup() {
    let log = Log::default();
    let (mut doc, mut widget, root) = mount(&recorder_registry(&log), "Rec");
    let update = PropertyUpdate::new().with("class:u-rec", false);
    let mut names = PropertyNameSets::new();
    names.record(&update);
    widget.data_update(&mut doc, update).unwrap();
    assert!(!doc.has_class(root, "u-rec"));
    widget.data_cleanup(&mut doc, names).unwrap();
    assert!(doc.has_class(root, "u-rec"));
}

#[test]
fn updates_before_connect_fail() {
    let log = Log::default();
    let registry = recorder_registry(&log);
    let mut doc = Document::new();
    let mut widget = registry.instantiate("Rec").unwrap();
    assert!(matches!(
        widget.data_update(&mut doc, PropertyUpdate::new().with("a", "1")),
        Err(WidgetError::NotConnected { .. })
    ));
}

#[test]
fn connect_is_cached_per_root() {
    let log = Log::default();
    let registry = recorder_registry(&log);
    let (mut doc, mut widget, root) = mount(&registry, "Rec");
    let first = widget.on_connect(&mut doc, root, &registry).unwrap();
    let second = widget.on_connect(&mut doc, root, &registry).unwrap();
    assert_eq!(first, second);
    assert_eq!(widget.value(&doc), PropertyValue::from(""));
}

#[test]
fn sub_widget_receives_prefixed_defaults_and_updates() {
    let registry = child_registry();
    let (mut doc, mut widget, _) = mount(&registry, "Parent");
    let child = widget.sub_widget("btn").unwrap();
    let child_root = child.root().unwrap();
    assert_eq!(doc.text(child_root), "Go");

    widget
        .data_update(&mut doc, PropertyUpdate::new().with("btn:label", "Run"))
        .unwrap();
    assert_eq!(doc.text(child_root), "Run");
    assert!(!widget.data().contains(&PropertyKey::parse("btn:label")));
}

#[test]
fn delegated_properties_reach_both_widgets() {
    let registry = child_registry();
    let (mut doc, mut widget, root) = mount(&registry, "Parent");
    let child_root = widget.sub_widget("btn").unwrap().root().unwrap();
    widget
        .data_update(&mut doc, PropertyUpdate::new().with("html:disabled", true))
        .unwrap();
    assert!(doc.property_flag(root, "disabled"));
    assert!(doc.property_flag(child_root, "disabled"));
}

#[test]
fn sub_widget_triggers_are_filtered() {
    let registry = child_registry();
    let (doc, widget, _) = mount(&registry, "Parent");
    let child_root = widget.sub_widget("btn").unwrap().root().unwrap();
    let mapping = widget.map_trigger(&doc, "btn_detail").unwrap();
    assert_eq!(mapping.element, child_root);
    assert_eq!(mapping.event_name, "click");
    assert!(widget.map_trigger(&doc, "btn_other").is_none());
    assert!(widget.map_trigger(&doc, "detail").is_none());
}

#[test]
fn validation_is_aggregated_and_routed_back() {
    let registry = child_registry();
    let (mut doc, mut widget, _) = mount(&registry, "Parent");
    assert_eq!(widget.validate(&doc), None);

    widget
        .data_update(&mut doc, PropertyUpdate::new().with("btn:label", ""))
        .unwrap();
    let payload = widget.validate(&doc).unwrap();
    let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(json["id"], VALIDATION_ERRORS_ID);
    assert_eq!(json["validationMessages"]["btn"], "required");

    widget.show_error(&mut doc, &payload).unwrap();
    let child = widget.sub_widget("btn").unwrap();
    assert!(child.data().flag("error"));
    assert_eq!(child.data().text("error-message"), "required");
    assert!(!widget.data().flag("error"));

    widget.show_error(&mut doc, "whole widget").unwrap();
    assert!(widget.data().flag("error"));
    assert!(!widget.sub_widget("btn").unwrap().data().flag("error"));

    widget.hide_error(&mut doc).unwrap();
    assert!(!widget.data().flag("error"));
}

#[test]
fn blocking_recurses_and_restores() {
    let registry = child_registry();
    let (mut doc, mut widget, _) = mount(&registry, "Parent");
    let child_root = widget.sub_widget("btn").unwrap().root().unwrap();

    widget.block_ui(&mut doc).unwrap();
    assert!(doc.has_class(child_root, "u-blocked"));
    assert!(doc.property_flag(child_root, "disabled"));

    widget.unblock_ui(&mut doc).unwrap();
    assert!(!doc.has_class(child_root, "u-blocked"));
    assert!(!doc.property_flag(child_root, "disabled"));
}

#[derive(Clone, Default)]
struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Captured {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn unsupported_properties_are_reported_when_enabled() {
    let mut registry = ClassRegistry::new();
    for (name, report) in [("Quiet", false), ("Loud", true)] {
        let descriptor = WidgetDescriptorBuilder::new(name)
            .structure(
                Element::new("div")
                    .child(HtmlAttribute::property("label", "innerText").default(""))
                    .into_worker(),
            )
            .report_unsupported_properties(report)
            .build()
            .unwrap();
        registry.register(descriptor).unwrap();
    }
    let (mut quiet_doc, mut quiet, _) = mount(&registry, "Quiet");
    let (mut loud_doc, mut loud, _) = mount(&registry, "Loud");

    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        let update = PropertyUpdate::new().with("label", "x").with("bogus", 1);
        quiet.data_update(&mut quiet_doc, update.clone()).unwrap();
        loud.data_update(&mut loud_doc, update).unwrap();
    });

    let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    let warnings: Vec<&str> = output.lines().collect();
    assert_eq!(warnings.len(), 1, "only the reporting class warns: {output}");
    assert!(warnings[0].contains("widget=Loud"), "{output}");
    assert!(warnings[0].contains("property=bogus"), "{output}");
}
