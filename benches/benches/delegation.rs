// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for forwarding updates from a controlbar to its sub-widgets.

use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use uxbind_dom::Document;
use uxbind_property::PropertyUpdate;
use uxbind_widgets::{button, controlbar, register_all, register_components};
use uxbind_worker::{ClassRegistry, ObjectDefinition, Widget};

const IDS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A controlbar with `count` buttons in its start section, each receiving
/// `html:disabled` from the bar.
fn toolbar(registry: &ClassRegistry, count: usize) -> (Document, Widget) {
    let ids: String = IDS.chars().take(count).collect();
    let mut object = ObjectDefinition::new("TOOLS", controlbar::NAME)
        .with_property("controls-start", ids.as_str());
    for id in ids.chars() {
        object.set_property(format!("{id}_widget-class"), button::NAME);
        object.set_property(format!("{id}_delegated-properties"), "html:disabled");
    }
    let mut doc = Document::new();
    register_components(&mut doc);
    let descriptor = Rc::clone(registry.get(controlbar::NAME).unwrap());
    let skeleton = doc.create_element("div").unwrap();
    let root =
        Widget::process_layout(&descriptor, registry, &mut doc, skeleton, &mut object).unwrap();
    let mut widget = Widget::new(descriptor);
    widget.on_connect(&mut doc, root, registry).unwrap();
    widget.data_init(&mut doc).unwrap();
    (doc, widget)
}

fn bench_delegation(c: &mut Criterion) {
    let mut registry = ClassRegistry::new();
    register_all(&mut registry).unwrap();

    let mut group = c.benchmark_group("delegation");
    for count in [4, 16, 62] {
        group.bench_with_input(BenchmarkId::new("one_child", count), &count, |b, &count| {
            let (mut doc, mut widget) = toolbar(&registry, count);
            let update = PropertyUpdate::new().with("a:value", "Save");
            b.iter(|| widget.data_update(&mut doc, black_box(update.clone())).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("broadcast", count), &count, |b, &count| {
            let (mut doc, mut widget) = toolbar(&registry, count);
            let mut disabled = false;
            b.iter(|| {
                disabled = !disabled;
                let update = PropertyUpdate::new().with("html:disabled", disabled);
                widget.data_update(&mut doc, update).unwrap();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_delegation);
criterion_main!(benches);
