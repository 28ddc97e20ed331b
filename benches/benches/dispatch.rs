// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for applying updates to a single widget.

use std::rc::Rc;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

use uxbind_dom::{Document, NodeId};
use uxbind_property::{PropertyNameSets, PropertyUpdate};
use uxbind_widgets::{checkbox, register_all, register_components, text_field};
use uxbind_worker::{ClassRegistry, ObjectDefinition, Widget};

fn mount(registry: &ClassRegistry, class: &str) -> (Document, Widget, NodeId) {
    let mut doc = Document::new();
    register_components(&mut doc);
    let descriptor = Rc::clone(registry.get(class).unwrap());
    let skeleton = doc.create_element("div").unwrap();
    let mut object = ObjectDefinition::new("OBJ", class);
    let root =
        Widget::process_layout(&descriptor, registry, &mut doc, skeleton, &mut object).unwrap();
    let mut widget = Widget::new(descriptor);
    widget.on_connect(&mut doc, root, registry).unwrap();
    widget.data_init(&mut doc).unwrap();
    doc.take_events();
    (doc, widget, root)
}

fn field_update(n: usize) -> PropertyUpdate {
    PropertyUpdate::new()
        .with("value", format!("value {n}"))
        .with("label-text", "Amount")
        .with("prefix-text", "EUR")
        .with("suffix-icon", if n % 2 == 0 { "Money" } else { "" })
        .with("html:title", "The amount")
        .with("class:highlight", n % 2 == 0)
}

fn bench_dispatch(c: &mut Criterion) {
    let mut registry = ClassRegistry::new();
    register_all(&mut registry).unwrap();

    let mut group = c.benchmark_group("dispatch/update");

    group.bench_function("checkbox/toggle", |b| {
        let (mut doc, mut widget, _) = mount(&registry, checkbox::NAME);
        let on = PropertyUpdate::new().with("value", "1");
        let off = PropertyUpdate::new().with("value", "0");
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let update = if flip { on.clone() } else { off.clone() };
            widget.data_update(&mut doc, update).unwrap();
            black_box(doc.take_events());
        });
    });

    group.bench_function("checkbox/format_error", |b| {
        let (mut doc, mut widget, _) = mount(&registry, checkbox::NAME);
        let bogus = PropertyUpdate::new().with("value", "bogus");
        b.iter(|| widget.data_update(&mut doc, black_box(bogus.clone())).unwrap());
    });

    group.bench_function("text_field/six_keys", |b| {
        let (mut doc, mut widget, _) = mount(&registry, text_field::NAME);
        let mut n = 0;
        b.iter(|| {
            n += 1;
            widget.data_update(&mut doc, field_update(n)).unwrap();
        });
    });

    group.finish();

    let mut group = c.benchmark_group("dispatch/lifecycle");

    group.bench_function("text_field/mount", |b| {
        b.iter(|| black_box(mount(&registry, text_field::NAME)));
    });

    group.bench_function("text_field/reset", |b| {
        let (mut doc, mut widget, _) = mount(&registry, text_field::NAME);
        let update = field_update(0);
        let mut reset = PropertyUpdate::new();
        for key in update.keys() {
            reset.reset(key);
        }
        b.iter(|| {
            widget.data_update(&mut doc, update.clone()).unwrap();
            widget.data_update(&mut doc, reset.clone()).unwrap();
        });
    });

    group.bench_function("text_field/cleanup", |b| {
        b.iter_batched(
            || {
                let (mut doc, mut widget, _) = mount(&registry, text_field::NAME);
                let update = field_update(0);
                let mut names = PropertyNameSets::new();
                names.record(&update);
                widget.data_update(&mut doc, update).unwrap();
                (doc, widget, names)
            },
            |(mut doc, mut widget, names)| {
                widget.data_cleanup(&mut doc, names).unwrap();
                black_box(widget);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
