// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixtures shared by the widget tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::rc::Rc;

use uxbind_dom::{Document, DomEvent, NodeId, Selector};
use uxbind_property::{PropertyUpdate, PropertyValue};
use uxbind_widgets::{register_all, register_components};
use uxbind_worker::{ClassRegistry, ObjectDefinition, Widget};

/// A widget connected and initialized in its own document.
pub(crate) struct Mounted {
    pub(crate) doc: Document,
    pub(crate) widget: Widget,
    pub(crate) root: NodeId,
    pub(crate) registry: ClassRegistry,
}

pub(crate) fn registry() -> ClassRegistry {
    let mut registry = ClassRegistry::new();
    register_all(&mut registry).unwrap();
    registry
}

pub(crate) fn mount(class: &str) -> Mounted {
    mount_object(ObjectDefinition::new("OBJ", class))
}

/// Lays out, connects and initializes `object`, then drops the events
/// initialization queued.
pub(crate) fn mount_object(mut object: ObjectDefinition) -> Mounted {
    let registry = registry();
    let mut doc = Document::new();
    register_components(&mut doc);
    let descriptor = Rc::clone(registry.get(object.widget_class()).unwrap());
    let skeleton = doc.create_element("div").unwrap();
    let root =
        Widget::process_layout(&descriptor, &registry, &mut doc, skeleton, &mut object).unwrap();
    let body = doc.body();
    doc.append_child(body, root).unwrap();
    let mut widget = Widget::new(descriptor);
    widget.on_connect(&mut doc, root, &registry).unwrap();
    widget.data_init(&mut doc).unwrap();
    doc.take_events();
    Mounted {
        doc,
        widget,
        root,
        registry,
    }
}

impl Mounted {
    pub(crate) fn update(&mut self, update: PropertyUpdate) {
        self.widget.data_update(&mut self.doc, update).unwrap();
    }

    pub(crate) fn set(&mut self, key: &str, value: impl Into<PropertyValue>) {
        self.update(PropertyUpdate::new().with(key, value));
    }

    pub(crate) fn value(&self) -> PropertyValue {
        self.widget.value(&self.doc)
    }

    /// Clicks `node` like a user and delivers what follows to the widget.
    pub(crate) fn click(&mut self, node: NodeId) -> Vec<DomEvent> {
        self.doc.click(node).unwrap();
        self.pump()
    }

    /// Hands queued events to the widget until none are left, the way a
    /// host forwards the events of its updaters. Returns them all.
    pub(crate) fn pump(&mut self) -> Vec<DomEvent> {
        let mut delivered = Vec::new();
        loop {
            let events = self.doc.take_events();
            if events.is_empty() {
                return delivered;
            }
            for event in events {
                self.widget.handle_event(&mut self.doc, &event).unwrap();
                delivered.push(event);
            }
        }
    }

    pub(crate) fn find(&self, class: &str) -> NodeId {
        self.doc
            .query_selector(self.root, &Selector::class(class))
            .unwrap()
    }

    pub(crate) fn format_error(&self) -> bool {
        self.widget.data().flag("format-error")
    }
}
