// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Connect-time patches of the controls' shadow DOM.

use uxbind_dom::Selector;
use uxbind_worker::{Registrar, WidgetError, Worker, WorkerCx};

/// Gives the control's shadow root a place for the error indicator:
/// `<span part="error" class="error"><slot name="error"></slot></span>`.
///
/// Connecting twice adds it once.
#[derive(Debug)]
pub(crate) struct ErrorSlot;

impl Worker for ErrorSlot {
    fn register(&self, _reg: &mut Registrar<'_>) {}

    fn connect(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let element = cx.element()?;
        let doc = cx.doc();
        let shadow = doc.attach_shadow(element)?;
        if doc
            .query_selector(shadow, &Selector::attribute("part", Some("error")))
            .is_some()
        {
            return Ok(());
        }
        let span = doc.create_element("span")?;
        doc.set_attribute(span, "part", "error")?;
        doc.add_class(span, "error")?;
        let slot = doc.create_element("slot")?;
        doc.set_attribute(slot, "name", "error")?;
        doc.append_child(span, slot)?;
        doc.append_child(shadow, span)?;
        Ok(())
    }

    fn refresh(&self, _cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        Ok(())
    }
}

/// Exposes a named shadow slot as a CSS part.
#[derive(Debug)]
pub(crate) struct SlotPart {
    slot: &'static str,
    part: &'static str,
}

impl SlotPart {
    pub(crate) fn new(slot: &'static str, part: &'static str) -> Self {
        Self { slot, part }
    }
}

impl Worker for SlotPart {
    fn register(&self, _reg: &mut Registrar<'_>) {}

    fn connect(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let element = cx.element()?;
        let doc = cx.doc();
        let Some(shadow) = doc.shadow_root(element) else {
            tracing::debug!(element = ?element, slot = self.slot, "no shadow root to patch");
            return Ok(());
        };
        if let Some(slot) = doc.query_selector(shadow, &Selector::attribute("name", Some(self.slot))) {
            doc.set_attribute(slot, "part", self.part)?;
        }
        Ok(())
    }

    fn refresh(&self, _cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        Ok(())
    }
}

/// Puts a `label` part with the `label` and `error` slots first in the
/// control's shadow root.
///
/// Connecting twice adds it once.
#[derive(Debug)]
pub(crate) struct LabelSlot;

impl Worker for LabelSlot {
    fn register(&self, _reg: &mut Registrar<'_>) {}

    fn connect(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let element = cx.element()?;
        let doc = cx.doc();
        let shadow = doc.attach_shadow(element)?;
        if doc.query_selector(shadow, &Selector::class("label")).is_some() {
            return Ok(());
        }
        let label = doc.create_element("label")?;
        doc.add_class(label, "label")?;
        doc.set_attribute(label, "part", "label")?;
        for name in ["label", "error"] {
            let slot = doc.create_element("slot")?;
            doc.set_attribute(slot, "name", name)?;
            doc.append_child(label, slot)?;
        }
        doc.insert_child(shadow, 0, label)?;
        Ok(())
    }

    fn refresh(&self, _cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        Ok(())
    }
}
