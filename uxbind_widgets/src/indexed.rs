// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The value of controls that select an item of `valrep` by position.

use uxbind_dom::{Document, DomEvent, NodeId};
use uxbind_property::{FormatError, PropertyKey, PropertyUpdate, PropertyValue, VALREP, VALUE};
use uxbind_worker::{InstanceView, Registrar, Updater, WidgetError, Worker, WorkerCx};

use crate::control::{set_format_error, write_control};

/// The control property holding the selected position.
#[derive(Copy, Clone, Debug)]
pub(crate) enum IndexProperty {
    /// A string property, `""` while nothing is selected.
    Text(&'static str),
    /// A number property, `-1` while nothing is selected.
    Number(&'static str),
}

impl IndexProperty {
    fn name(self) -> &'static str {
        match self {
            Self::Text(name) | Self::Number(name) => name,
        }
    }

    fn encode(self, index: Option<usize>) -> PropertyValue {
        match (self, index) {
            (Self::Text(_), Some(index)) => index.to_string().into(),
            (Self::Text(_), None) => "".into(),
            (Self::Number(_), index) => {
                let index = index.and_then(|i| i32::try_from(i).ok()).unwrap_or(-1);
                index.into()
            }
        }
    }

    fn read(self, doc: &Document, element: NodeId) -> Option<usize> {
        doc.property(element, self.name())
            .and_then(PropertyValue::parse_integer)
            .and_then(|index| usize::try_from(index).ok())
    }
}

/// Owns `value` and keeps the control's position property on the matching
/// `valrep` item.
///
/// A non-empty value missing from `valrep` is a format error. User changes
/// arrive as `change` on the control and are written back as `value`.
#[derive(Debug)]
pub(crate) struct IndexedValue {
    index: IndexProperty,
}

impl IndexedValue {
    pub(crate) fn new(index: IndexProperty) -> Self {
        Self { index }
    }
}

impl Worker for IndexedValue {
    fn register(&self, reg: &mut Registrar<'_>) {
        reg.setter(VALUE);
        reg.getter(VALUE);
        reg.default_value(VALUE, "");
        reg.setter(PropertyKey::uniface(VALREP));
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let element = cx.element()?;
        let value = cx.data().text(VALUE);
        let index = cx.data().valrep(VALREP).position(&value);
        write_control(cx, element, &[(self.index.name(), self.index.encode(index))])?;
        let error = (index.is_none() && !value.is_empty()).then(FormatError::default);
        set_format_error(cx, error.as_ref())
    }

    fn value(&self, view: InstanceView<'_>) -> PropertyValue {
        let valrep = view.data().valrep(VALREP);
        view.element()
            .and_then(|element| self.index.read(view.document(), element))
            .and_then(|index| valrep.get(index))
            .map(|entry| PropertyValue::from(entry.value.as_str()))
            .or_else(|| view.data().value(VALUE).cloned())
            .unwrap_or_default()
    }

    fn value_updaters(&self, view: InstanceView<'_>) -> Vec<Updater> {
        view.element()
            .map(|element| Updater {
                element,
                event_name: "change".into(),
                handler: Some(view.worker_id()),
            })
            .into_iter()
            .collect()
    }

    fn handle_event(&self, cx: &mut WorkerCx<'_>, event: &DomEvent) -> Result<bool, WidgetError> {
        if event.name != "change" {
            return Ok(false);
        }
        let element = cx.element()?;
        let valrep = cx.data().valrep(VALREP);
        let Some(entry) = self.index.read(cx.document(), element).and_then(|i| valrep.get(i)) else {
            tracing::debug!(widget = %cx.widget_name(), "change without a selected item");
            return Ok(false);
        };
        let selected = entry.value.clone();
        cx.set_properties(PropertyUpdate::new().with(VALUE, selected))?;
        Ok(true)
    }
}
