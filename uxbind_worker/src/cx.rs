// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contexts handed to workers.

use std::fmt;

use uxbind_dom::{Document, NodeId};
use uxbind_property::{
    ERROR, FORMAT_ERROR, LocalState, PropertyData, PropertyKey, PropertyUpdate, PropertyValue,
};

use crate::descriptor::WidgetDescriptor;
use crate::error::WidgetError;
use crate::widget::dispatch;
use crate::worker::WorkerId;

bitflags::bitflags! {
    /// Error indicators an instance currently shows.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ErrorState: u8 {
        /// The host reported a validation error (`error`).
        const VALIDATION = 0b0000_0001;
        /// The value cannot be represented by the control (`format-error`).
        const FORMAT     = 0b0000_0010;
    }
}

impl ErrorState {
    /// Reads the indicators from instance data.
    #[must_use]
    pub fn from_data(data: &PropertyData) -> Self {
        let mut state = Self::empty();
        state.set(Self::VALIDATION, data.flag(ERROR));
        state.set(Self::FORMAT, data.flag(FORMAT_ERROR));
        state
    }
}

/// Per-instance state owned by a widget and lent to its workers.
#[derive(Debug)]
pub(crate) struct InstanceState {
    pub(crate) root: Option<NodeId>,
    pub(crate) elements: Vec<Option<NodeId>>,
    pub(crate) data: PropertyData,
    pub(crate) locals: Vec<LocalState>,
}

impl InstanceState {
    pub(crate) fn new(workers: usize) -> Self {
        Self {
            root: None,
            elements: vec![None; workers],
            data: PropertyData::new(),
            locals: (0..workers).map(|_| LocalState::new()).collect(),
        }
    }
}

/// Mutable access to one instance, from the point of view of one worker.
pub struct WorkerCx<'a> {
    doc: &'a mut Document,
    descriptor: &'a WidgetDescriptor,
    state: &'a mut InstanceState,
    worker: WorkerId,
}

impl fmt::Debug for WorkerCx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerCx")
            .field("widget", &self.descriptor.name())
            .field("worker", &self.worker)
            .field("root", &self.state.root)
            .finish_non_exhaustive()
    }
}

impl<'a> WorkerCx<'a> {
    pub(crate) fn new(
        doc: &'a mut Document,
        descriptor: &'a WidgetDescriptor,
        state: &'a mut InstanceState,
        worker: WorkerId,
    ) -> Self {
        Self {
            doc,
            descriptor,
            state,
            worker,
        }
    }

    /// The document, for writing.
    #[inline]
    pub fn doc(&mut self) -> &mut Document {
        self.doc
    }

    /// The document, for reading.
    #[must_use]
    #[inline]
    pub fn document(&self) -> &Document {
        self.doc
    }

    /// The worker this context belongs to.
    #[must_use]
    #[inline]
    pub fn worker_id(&self) -> WorkerId {
        self.worker
    }

    /// The class of the instance.
    #[must_use]
    #[inline]
    pub fn descriptor(&self) -> &WidgetDescriptor {
        self.descriptor
    }

    /// Name of the widget class, for logging.
    #[must_use]
    #[inline]
    pub fn widget_name(&self) -> &str {
        self.descriptor.name()
    }

    /// The element this worker operates on.
    ///
    /// # Errors
    ///
    /// [`WidgetError::NotConnected`] before `on_connect`.
    pub fn element(&self) -> Result<NodeId, WidgetError> {
        self.state
            .elements
            .get(self.worker.idx())
            .copied()
            .flatten()
            .ok_or_else(|| self.not_connected())
    }

    /// The widget's root element.
    ///
    /// # Errors
    ///
    /// [`WidgetError::NotConnected`] before `on_connect`.
    pub fn root(&self) -> Result<NodeId, WidgetError> {
        self.state.root.ok_or_else(|| self.not_connected())
    }

    /// Current instance data.
    #[must_use]
    #[inline]
    pub fn data(&self) -> &PropertyData {
        &self.state.data
    }

    /// Instance data, for writing without refreshing anything.
    #[inline]
    pub fn data_mut(&mut self) -> &mut PropertyData {
        &mut self.state.data
    }

    /// This worker's scratch state for this instance.
    pub fn locals(&mut self) -> &mut LocalState {
        &mut self.state.locals[self.worker.idx()]
    }

    /// The registered default of `key`.
    #[must_use]
    pub fn default_value(&self, key: &PropertyKey) -> Option<&PropertyValue> {
        self.descriptor.default_value(key)
    }

    /// Writes the reset value of each of `names` into the data, without
    /// refreshing.
    pub fn restore_defaults(&mut self, names: &[PropertyKey]) {
        for name in names {
            match self.descriptor.reset_value(name) {
                Some(value) => {
                    self.state.data.set(name.clone(), value);
                }
                None => {
                    self.state.data.remove(name);
                }
            }
        }
    }

    /// Applies `update` to this instance like a host update would, without
    /// touching sub-widgets.
    ///
    /// # Errors
    ///
    /// The first failing refresh.
    pub fn set_properties(&mut self, update: PropertyUpdate) -> Result<(), WidgetError> {
        dispatch(self.doc, self.descriptor, self.state, update)
    }

    /// The instance's current error indicators.
    #[must_use]
    pub fn error_state(&self) -> ErrorState {
        ErrorState::from_data(&self.state.data)
    }

    /// A read-only view of the same instance.
    #[must_use]
    pub fn view(&self) -> InstanceView<'_> {
        InstanceView {
            doc: self.doc,
            descriptor: self.descriptor,
            state: self.state,
            worker: self.worker,
        }
    }

    fn not_connected(&self) -> WidgetError {
        WidgetError::NotConnected {
            widget: self.descriptor.name().into(),
        }
    }
}

/// Read-only access to one instance, from the point of view of one worker.
#[derive(Clone, Copy)]
pub struct InstanceView<'a> {
    doc: &'a Document,
    descriptor: &'a WidgetDescriptor,
    state: &'a InstanceState,
    worker: WorkerId,
}

impl fmt::Debug for InstanceView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceView")
            .field("widget", &self.descriptor.name())
            .field("worker", &self.worker)
            .field("root", &self.state.root)
            .finish_non_exhaustive()
    }
}

impl<'a> InstanceView<'a> {
    pub(crate) fn new(
        doc: &'a Document,
        descriptor: &'a WidgetDescriptor,
        state: &'a InstanceState,
        worker: WorkerId,
    ) -> Self {
        Self {
            doc,
            descriptor,
            state,
            worker,
        }
    }

    /// The document.
    #[must_use]
    #[inline]
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// The worker this view belongs to.
    #[must_use]
    #[inline]
    pub fn worker_id(&self) -> WorkerId {
        self.worker
    }

    /// Name of the widget class, for logging.
    #[must_use]
    #[inline]
    pub fn widget_name(&self) -> &'a str {
        self.descriptor.name()
    }

    /// The element this worker operates on, once connected.
    #[must_use]
    pub fn element(&self) -> Option<NodeId> {
        self.state.elements.get(self.worker.idx()).copied().flatten()
    }

    /// The widget's root element, once connected.
    #[must_use]
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.state.root
    }

    /// Current instance data.
    #[must_use]
    #[inline]
    pub fn data(&self) -> &'a PropertyData {
        &self.state.data
    }

    /// This worker's scratch state for this instance.
    #[must_use]
    pub fn locals(&self) -> &'a LocalState {
        &self.state.locals[self.worker.idx()]
    }

    /// The instance's current error indicators.
    #[must_use]
    pub fn error_state(&self) -> ErrorState {
        ErrorState::from_data(&self.state.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_state_follows_data() {
        let mut data = PropertyData::new();
        assert!(ErrorState::from_data(&data).is_empty());
        data.set(PropertyKey::uniface(ERROR), "T".into());
        assert_eq!(ErrorState::from_data(&data), ErrorState::VALIDATION);
        data.set(PropertyKey::uniface(FORMAT_ERROR), true.into());
        assert_eq!(
            ErrorState::from_data(&data),
            ErrorState::VALIDATION | ErrorState::FORMAT
        );
        data.set(PropertyKey::uniface(ERROR), false.into());
        assert_eq!(ErrorState::from_data(&data), ErrorState::FORMAT);
    }
}
