// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget instances and their lifecycle.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uxbind_dom::{Document, DomEvent, NodeId, Selector};
use uxbind_property::{
    ERROR, ERROR_MESSAGE, Namespace, PropertyData, PropertyKey, PropertyNameSets, PropertyUpdate,
    PropertyValue, UI_BLOCKED, UpdateValue, VALUE,
};

use crate::cx::{InstanceState, InstanceView, WorkerCx};
use crate::descriptor::WidgetDescriptor;
use crate::error::WidgetError;
use crate::format::FormattedValue;
use crate::layout::{LayoutCx, ObjectDefinition};
use crate::registry::ClassRegistry;
use crate::worker::{SubWidgetPlacement, SubWidgetRecord, TriggerMapping, Updater, WorkerId};

/// The `id` of an aggregated sub-widget validation payload.
pub const VALIDATION_ERRORS_ID: &str = "UXWF_VALIDATION_ERRORS";

/// Per-child placement metadata, `<id>_<name>`; it configures layout and
/// is never dispatched as a property.
const PLACEMENT_METADATA: [&str; 5] = [
    "widget-class",
    "widget-triggers",
    "delegated-properties",
    "overflow-behavior",
    "overflow-index",
];

#[derive(Debug, Serialize, Deserialize)]
struct ValidationErrors {
    id: String,
    #[serde(rename = "validationMessages")]
    validation_messages: BTreeMap<String, String>,
}

struct SubWidgetSlot {
    id: String,
    record: SubWidgetRecord,
    widget: Widget,
}

impl SubWidgetSlot {
    /// Moves the entries addressed to this child out of `update` and
    /// copies the delegated ones.
    fn slice(&self, update: &mut PropertyUpdate) -> PropertyUpdate {
        let mut slice = update.extract_prefixed(&self.id);
        update.copy_into(&self.record.delegated, &mut slice);
        slice
    }
}

/// One live widget: a class, the element it is bound to, its data and its
/// sub-widgets.
///
/// The host drives the lifecycle:
///
/// 1. [`process_layout`](Self::process_layout) builds the DOM (per object).
/// 2. [`on_connect`](Self::on_connect) binds an instance to that DOM.
/// 3. [`data_init`](Self::data_init) applies the defaults.
/// 4. [`data_update`](Self::data_update) applies host updates.
/// 5. [`data_cleanup`](Self::data_cleanup) reverts what was touched, before
///    the instance is bound to other data and `data_init` runs again.
pub struct Widget {
    descriptor: Rc<WidgetDescriptor>,
    state: InstanceState,
    sub_widgets: Vec<SubWidgetSlot>,
    own_updaters: Vec<Updater>,
    updaters: Option<Vec<Updater>>,
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sub_widgets: Vec<&str> = self.sub_widgets.iter().map(|s| s.id.as_str()).collect();
        f.debug_struct("Widget")
            .field("class", &self.descriptor.name())
            .field("root", &self.state.root)
            .field("data", &self.state.data)
            .field("sub_widgets", &sub_widgets)
            .finish_non_exhaustive()
    }
}

impl Widget {
    /// Creates an unconnected instance of `descriptor`.
    #[must_use]
    pub fn new(descriptor: Rc<WidgetDescriptor>) -> Self {
        let state = InstanceState::new(descriptor.len());
        Self {
            descriptor,
            state,
            sub_widgets: Vec::new(),
            own_updaters: Vec::new(),
            updaters: None,
        }
    }

    /// Builds the DOM of `descriptor` for `object` and returns its root.
    ///
    /// `skeleton` is the host's placeholder element. Its id is copied to the
    /// new root, and each of its classes is recorded on the object
    /// definition as `class:<name> = true`.
    ///
    /// # Errors
    ///
    /// [`WidgetError::Layout`] if the structure does not produce exactly one
    /// root element, and any failure of a worker layout.
    pub fn process_layout(
        descriptor: &WidgetDescriptor,
        registry: &ClassRegistry,
        doc: &mut Document,
        skeleton: NodeId,
        object: &mut ObjectDefinition,
    ) -> Result<NodeId, WidgetError> {
        let nodes = {
            let mut cx = LayoutCx::new(doc, registry, object, descriptor.name());
            descriptor.root_worker().layout(&mut cx)?
        };
        let [root] = nodes[..] else {
            tracing::error!(widget = %descriptor.name(), elements = nodes.len(), "root layout");
            return Err(WidgetError::Layout {
                widget: descriptor.name().into(),
                reason: "the root worker must create exactly one element",
            });
        };
        if let Some(id) = doc.id(skeleton).map(str::to_owned) {
            doc.set_id(root, id)?;
        }
        for class in doc.classes(skeleton).to_vec() {
            object.set_property(PropertyKey::class(class), true);
        }
        tracing::debug!(widget = %descriptor.name(), element = ?root, "process_layout");
        Ok(root)
    }

    /// The widget class.
    #[must_use]
    #[inline]
    pub fn descriptor(&self) -> &Rc<WidgetDescriptor> {
        &self.descriptor
    }

    /// The root element, once connected.
    #[must_use]
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.state.root
    }

    /// The element of worker `id`, once connected.
    #[must_use]
    pub fn element(&self, id: WorkerId) -> Option<NodeId> {
        self.state.elements.get(id.idx()).copied().flatten()
    }

    /// Current instance data.
    #[must_use]
    #[inline]
    pub fn data(&self) -> &PropertyData {
        &self.state.data
    }

    /// The connected sub-widget `id`.
    #[must_use]
    pub fn sub_widget(&self, id: &str) -> Option<&Self> {
        self.sub_widgets
            .iter()
            .find(|slot| slot.id == id)
            .map(|slot| &slot.widget)
    }

    /// Ids of the connected sub-widgets, in connect order.
    pub fn sub_widget_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.sub_widgets.iter().map(|slot| slot.id.as_str())
    }

    /// Binds this instance to `root`, connects its sub-widgets and returns
    /// the events the host must subscribe to.
    ///
    /// Element references are resolved once. The result is cached; a second
    /// call on the same root returns the cached updaters.
    ///
    /// # Errors
    ///
    /// [`WidgetError::MissingElement`] when a worker's element is not found,
    /// [`WidgetError::UnknownWidgetClass`] for sub-widgets, and failures of
    /// connect patches.
    pub fn on_connect(
        &mut self,
        doc: &mut Document,
        root: NodeId,
        registry: &ClassRegistry,
    ) -> Result<Vec<Updater>, WidgetError> {
        if self.state.root == Some(root)
            && let Some(updaters) = &self.updaters
        {
            return Ok(updaters.clone());
        }
        let descriptor = Rc::clone(&self.descriptor);
        tracing::debug!(widget = %descriptor.name(), element = ?root, "on_connect");
        self.state.root = Some(root);

        for (id, _) in descriptor.workers() {
            let element = match descriptor.selector(id) {
                None => root,
                Some(selector) => self.find(doc, root, selector)?,
            };
            self.state.elements[id.idx()] = Some(element);
        }

        let mut placements = Vec::new();
        for (id, record) in descriptor.sub_widgets() {
            let selector = Selector::class(record.style_class.as_str());
            placements.push(SubWidgetPlacement {
                id: id.clone(),
                placeholder: self.find(doc, root, &selector)?,
                record: record.clone(),
            });
        }
        for &provider in descriptor.providers() {
            if let Some(worker) = descriptor.worker(provider) {
                let view = InstanceView::new(doc, &descriptor, &self.state, provider);
                placements.extend(worker.sub_widgets(view));
            }
        }

        let mut updaters = Vec::new();
        self.sub_widgets.clear();
        for placement in placements {
            let mut widget = Self::new(Rc::clone(registry.get(&placement.record.class_name)?));
            updaters.extend(widget.on_connect(doc, placement.placeholder, registry)?);
            self.sub_widgets.push(SubWidgetSlot {
                id: placement.id,
                record: placement.record,
                widget,
            });
        }

        for (id, worker) in descriptor.workers() {
            let mut cx = WorkerCx::new(doc, &descriptor, &mut self.state, id);
            worker.connect(&mut cx)?;
        }

        self.own_updaters = match descriptor.getter(&PropertyKey::uniface(VALUE)) {
            Some(id) => descriptor
                .worker(id)
                .map(|w| w.value_updaters(InstanceView::new(doc, &descriptor, &self.state, id)))
                .unwrap_or_default(),
            None => Vec::new(),
        };
        updaters.extend(self.own_updaters.iter().cloned());
        self.updaters = Some(updaters.clone());
        Ok(updaters)
    }

    /// The updaters returned by [`on_connect`](Self::on_connect).
    #[must_use]
    pub fn value_updaters(&self) -> &[Updater] {
        self.updaters.as_deref().unwrap_or_default()
    }

    /// Resets the data to the class defaults and renders them.
    ///
    /// Sub-widgets are initialized first and then receive the defaults
    /// addressed to them.
    ///
    /// # Errors
    ///
    /// The first failing refresh.
    pub fn data_init(&mut self, doc: &mut Document) -> Result<(), WidgetError> {
        tracing::debug!(widget = %self.descriptor.name(), element = ?self.state.root, "data_init");
        self.require_connected()?;
        self.state.data.clear();
        for locals in &mut self.state.locals {
            locals.clear();
        }
        let mut defaults = PropertyUpdate::from_data(self.descriptor.defaults());
        for slot in &mut self.sub_widgets {
            slot.widget.data_init(doc)?;
            let slice = slot.slice(&mut defaults);
            if !slice.is_empty() {
                slot.widget.data_update(doc, slice)?;
            }
        }
        dispatch(doc, &self.descriptor, &mut self.state, defaults)
    }

    /// Applies a host update.
    ///
    /// Entries addressed to a sub-widget (`<id>:<key>`) and the delegated
    /// properties go to that sub-widget; the rest is written into the data
    /// and each affected worker refreshes once.
    ///
    /// # Errors
    ///
    /// The first failing refresh. Entries written before the failure stay.
    pub fn data_update(
        &mut self,
        doc: &mut Document,
        mut update: PropertyUpdate,
    ) -> Result<(), WidgetError> {
        tracing::debug!(
            widget = %self.descriptor.name(),
            element = ?self.state.root,
            properties = update.len(),
            "data_update"
        );
        self.require_connected()?;
        for slot in &mut self.sub_widgets {
            let slice = slot.slice(&mut update);
            if !slice.is_empty() {
                slot.widget.data_update(doc, slice)?;
            }
        }
        update.retain(|key, _| !self.is_layout_metadata(key));
        dispatch(doc, &self.descriptor, &mut self.state, update)
    }

    /// Reverts every property in `names` that was touched since `data_init`.
    ///
    /// `class:` names without a default are removed from the root element.
    /// Every other name goes to the worker that owns it; a worker owning
    /// several of the names is reset once with all of them.
    ///
    /// # Errors
    ///
    /// The first failing reset.
    pub fn data_cleanup(
        &mut self,
        doc: &mut Document,
        mut names: PropertyNameSets,
    ) -> Result<(), WidgetError> {
        tracing::debug!(
            widget = %self.descriptor.name(),
            element = ?self.state.root,
            properties = names.len(),
            "data_cleanup"
        );
        let root = self.require_connected()?;
        for slot in &mut self.sub_widgets {
            let slice = names.extract_prefixed(&slot.id);
            if !slice.is_empty() {
                slot.widget.data_cleanup(doc, slice)?;
            }
        }

        let descriptor = Rc::clone(&self.descriptor);
        let mut plan: Vec<(WorkerId, Vec<PropertyKey>)> = Vec::new();
        for key in names.iter() {
            if key.namespace() == Namespace::Class && descriptor.default_value(key).is_none() {
                doc.remove_class(root, key.name())?;
                self.state.data.remove(key);
                continue;
            }
            if self.is_layout_metadata(key) {
                continue;
            }
            for &id in descriptor.setters(key) {
                match plan.iter_mut().find(|(worker, _)| *worker == id) {
                    Some((_, keys)) => keys.push(key.clone()),
                    None => plan.push((id, vec![key.clone()])),
                }
            }
        }
        for (id, keys) in plan {
            if let Some(worker) = descriptor.worker(id) {
                let mut cx = WorkerCx::new(doc, &descriptor, &mut self.state, id);
                worker.reset(&mut cx, &keys)?;
            }
        }
        Ok(())
    }

    /// The widget value, or `""` for classes without a value getter.
    #[must_use]
    pub fn value(&self, doc: &Document) -> PropertyValue {
        match self.descriptor.getter(&PropertyKey::uniface(VALUE)) {
            Some(id) => self.descriptor.worker(id).map_or_else(PropertyValue::default, |w| {
                w.value(InstanceView::new(doc, &self.descriptor, &self.state, id))
            }),
            None => PropertyValue::from(""),
        }
    }

    /// The current data rendered as text by the class formatter.
    #[must_use]
    pub fn value_formatted(&self) -> FormattedValue {
        self.descriptor.format_value(&self.state.data)
    }

    /// Hands an event the host received on one of the updaters to the
    /// worker that consumes it.
    ///
    /// Returns `true` if some worker handled it.
    ///
    /// # Errors
    ///
    /// Whatever the handling worker returns.
    pub fn handle_event(&mut self, doc: &mut Document, event: &DomEvent) -> Result<bool, WidgetError> {
        let descriptor = Rc::clone(&self.descriptor);
        let handlers: SmallVec<[WorkerId; 2]> = self
            .own_updaters
            .iter()
            .filter(|u| u.element == event.target && u.event_name == event.name)
            .filter_map(|u| u.handler)
            .collect();
        for id in handlers {
            if let Some(worker) = descriptor.worker(id) {
                let mut cx = WorkerCx::new(doc, &descriptor, &mut self.state, id);
                if worker.handle_event(&mut cx, event)? {
                    return Ok(true);
                }
            }
        }
        for slot in &mut self.sub_widgets {
            if slot.widget.handle_event(doc, event)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Resolves a host trigger name.
    ///
    /// The class's own triggers come first. `<id>_<trigger>` then addresses
    /// `<trigger>` on sub-widget `<id>`, if the sub-widget exposes it.
    #[must_use]
    pub fn map_trigger(&self, doc: &Document, name: &str) -> Option<TriggerMapping> {
        let own = self.descriptor.trigger(name).and_then(|id| {
            let worker = self.descriptor.worker(id)?;
            worker.trigger_mapping(InstanceView::new(doc, &self.descriptor, &self.state, id))
        });
        if own.is_some() {
            return own;
        }
        for slot in &self.sub_widgets {
            let Some(child_trigger) = name
                .strip_prefix(slot.id.as_str())
                .and_then(|rest| rest.strip_prefix('_'))
            else {
                continue;
            };
            let triggers = &slot.record.triggers;
            if triggers.is_empty() || triggers.iter().any(|t| t == child_trigger) {
                if let Some(mapping) = slot.widget.map_trigger(doc, child_trigger) {
                    return Some(mapping);
                }
            }
        }
        if self.descriptor.reports_unsupported_triggers() {
            tracing::warn!(
                widget = %self.descriptor.name(),
                element = ?self.state.root,
                trigger = name,
                "no trigger mapping found; ignored"
            );
        }
        None
    }

    /// Validates the widget value.
    ///
    /// The class's own checks run first. Otherwise the messages of all
    /// failing sub-widgets are combined into one `UXWF_VALIDATION_ERRORS`
    /// JSON payload.
    #[must_use]
    pub fn validate(&self, doc: &Document) -> Option<String> {
        for (id, worker) in self.descriptor.workers() {
            let view = InstanceView::new(doc, &self.descriptor, &self.state, id);
            if let Some(message) = worker.validate(view) {
                return Some(message);
            }
        }
        let validation_messages: BTreeMap<String, String> = self
            .sub_widgets
            .iter()
            .filter_map(|slot| slot.widget.validate(doc).map(|m| (slot.id.clone(), m)))
            .collect();
        if validation_messages.is_empty() {
            return None;
        }
        serde_json::to_string(&ValidationErrors {
            id: VALIDATION_ERRORS_ID.into(),
            validation_messages,
        })
        .ok()
    }

    /// Shows a host validation error.
    ///
    /// On a widget with sub-widgets, a `UXWF_VALIDATION_ERRORS` payload is
    /// routed to the sub-widgets it names; any other message is shown on the
    /// widget itself.
    ///
    /// # Errors
    ///
    /// The first failing refresh.
    pub fn show_error(&mut self, doc: &mut Document, message: &str) -> Result<(), WidgetError> {
        tracing::debug!(widget = %self.descriptor.name(), element = ?self.state.root, "show_error");
        if self.sub_widgets.is_empty() {
            return self.set_error(doc, message);
        }
        for slot in &mut self.sub_widgets {
            slot.widget.hide_error(doc)?;
        }
        match serde_json::from_str::<ValidationErrors>(message) {
            Ok(errors) if errors.id == VALIDATION_ERRORS_ID => {
                for (id, child_message) in errors.validation_messages {
                    match self.sub_widgets.iter_mut().find(|slot| slot.id == id) {
                        Some(slot) => slot.widget.show_error(doc, &child_message)?,
                        None => tracing::warn!(
                            widget = %self.descriptor.name(),
                            element = ?self.state.root,
                            sub_widget = %id,
                            "validation message for unknown sub-widget; ignored"
                        ),
                    }
                }
                Ok(())
            }
            _ => self.set_error(doc, message),
        }
    }

    /// Clears the host validation error here and on all sub-widgets.
    ///
    /// # Errors
    ///
    /// The first failing refresh.
    pub fn hide_error(&mut self, doc: &mut Document) -> Result<(), WidgetError> {
        tracing::debug!(widget = %self.descriptor.name(), element = ?self.state.root, "hide_error");
        for slot in &mut self.sub_widgets {
            slot.widget.hide_error(doc)?;
        }
        self.set_error(doc, "")
    }

    /// Blocks user interaction while the host is busy.
    ///
    /// # Errors
    ///
    /// The first failing refresh.
    pub fn block_ui(&mut self, doc: &mut Document) -> Result<(), WidgetError> {
        tracing::debug!(widget = %self.descriptor.name(), element = ?self.state.root, "block_ui");
        self.set_blocked(doc, true)
    }

    /// Ends [`block_ui`](Self::block_ui).
    ///
    /// # Errors
    ///
    /// The first failing refresh.
    pub fn unblock_ui(&mut self, doc: &mut Document) -> Result<(), WidgetError> {
        tracing::debug!(widget = %self.descriptor.name(), element = ?self.state.root, "unblock_ui");
        self.set_blocked(doc, false)
    }

    fn set_blocked(&mut self, doc: &mut Document, blocked: bool) -> Result<(), WidgetError> {
        for slot in &mut self.sub_widgets {
            slot.widget.set_blocked(doc, blocked)?;
        }
        let key = PropertyKey::uniface(UI_BLOCKED);
        if self.descriptor.supports(&key) {
            let update = PropertyUpdate::new().with(key, blocked);
            dispatch(doc, &self.descriptor, &mut self.state, update)?;
        }
        Ok(())
    }

    fn set_error(&mut self, doc: &mut Document, message: &str) -> Result<(), WidgetError> {
        let update = PropertyUpdate::new()
            .with(ERROR, !message.is_empty())
            .with(ERROR_MESSAGE, message);
        dispatch(doc, &self.descriptor, &mut self.state, update)
    }

    fn find(&self, doc: &Document, root: NodeId, selector: &Selector) -> Result<NodeId, WidgetError> {
        if doc.matches(root, selector) {
            return Ok(root);
        }
        doc.query_selector(root, selector).ok_or_else(|| {
            tracing::error!(
                widget = %self.descriptor.name(),
                element = ?root,
                %selector,
                "element not found"
            );
            WidgetError::MissingElement {
                widget: self.descriptor.name().into(),
                selector: selector.to_string(),
            }
        })
    }

    fn require_connected(&self) -> Result<NodeId, WidgetError> {
        self.state.root.ok_or_else(|| WidgetError::NotConnected {
            widget: self.descriptor.name().into(),
        })
    }

    /// Layout-only properties: the lists of dynamic providers and the
    /// `<id>_<metadata>` entries describing each sub-widget.
    fn is_layout_metadata(&self, key: &PropertyKey) -> bool {
        if self.descriptor.is_layout_property(key) {
            return true;
        }
        key.namespace() == Namespace::Uniface
            && self.sub_widgets.iter().any(|slot| {
                key.name()
                    .strip_prefix(slot.id.as_str())
                    .and_then(|rest| rest.strip_prefix('_'))
                    .is_some_and(|meta| PLACEMENT_METADATA.contains(&meta))
            })
    }
}

/// Writes `update` into `state` and refreshes each affected worker once.
///
/// All entries are written before the first refresh, so a worker reading
/// several properties sees the whole update. Workers refresh in the order
/// their first property appears in the update.
pub(crate) fn dispatch(
    doc: &mut Document,
    descriptor: &WidgetDescriptor,
    state: &mut InstanceState,
    update: PropertyUpdate,
) -> Result<(), WidgetError> {
    let mut pending: SmallVec<[WorkerId; 8]> = SmallVec::new();
    for (key, change) in update {
        let setters = descriptor.setters(&key);
        if setters.is_empty() && descriptor.reports_unsupported_properties() {
            tracing::warn!(
                widget = %descriptor.name(),
                element = ?state.root,
                property = %key,
                "widget does not support property; ignored"
            );
        }
        for &id in setters {
            if !pending.contains(&id) {
                pending.push(id);
            }
        }
        let value = match change {
            UpdateValue::Explicit(value) => Some(value),
            UpdateValue::Reset => descriptor.reset_value(&key),
        };
        match value {
            Some(value) => {
                state.data.set(key, value);
            }
            None => {
                state.data.remove(&key);
            }
        }
    }
    for id in pending {
        let Some(worker) = descriptor.worker(id) else {
            continue;
        };
        tracing::trace!(
            widget = %descriptor.name(),
            element = ?state.root,
            worker = id.index(),
            "refresh"
        );
        let mut cx = WorkerCx::new(doc, descriptor, state, id);
        worker.refresh(&mut cx)?;
    }
    Ok(())
}
