// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Worker`] trait and the records workers hand to the engine.

use std::fmt;
use std::rc::Rc;

use uxbind_dom::{DomEvent, NodeId, Selector};
use uxbind_property::{PropertyKey, PropertyValue};

use crate::cx::{InstanceView, WorkerCx};
use crate::descriptor::WidgetDescriptor;
use crate::error::WidgetError;
use crate::layout::LayoutCx;

/// Position of a worker in its class's structure tree (pre-order).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkerId(pub(crate) u32);

impl WorkerId {
    #[inline]
    pub(crate) fn idx(self) -> usize {
        self.0 as usize
    }

    /// Returns the pre-order index.
    #[must_use]
    #[inline]
    pub fn index(self) -> usize {
        self.idx()
    }
}

/// A unit of widget behavior.
///
/// A widget class is a tree of workers. Each worker claims the properties it
/// renders at registration time and is then refreshed whenever one of them
/// changes. Workers hold no per-instance state of their own; everything an
/// instance needs lives in its data bag and in the worker's [`LocalState`]
/// slot reachable through [`WorkerCx::locals`].
///
/// Only [`register`](Self::register) and [`refresh`](Self::refresh) are
/// required.
///
/// [`LocalState`]: uxbind_property::LocalState
pub trait Worker: fmt::Debug {
    /// Declares setters, getters, defaults, triggers and sub-widgets.
    fn register(&self, reg: &mut Registrar<'_>);

    /// Selector that finds this worker's element below the widget root.
    ///
    /// Workers without a selector operate on their parent's element.
    fn selector(&self) -> Option<&Selector> {
        None
    }

    /// Nested workers, in document order.
    fn children(&self) -> &[Rc<dyn Worker>] {
        &[]
    }

    /// Creates the elements this worker contributes to the widget layout.
    ///
    /// # Errors
    ///
    /// Document and registry failures.
    fn layout(&self, cx: &mut LayoutCx<'_>) -> Result<Vec<NodeId>, WidgetError> {
        let _ = cx;
        Ok(Vec::new())
    }

    /// Applies structural patches once the instance is bound to its element.
    ///
    /// Must be safe to run more than once on the same element.
    ///
    /// # Errors
    ///
    /// Document failures.
    fn connect(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let _ = cx;
        Ok(())
    }

    /// Renders the worker's properties from the instance data.
    ///
    /// # Errors
    ///
    /// Document failures that the worker cannot absorb.
    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError>;

    /// Reverts `names` to their registered defaults and refreshes once.
    ///
    /// `names` holds every property of this worker that was touched since
    /// the last `data_init`, so workers owning several related properties
    /// see them together.
    ///
    /// # Errors
    ///
    /// Whatever [`refresh`](Self::refresh) returns.
    fn reset(&self, cx: &mut WorkerCx<'_>, names: &[PropertyKey]) -> Result<(), WidgetError> {
        cx.restore_defaults(names);
        self.refresh(cx)
    }

    /// Reads the widget value; only called on the `value` getter.
    fn value(&self, view: InstanceView<'_>) -> PropertyValue {
        let _ = view;
        PropertyValue::Null
    }

    /// Events the host must subscribe to.
    fn value_updaters(&self, view: InstanceView<'_>) -> Vec<Updater> {
        let _ = view;
        Vec::new()
    }

    /// Consumes an event announced through an [`Updater`] naming this worker.
    ///
    /// Returns `true` when the event was handled.
    ///
    /// # Errors
    ///
    /// Document failures.
    fn handle_event(&self, cx: &mut WorkerCx<'_>, event: &DomEvent) -> Result<bool, WidgetError> {
        let _ = (cx, event);
        Ok(false)
    }

    /// Maps the trigger this worker registered to a DOM event.
    fn trigger_mapping(&self, view: InstanceView<'_>) -> Option<TriggerMapping> {
        let _ = view;
        None
    }

    /// Sub-widgets created at layout time by a dynamic provider.
    fn sub_widgets(&self, view: InstanceView<'_>) -> Vec<SubWidgetPlacement> {
        let _ = view;
        Vec::new()
    }

    /// Returns a validation message, or `None` when the value is acceptable.
    fn validate(&self, view: InstanceView<'_>) -> Option<String> {
        let _ = view;
        None
    }
}

/// Registration handle passed to [`Worker::register`].
pub struct Registrar<'a> {
    descriptor: &'a mut WidgetDescriptor,
    worker: WorkerId,
    error: &'a mut Option<WidgetError>,
}

impl fmt::Debug for Registrar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registrar")
            .field("widget", &self.descriptor.name())
            .field("worker", &self.worker)
            .finish_non_exhaustive()
    }
}

impl<'a> Registrar<'a> {
    pub(crate) fn new(
        descriptor: &'a mut WidgetDescriptor,
        worker: WorkerId,
        error: &'a mut Option<WidgetError>,
    ) -> Self {
        Self {
            descriptor,
            worker,
            error,
        }
    }

    /// The worker being registered.
    #[must_use]
    #[inline]
    pub fn worker_id(&self) -> WorkerId {
        self.worker
    }

    /// Name of the widget class being built.
    #[must_use]
    pub fn widget_name(&self) -> &str {
        self.descriptor.name()
    }

    /// Refresh this worker whenever `key` changes.
    ///
    /// Use [`PropertyKey::wildcard`] to receive a whole `class:` or `style:`
    /// namespace.
    pub fn setter(&mut self, key: impl Into<PropertyKey>) {
        let workers = self.descriptor.setters.entry(key.into()).or_default();
        if !workers.contains(&self.worker) {
            workers.push(self.worker);
        }
    }

    /// This worker provides the widget's `key`, normally `value`.
    pub fn getter(&mut self, key: impl Into<PropertyKey>) {
        let key = key.into();
        match self.descriptor.getters.get(&key) {
            Some(existing) if *existing != self.worker => {
                self.fail(WidgetError::DuplicateGetter {
                    widget: self.descriptor.name().into(),
                    key,
                });
            }
            _ => {
                self.descriptor.getters.insert(key, self.worker);
            }
        }
    }

    /// Registers the value `key` takes after `data_init` and after a RESET.
    pub fn default_value(&mut self, key: impl Into<PropertyKey>, value: impl Into<PropertyValue>) {
        self.descriptor.defaults.set(key.into(), value.into());
    }

    /// This worker maps the host trigger `name`.
    pub fn trigger(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.descriptor.triggers.contains_key(&name) {
            self.fail(WidgetError::DuplicateTrigger {
                widget: self.descriptor.name().into(),
                trigger: name,
            });
        } else {
            self.descriptor.triggers.insert(name, self.worker);
        }
    }

    /// Declares a static sub-widget `id`.
    pub fn sub_widget(&mut self, id: impl Into<String>, record: SubWidgetRecord) {
        let id = id.into();
        if self.descriptor.sub_widgets.iter().any(|(known, _)| *known == id) {
            self.fail(WidgetError::DuplicateSubWidget {
                widget: self.descriptor.name().into(),
                id,
            });
        } else {
            self.descriptor.sub_widgets.push((id, record));
        }
    }

    /// This worker creates sub-widgets dynamically from `layout_property`.
    ///
    /// The layout property only matters while laying out, so updates for it
    /// are not dispatched.
    pub fn sub_widget_provider(&mut self, layout_property: impl Into<PropertyKey>) {
        self.descriptor.providers.push(self.worker);
        self.descriptor.layout_properties.push(layout_property.into());
    }

    fn fail(&mut self, error: WidgetError) {
        if self.error.is_none() {
            *self.error = Some(error);
        }
    }
}

/// How a parent widget embeds a child widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubWidgetRecord {
    /// Registered name of the child's widget class.
    pub class_name: String,
    /// Style class of the placeholder, `u-sw-<id>`.
    pub style_class: String,
    /// Child triggers the parent exposes; empty exposes all.
    pub triggers: Vec<String>,
    /// Parent properties copied, unprefixed, to the child.
    pub delegated: Vec<PropertyKey>,
}

impl SubWidgetRecord {
    /// Creates a record with the conventional `u-sw-<id>` style class.
    #[must_use]
    pub fn new(id: &str, class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            style_class: sub_widget_style_class(id),
            triggers: Vec::new(),
            delegated: Vec::new(),
        }
    }
}

/// A sub-widget found at connect time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubWidgetPlacement {
    /// The sub-widget id, which is also its property prefix.
    pub id: String,
    /// The element the child widget connects to.
    pub placeholder: NodeId,
    /// How the child is embedded.
    pub record: SubWidgetRecord,
}

/// Returns the style class that marks the placeholder of sub-widget `id`.
#[must_use]
pub fn sub_widget_style_class(id: &str) -> String {
    format!("u-sw-{id}")
}

/// An event the host subscribes to on behalf of a widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Updater {
    /// The element to listen on.
    pub element: NodeId,
    /// The event type.
    pub event_name: String,
    /// The worker that consumes the event through
    /// [`Widget::handle_event`](crate::Widget::handle_event). `None` means
    /// the host only needs to read the value again.
    pub handler: Option<WorkerId>,
}

/// A host trigger resolved to a DOM event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggerMapping {
    /// The element that fires the event.
    pub element: NodeId,
    /// The event type.
    pub event_name: String,
    /// Whether the host validates before firing the trigger.
    pub validate: bool,
}
