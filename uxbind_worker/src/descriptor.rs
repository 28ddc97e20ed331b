// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable widget class descriptions.

use std::fmt;
use std::rc::Rc;

use hashbrown::HashMap;
use smallvec::SmallVec;
use uxbind_dom::Selector;
use uxbind_property::{Namespace, PropertyData, PropertyKey, PropertyValue};

use crate::error::WidgetError;
use crate::format::FormattedValue;
use crate::worker::{Registrar, SubWidgetRecord, Worker, WorkerId};

/// Renders a property set as text without an instance.
pub type ValueFormatter = fn(&PropertyData) -> FormattedValue;

/// Everything the engine knows about a widget class.
///
/// Built once by [`WidgetDescriptorBuilder`] from a structure tree of
/// workers and shared by all instances of the class. The registries map
/// property keys to the workers that render them:
///
/// - setters: key → workers refreshed when the key changes. `class:` and
///   `style:` keys fall back to the namespace wildcard.
/// - getters: key → the worker that reads it back from the DOM.
/// - defaults: the data an instance starts from and RESET returns to.
/// - triggers: host trigger name → worker that maps it.
pub struct WidgetDescriptor {
    name: String,
    workers: Vec<Rc<dyn Worker>>,
    parents: Vec<Option<WorkerId>>,
    selectors: Vec<Option<Selector>>,
    pub(crate) setters: HashMap<PropertyKey, SmallVec<[WorkerId; 2]>>,
    pub(crate) getters: HashMap<PropertyKey, WorkerId>,
    pub(crate) defaults: PropertyData,
    pub(crate) triggers: HashMap<String, WorkerId>,
    pub(crate) sub_widgets: Vec<(String, SubWidgetRecord)>,
    pub(crate) providers: Vec<WorkerId>,
    pub(crate) layout_properties: Vec<PropertyKey>,
    report_unsupported_properties: bool,
    report_unsupported_triggers: bool,
    formatter: ValueFormatter,
    formatted_properties: Vec<PropertyKey>,
}

impl fmt::Debug for WidgetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut setters: Vec<String> = self.setters.keys().map(ToString::to_string).collect();
        setters.sort_unstable();
        f.debug_struct("WidgetDescriptor")
            .field("name", &self.name)
            .field("workers", &self.workers.len())
            .field("setters", &setters)
            .field("defaults", &self.defaults.len())
            .field("sub_widgets", &self.sub_widgets)
            .finish_non_exhaustive()
    }
}

impl WidgetDescriptor {
    /// The class name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of workers in the structure tree.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    /// Always `false`; a descriptor has at least its root worker.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// The root of the structure tree.
    #[must_use]
    pub fn root_worker(&self) -> &Rc<dyn Worker> {
        &self.workers[0]
    }

    /// The worker with pre-order index `id`.
    #[must_use]
    pub fn worker(&self, id: WorkerId) -> Option<&Rc<dyn Worker>> {
        self.workers.get(id.idx())
    }

    /// Iterates the workers in pre-order.
    pub fn workers(&self) -> impl Iterator<Item = (WorkerId, &Rc<dyn Worker>)> + '_ {
        self.workers.iter().enumerate().map(|(i, w)| (worker_id(i), w))
    }

    /// The parent of `id` in the structure tree.
    #[must_use]
    pub fn parent(&self, id: WorkerId) -> Option<WorkerId> {
        self.parents.get(id.idx()).copied().flatten()
    }

    /// The selector locating the element of `id`, inherited from the
    /// closest ancestor that has one. `None` means the widget root.
    #[must_use]
    pub fn selector(&self, id: WorkerId) -> Option<&Selector> {
        self.selectors.get(id.idx()).and_then(Option::as_ref)
    }

    /// Workers refreshed when `key` changes.
    #[must_use]
    pub fn setters(&self, key: &PropertyKey) -> &[WorkerId] {
        if let Some(workers) = self.setters.get(key) {
            return workers;
        }
        match key.namespace() {
            ns @ (Namespace::Class | Namespace::Style) => self
                .setters
                .get(&PropertyKey::wildcard(ns))
                .map(|w| w.as_slice())
                .unwrap_or_default(),
            _ => &[],
        }
    }

    /// Returns `true` if some worker renders `key`.
    #[must_use]
    pub fn supports(&self, key: &PropertyKey) -> bool {
        !self.setters(key).is_empty()
    }

    /// The worker providing `key`, normally `value`.
    #[must_use]
    pub fn getter(&self, key: &PropertyKey) -> Option<WorkerId> {
        self.getters.get(key).copied()
    }

    /// All registered defaults.
    #[must_use]
    #[inline]
    pub fn defaults(&self) -> &PropertyData {
        &self.defaults
    }

    /// The registered default of `key`.
    #[must_use]
    pub fn default_value(&self, key: &PropertyKey) -> Option<&PropertyValue> {
        self.defaults.get(key)
    }

    /// What a RESET of `key` resolves to. `None` means the key is removed.
    ///
    /// Keys without a default revert to nothing, except `style:` keys,
    /// which revert to `unset`.
    #[must_use]
    pub fn reset_value(&self, key: &PropertyKey) -> Option<PropertyValue> {
        match self.default_value(key) {
            Some(value) => Some(value.clone()),
            None if key.namespace() == Namespace::Style => Some(PropertyValue::from("unset")),
            None => None,
        }
    }

    /// The worker mapping host trigger `name`.
    #[must_use]
    pub fn trigger(&self, name: &str) -> Option<WorkerId> {
        self.triggers.get(name).copied()
    }

    /// Static sub-widgets in declaration order.
    #[must_use]
    pub fn sub_widgets(&self) -> &[(String, SubWidgetRecord)] {
        &self.sub_widgets
    }

    /// Workers that create sub-widgets dynamically.
    #[must_use]
    pub fn providers(&self) -> &[WorkerId] {
        &self.providers
    }

    /// Returns `true` for properties only read while laying out.
    #[must_use]
    pub fn is_layout_property(&self, key: &PropertyKey) -> bool {
        self.layout_properties.contains(key)
    }

    /// Whether unknown property ids are logged.
    #[must_use]
    #[inline]
    pub fn reports_unsupported_properties(&self) -> bool {
        self.report_unsupported_properties
    }

    /// Whether unmapped trigger names are logged.
    #[must_use]
    #[inline]
    pub fn reports_unsupported_triggers(&self) -> bool {
        self.report_unsupported_triggers
    }

    /// Renders `properties` as text the way this class displays them.
    #[must_use]
    pub fn format_value(&self, properties: &PropertyData) -> FormattedValue {
        (self.formatter)(properties)
    }

    /// Properties that affect [`format_value`](Self::format_value).
    #[must_use]
    pub fn formatted_properties(&self) -> &[PropertyKey] {
        &self.formatted_properties
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "structure trees hold a handful of workers"
)]
fn worker_id(index: usize) -> WorkerId {
    WorkerId(index as u32)
}

/// Builds a [`WidgetDescriptor`].
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use uxbind_worker::WidgetDescriptorBuilder;
/// use uxbind_worker::workers::{Element, HtmlAttributeBoolean, StyleClass};
///
/// let descriptor = WidgetDescriptorBuilder::new("Demo.Toggle")
///     .structure(
///         Element::new("div")
///             .child(StyleClass::new(["u-toggle"]))
///             .child(HtmlAttributeBoolean::property("html:disabled", "disabled").default(false))
///             .into_worker(),
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(descriptor.name(), "Demo.Toggle");
/// assert!(descriptor.supports(&"html:disabled".into()));
/// assert!(descriptor.supports(&"class:anything".into()));
/// assert_eq!(
///     descriptor.default_value(&"class:u-toggle".into()),
///     Some(&true.into())
/// );
/// ```
pub struct WidgetDescriptorBuilder {
    name: String,
    root: Option<Rc<dyn Worker>>,
    report_unsupported_properties: bool,
    report_unsupported_triggers: bool,
    formatter: ValueFormatter,
    formatted_properties: Vec<PropertyKey>,
}

impl fmt::Debug for WidgetDescriptorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetDescriptorBuilder")
            .field("name", &self.name)
            .field("has_structure", &self.root.is_some())
            .finish_non_exhaustive()
    }
}

impl WidgetDescriptorBuilder {
    /// Starts a class named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: None,
            report_unsupported_properties: false,
            report_unsupported_triggers: false,
            formatter: FormattedValue::plain,
            formatted_properties: Vec::new(),
        }
    }

    /// Sets the structure tree.
    #[must_use]
    pub fn structure(mut self, root: Rc<dyn Worker>) -> Self {
        self.root = Some(root);
        self
    }

    /// Log property ids that no worker renders.
    #[must_use]
    pub fn report_unsupported_properties(mut self, report: bool) -> Self {
        self.report_unsupported_properties = report;
        self
    }

    /// Log trigger names that nothing maps.
    #[must_use]
    pub fn report_unsupported_triggers(mut self, report: bool) -> Self {
        self.report_unsupported_triggers = report;
        self
    }

    /// Sets the text rendering and the properties it reads.
    #[must_use]
    pub fn value_formatter<K: Into<PropertyKey>>(
        mut self,
        formatter: ValueFormatter,
        properties: impl IntoIterator<Item = K>,
    ) -> Self {
        self.formatter = formatter;
        self.formatted_properties = properties.into_iter().map(Into::into).collect();
        self
    }

    /// Numbers the workers and lets each one register.
    ///
    /// # Errors
    ///
    /// [`WidgetError::Layout`] without a structure tree, and the first
    /// registration conflict otherwise.
    pub fn build(self) -> Result<WidgetDescriptor, WidgetError> {
        let Some(root) = self.root else {
            tracing::error!(widget = %self.name, "descriptor has no structure");
            return Err(WidgetError::Layout {
                widget: self.name,
                reason: "no structure tree",
            });
        };
        let mut descriptor = WidgetDescriptor {
            name: self.name,
            workers: Vec::new(),
            parents: Vec::new(),
            selectors: Vec::new(),
            setters: HashMap::new(),
            getters: HashMap::new(),
            defaults: PropertyData::new(),
            triggers: HashMap::new(),
            sub_widgets: Vec::new(),
            providers: Vec::new(),
            layout_properties: Vec::new(),
            report_unsupported_properties: self.report_unsupported_properties,
            report_unsupported_triggers: self.report_unsupported_triggers,
            formatter: self.formatter,
            formatted_properties: self.formatted_properties,
        };
        number(&mut descriptor, root, None);

        let mut error = None;
        let workers = descriptor.workers.clone();
        for (index, worker) in workers.iter().enumerate() {
            let mut reg = Registrar::new(&mut descriptor, worker_id(index), &mut error);
            worker.register(&mut reg);
        }
        if let Some(error) = error {
            tracing::error!(widget = %descriptor.name, %error, "descriptor registration failed");
            return Err(error);
        }
        tracing::debug!(
            widget = %descriptor.name,
            workers = descriptor.workers.len(),
            setters = descriptor.setters.len(),
            "descriptor built"
        );
        Ok(descriptor)
    }
}

fn number(descriptor: &mut WidgetDescriptor, worker: Rc<dyn Worker>, parent: Option<WorkerId>) {
    let id = worker_id(descriptor.workers.len());
    let inherited = parent.and_then(|p| descriptor.selectors[p.idx()].clone());
    descriptor
        .selectors
        .push(worker.selector().cloned().or(inherited));
    descriptor.parents.push(parent);
    descriptor.workers.push(Rc::clone(&worker));
    for child in worker.children() {
        number(descriptor, Rc::clone(child), Some(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workers::{Element, HtmlAttribute, IgnoreProperty, StyleClass, Trigger};

    fn sample() -> WidgetDescriptor {
        WidgetDescriptorBuilder::new("Test.Sample")
            .structure(
                Element::new("div")
                    .child(StyleClass::new(["u-sample"]))
                    .child(
                        Element::new("span")
                            .class("u-label")
                            .child(HtmlAttribute::property("label-text", "innerText").default("")),
                    )
                    .child(IgnoreProperty::new("html:minlength"))
                    .child(Trigger::new("onchange", "change"))
                    .into_worker(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn workers_are_numbered_in_pre_order() {
        let d = sample();
        assert_eq!(d.len(), 6);
        assert_eq!(d.parent(WorkerId(0)), None);
        assert_eq!(d.parent(WorkerId(3)), Some(WorkerId(2)));
        assert_eq!(d.parent(WorkerId(4)), Some(WorkerId(0)));
    }

    #[test]
    fn selectors_are_inherited() {
        let d = sample();
        assert_eq!(d.selector(WorkerId(0)), None);
        assert_eq!(d.selector(WorkerId(1)), None);
        let label = Selector::class("u-label");
        assert_eq!(d.selector(WorkerId(2)), Some(&label));
        assert_eq!(d.selector(WorkerId(3)), Some(&label));
    }

    #[test]
    fn class_and_style_fall_back_to_wildcard() {
        let d = sample();
        assert_eq!(d.setters(&PropertyKey::class("anything")), [WorkerId(1)]);
        assert!(d.setters(&PropertyKey::style("color")).is_empty());
        assert_eq!(d.setters(&"label-text".into()), [WorkerId(3)]);
        assert!(!d.supports(&"nope".into()));
    }

    #[test]
    fn reset_value_rules() {
        let d = sample();
        assert_eq!(d.reset_value(&"label-text".into()), Some("".into()));
        assert_eq!(d.reset_value(&"style:color".into()), Some("unset".into()));
        assert_eq!(d.reset_value(&"html:title".into()), None);
    }

    #[test]
    fn duplicate_trigger_fails() {
        let err = WidgetDescriptorBuilder::new("Test.Dup")
            .structure(
                Element::new("div")
                    .child(Trigger::new("onchange", "change"))
                    .child(Trigger::new("onchange", "input"))
                    .into_worker(),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, WidgetError::DuplicateTrigger { trigger, .. } if trigger == "onchange"));
    }

    #[test]
    fn duplicate_getter_fails() {
        let err = WidgetDescriptorBuilder::new("Test.Dup")
            .structure(
                Element::new("div")
                    .child(HtmlAttribute::property("value", "value").value_event("change"))
                    .child(HtmlAttribute::property("value", "title"))
                    .into_worker(),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, WidgetError::DuplicateGetter { .. }));
    }

    #[test]
    fn missing_structure_fails() {
        let err = WidgetDescriptorBuilder::new("Test.Empty").build().unwrap_err();
        assert!(matches!(err, WidgetError::Layout { .. }));
    }
}
