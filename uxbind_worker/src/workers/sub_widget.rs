// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use uxbind_dom::{NodeId, Selector};
use uxbind_property::{GOLD_SEPARATOR, PropertyKey, PropertyValue, to_boolean};

use crate::cx::{InstanceView, WorkerCx};
use crate::error::WidgetError;
use crate::layout::LayoutCx;
use crate::worker::{
    Registrar, SubWidgetPlacement, SubWidgetRecord, Worker, sub_widget_style_class,
};

/// A child widget declared with the class.
///
/// The parent addresses the child's properties as `<id>:<key>`. With a
/// visibility property, the uniface property `<id>` shows and hides the
/// child and moves it in and out of its slot.
#[derive(Debug)]
pub struct SlottedSubWidget {
    tag: String,
    id: String,
    record: SubWidgetRecord,
    selector: Selector,
    slot: Option<String>,
    defaults: Vec<(PropertyKey, PropertyValue)>,
    visible: Option<bool>,
}

impl SlottedSubWidget {
    /// Embeds widget class `class_name` as sub-widget `id` in a `<tag>`
    /// placeholder.
    #[must_use]
    pub fn new(tag: impl Into<String>, id: impl Into<String>, class_name: impl Into<String>) -> Self {
        let id = id.into();
        let record = SubWidgetRecord::new(&id, class_name);
        Self {
            tag: tag.into(),
            selector: Selector::class(record.style_class.as_str()),
            id,
            record,
            slot: None,
            defaults: Vec::new(),
            visible: None,
        }
    }

    /// The slot the child occupies while shown.
    #[must_use]
    pub fn slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = Some(slot.into());
        self
    }

    /// Defaults for the child's own keys; they are registered prefixed.
    #[must_use]
    pub fn defaults<K, V>(mut self, defaults: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<PropertyKey>,
        V: Into<PropertyValue>,
    {
        self.defaults
            .extend(defaults.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Adds the visibility property `<id>`, defaulting to `visible`.
    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    /// Child triggers the parent exposes as `<id>_<trigger>`.
    #[must_use]
    pub fn triggers<S: Into<String>>(mut self, triggers: impl IntoIterator<Item = S>) -> Self {
        self.record.triggers = triggers.into_iter().map(Into::into).collect();
        self
    }

    /// Parent properties the child receives as its own.
    #[must_use]
    pub fn delegated<K: Into<PropertyKey>>(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.record.delegated = keys.into_iter().map(Into::into).collect();
        self
    }

    fn visibility_key(&self) -> PropertyKey {
        PropertyKey::uniface(self.id.as_str())
    }
}

impl Worker for SlottedSubWidget {
    fn register(&self, reg: &mut Registrar<'_>) {
        reg.sub_widget(self.id.as_str(), self.record.clone());
        for (key, value) in &self.defaults {
            reg.default_value(key.with_sub_widget_prefix(&self.id), value.clone());
        }
        if let Some(visible) = self.visible {
            reg.setter(self.visibility_key());
            reg.default_value(self.visibility_key(), visible);
        }
    }

    fn selector(&self) -> Option<&Selector> {
        Some(&self.selector)
    }

    fn layout(&self, cx: &mut LayoutCx<'_>) -> Result<Vec<NodeId>, WidgetError> {
        let element = cx.layout_sub_widget(&self.record.class_name, &self.tag)?;
        let doc = cx.doc();
        doc.add_class(element, &self.record.style_class)?;
        match (&self.slot, self.visible) {
            (_, Some(_)) => doc.set_hidden(element, true)?,
            (Some(slot), None) => doc.set_attribute(element, "slot", slot.as_str())?,
            (None, None) => {}
        }
        Ok(vec![element])
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        if self.visible.is_none() {
            return Ok(());
        }
        let element = cx.element()?;
        let root = cx.root()?;
        let shown = cx.data().get(&self.visibility_key()).is_some_and(to_boolean);
        let slot = match (&self.slot, shown) {
            (Some(slot), true) => slot.clone(),
            _ => String::new(),
        };
        let doc = cx.doc();
        doc.set_hidden(element, !shown)?;
        doc.set_attribute(element, "slot", slot)?;
        doc.toggle_class(root, &format!("{}-shown", self.record.style_class), shown)?;
        Ok(())
    }
}

/// How a layout property lists sub-widget ids.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum IdSplit {
    /// A GOLD-separated list.
    #[default]
    Gold,
    /// One character per id.
    PerChar,
}

impl IdSplit {
    fn ids(self, list: &str) -> Vec<String> {
        match self {
            Self::Gold => list
                .split(GOLD_SEPARATOR)
                .filter(|id| !id.is_empty())
                .map(str::to_owned)
                .collect(),
            Self::PerChar => list.chars().map(String::from).collect(),
        }
    }

    fn join(self, ids: &[String]) -> String {
        match self {
            Self::Gold => ids.join(&GOLD_SEPARATOR.to_string()),
            Self::PerChar => ids.concat(),
        }
    }
}

/// Per-child metadata of the object is `<id>_<name>` in both split modes.
fn metadata_key(id: &str, name: &str) -> String {
    format!("{id}_{name}")
}

/// Placeholder attributes copied from per-child metadata.
const COPIED_METADATA: [&str; 4] = [
    "delegated-properties",
    "widget-triggers",
    "overflow-behavior",
    "overflow-index",
];

/// Child widgets listed by a layout-time property of the object.
///
/// Each listed id needs a widget class in the `<id>_widget-class`
/// property of the object. The placeholders become children of this worker's element
/// and describe themselves through attributes, so that connecting only
/// needs the DOM. Ids that cannot be created are dropped from the layout
/// property.
#[derive(Debug)]
pub struct SubWidgetsByProperty {
    tag: String,
    layout_property: PropertyKey,
    class: Option<String>,
    split: IdSplit,
}

impl SubWidgetsByProperty {
    /// Creates `<tag>` placeholders for the ids in `layout_property`.
    #[must_use]
    pub fn new(tag: impl Into<String>, layout_property: impl Into<PropertyKey>) -> Self {
        Self {
            tag: tag.into(),
            layout_property: layout_property.into(),
            class: None,
            split: IdSplit::Gold,
        }
    }

    /// Adds a style class to every placeholder.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Selects how ids are listed.
    #[must_use]
    pub fn split(mut self, split: IdSplit) -> Self {
        self.split = split;
        self
    }

    fn create(&self, cx: &mut LayoutCx<'_>, id: &str) -> Result<Option<NodeId>, WidgetError> {
        let class_key = metadata_key(id, "widget-class");
        let Some(class_name) = cx.object().text(&class_key) else {
            tracing::warn!(
                widget = %cx.widget_name(),
                object = cx.object().name(),
                property = %class_key,
                "sub-widget skipped: no widget class"
            );
            return Ok(None);
        };
        if !cx.registry().contains(&class_name) {
            tracing::warn!(
                widget = %cx.widget_name(),
                object = cx.object().name(),
                class = %class_name,
                "sub-widget skipped: widget class is not registered"
            );
            return Ok(None);
        }
        let element = cx.layout_sub_widget(&class_name, &self.tag)?;
        let metadata: Vec<(&str, String)> = COPIED_METADATA
            .iter()
            .filter_map(|name| {
                cx.object()
                    .text(&metadata_key(id, name))
                    .map(|value| (*name, value))
            })
            .collect();
        let doc = cx.doc();
        doc.add_class(element, &sub_widget_style_class(id))?;
        if let Some(class) = &self.class {
            doc.add_class(element, class)?;
        }
        doc.set_attribute(element, "sub-widget-id", id)?;
        doc.set_attribute(element, "widget-class", class_name)?;
        for (name, value) in metadata {
            doc.set_attribute(element, name, value)?;
        }
        Ok(Some(element))
    }
}

fn split_gold(text: Option<&str>) -> Vec<String> {
    text.map(|t| {
        t.split(GOLD_SEPARATOR)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    })
    .unwrap_or_default()
}

impl Worker for SubWidgetsByProperty {
    fn register(&self, reg: &mut Registrar<'_>) {
        reg.sub_widget_provider(&self.layout_property);
    }

    fn layout(&self, cx: &mut LayoutCx<'_>) -> Result<Vec<NodeId>, WidgetError> {
        let list_key = self.layout_property.to_string();
        let Some(list) = cx.object().text(&list_key) else {
            tracing::warn!(
                widget = %cx.widget_name(),
                object = cx.object().name(),
                property = %list_key,
                "no sub-widgets listed"
            );
            return Ok(Vec::new());
        };
        let mut elements = Vec::new();
        let mut created = Vec::new();
        for id in self.split.ids(&list) {
            if let Some(element) = self.create(cx, &id)? {
                elements.push(element);
                created.push(id);
            }
        }
        let written = self.split.join(&created);
        cx.object_mut()
            .set_property(self.layout_property.clone(), written);
        Ok(elements)
    }

    fn refresh(&self, _cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        Ok(())
    }

    fn sub_widgets(&self, view: InstanceView<'_>) -> Vec<SubWidgetPlacement> {
        let Some(section) = view.element() else {
            return Vec::new();
        };
        let doc = view.document();
        doc.children(section)
            .iter()
            .filter_map(|&placeholder| {
                let id = doc.attribute(placeholder, "sub-widget-id")?;
                let class_name = doc.attribute(placeholder, "widget-class")?;
                let mut record = SubWidgetRecord::new(id, class_name);
                record.triggers = split_gold(doc.attribute(placeholder, "widget-triggers"));
                record.delegated = split_gold(doc.attribute(placeholder, "delegated-properties"))
                    .into_iter()
                    .map(PropertyKey::from)
                    .collect();
                Some(SubWidgetPlacement {
                    id: id.to_owned(),
                    placeholder,
                    record,
                })
            })
            .collect()
    }
}
