// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document arena.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use hashbrown::HashMap;
use uxbind_property::PropertyValue;

use crate::component::Component;
use crate::error::DomError;
use crate::event::DomEvent;
use crate::node::{Element, NodeId, SHADOW_ROOT_TAG};
use crate::selector::Selector;

/// An in-memory element tree.
///
/// Nodes live in an arena and are addressed by [`NodeId`]. Reads on an
/// unknown id return an empty answer (`None`, `""`, `false`); writes return
/// [`DomError::UnknownNode`].
///
/// Custom elements are modeled by registering a [`Component`] for a tag with
/// [`define_component`](Self::define_component). Events are not delivered
/// synchronously; [`dispatch_event`](Self::dispatch_event) queues them.
pub struct Document {
    nodes: Vec<Element>,
    body: NodeId,
    components: HashMap<String, Rc<dyn Component>>,
    events: Vec<DomEvent>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.components.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("components", &tags)
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding only an empty `body` element.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: alloc::vec![Element::new("body")],
            body: NodeId::new(0),
            components: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// The top-level element.
    #[must_use]
    #[inline]
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Number of nodes ever created, including detached ones.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; a document has at least its body.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.idx())
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Element, DomError> {
        self.nodes.get_mut(id.idx()).ok_or(DomError::UnknownNode(id))
    }

    fn check(&self, id: NodeId) -> Result<&Element, DomError> {
        self.node(id).ok_or(DomError::UnknownNode(id))
    }

    // --- components ---

    /// Registers custom element behavior for `tag`.
    ///
    /// Only elements created afterwards are constructed by the component;
    /// property hooks and activation apply to all elements with the tag.
    pub fn define_component(&mut self, tag: impl Into<String>, component: Rc<dyn Component>) {
        self.components.insert(tag.into(), component);
    }

    /// The component registered for `tag`, if any.
    #[must_use]
    pub fn component(&self, tag: &str) -> Option<Rc<dyn Component>> {
        self.components.get(tag).cloned()
    }

    fn component_of(&self, id: NodeId) -> Option<Rc<dyn Component>> {
        self.node(id).and_then(|el| self.component(&el.tag))
    }

    // --- tree ---

    /// Creates a detached element.
    ///
    /// # Errors
    ///
    /// Propagates errors from the tag's [`Component::construct`].
    pub fn create_element(&mut self, tag: &str) -> Result<NodeId, DomError> {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "documents never approach u32::MAX nodes"
        )]
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(Element::new(tag));
        if let Some(component) = self.component(tag) {
            component.construct(self, id)?;
        }
        Ok(id)
    }

    /// The element's tag name.
    #[must_use]
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|el| el.tag.as_str())
    }

    /// The parent of `node`. Shadow roots have no parent; see [`host`](Self::host).
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|el| el.parent)
    }

    /// Child elements in order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node)
            .map(|el| el.children.as_slice())
            .unwrap_or_default()
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == candidate {
                return true;
            }
            let Some(el) = self.node(node) else {
                return false;
            };
            match el.parent.or(el.host) {
                Some(next) => node = next,
                None => return false,
            }
        }
    }

    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.node(child).and_then(|el| el.parent) else {
            return;
        };
        if let Some(el) = self.nodes.get_mut(parent.idx()) {
            el.children.retain(|c| *c != child);
        }
        if let Some(el) = self.nodes.get_mut(child.idx()) {
            el.parent = None;
        }
    }

    /// Appends `child` to `parent`, moving it if it is attached elsewhere.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for foreign ids, [`DomError::Cycle`] if
    /// `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let len = self.children(parent).len();
        self.insert_child(parent, len, child)
    }

    /// Inserts `child` at `index` below `parent` (clamped to the child count).
    ///
    /// # Errors
    ///
    /// Same as [`append_child`](Self::append_child).
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) -> Result<(), DomError> {
        self.check(parent)?;
        self.check(child)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(DomError::Cycle { parent, child });
        }
        self.detach(child);
        let el = self.node_mut(parent)?;
        let index = index.min(el.children.len());
        el.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Detaches `child` from its parent. Returns `false` if it was not a child.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for foreign ids.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<bool, DomError> {
        self.check(parent)?;
        if self.check(child)?.parent != Some(parent) {
            return Ok(false);
        }
        self.detach(child);
        Ok(true)
    }

    // --- attributes ---

    /// Sets an attribute, replacing an existing value.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for foreign ids.
    pub fn set_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        let value = value.into();
        let el = self.node_mut(node)?;
        match el.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => el.attributes.push((name.into(), value)),
        }
        Ok(())
    }

    /// Removes an attribute. Returns `true` if it was present.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for foreign ids.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<bool, DomError> {
        let el = self.node_mut(node)?;
        let before = el.attributes.len();
        el.attributes.retain(|(n, _)| n != name);
        Ok(el.attributes.len() != before)
    }

    /// Reads an attribute.
    #[must_use]
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node).and_then(|el| el.attribute(name))
    }

    /// Returns `true` if the attribute is present, whatever its value.
    #[must_use]
    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Shorthand for the `id` attribute.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for foreign ids.
    pub fn set_id(&mut self, node: NodeId, id: impl Into<String>) -> Result<(), DomError> {
        self.set_attribute(node, "id", id)
    }

    /// The `id` attribute.
    #[must_use]
    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.attribute(node, "id")
    }

    /// Sets or clears the boolean `hidden` attribute.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for foreign ids.
    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) -> Result<(), DomError> {
        if hidden {
            self.set_attribute(node, "hidden", "")
        } else {
            self.remove_attribute(node, "hidden").map(drop)
        }
    }

    /// Returns `true` if the element carries the `hidden` attribute.
    #[must_use]
    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.has_attribute(node, "hidden")
    }

    // --- classes ---

    /// Adds a class. Returns `false` if it was already present.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for foreign ids.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<bool, DomError> {
        let el = self.node_mut(node)?;
        if el.has_class(class) {
            return Ok(false);
        }
        el.classes.push(class.into());
        Ok(true)
    }

    /// Removes a class. Returns `true` if it was present.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for foreign ids.
    pub fn remove_class(&mut self, node: NodeId, class: &str) -> Result<bool, DomError> {
        let el = self.node_mut(node)?;
        let before = el.classes.len();
        el.classes.retain(|c| c != class);
        Ok(el.classes.len() != before)
    }

    /// Adds or removes a class.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for foreign ids.
    pub fn toggle_class(&mut self, node: NodeId, class: &str, on: bool) -> Result<(), DomError> {
        if on {
            self.add_class(node, class)?;
        } else {
            self.remove_class(node, class)?;
        }
        Ok(())
    }

    /// Returns `true` if the element carries `class`.
    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).is_some_and(|el| el.has_class(class))
    }

    /// The class list in insertion order.
    #[must_use]
    pub fn classes(&self, node: NodeId) -> &[String] {
        self.node(node)
            .map(|el| el.classes.as_slice())
            .unwrap_or_default()
    }

    // --- inline styles ---

    /// Sets an inline style property.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for foreign ids.
    pub fn set_style(
        &mut self,
        node: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        let value = value.into();
        let el = self.node_mut(node)?;
        match el.styles.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => el.styles.push((name.into(), value)),
        }
        Ok(())
    }

    /// Removes an inline style property. Returns `true` if it was set.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for foreign ids.
    pub fn remove_style(&mut self, node: NodeId, name: &str) -> Result<bool, DomError> {
        let el = self.node_mut(node)?;
        let before = el.styles.len();
        el.styles.retain(|(n, _)| n != name);
        Ok(el.styles.len() != before)
    }

    /// Reads an inline style property.
    #[must_use]
    pub fn style(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node).and_then(|el| {
            el.styles
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str())
        })
    }

    // --- DOM properties ---

    /// Writes a DOM property.
    ///
    /// A registered component may veto the write and observes every change.
    /// Returns whether the stored value changed.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for foreign ids, or whatever the component
    /// hooks return.
    pub fn set_property(
        &mut self,
        node: NodeId,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<bool, DomError> {
        let value = value.into();
        self.check(node)?;
        let component = self.component_of(node);
        if let Some(component) = &component {
            component.will_set_property(self, node, name, &value)?;
        }
        let el = self.node_mut(node)?;
        let old = el.properties.insert(name.into(), value.clone());
        let old = old.unwrap_or_default();
        if old == value {
            return Ok(false);
        }
        if let Some(component) = &component {
            component.property_changed(self, node, name, &old)?;
        }
        Ok(true)
    }

    /// Reads a DOM property.
    #[must_use]
    pub fn property(&self, node: NodeId, name: &str) -> Option<&PropertyValue> {
        self.node(node).and_then(|el| el.properties.get(name))
    }

    /// Reads a DOM property as a boolean; missing or non-boolean reads `false`.
    #[must_use]
    pub fn property_flag(&self, node: NodeId, name: &str) -> bool {
        self.property(node, name)
            .and_then(PropertyValue::as_bool)
            .unwrap_or(false)
    }

    // --- text ---

    /// Replaces the element's content with text, detaching all children.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for foreign ids.
    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) -> Result<(), DomError> {
        let text = text.into();
        let children = core::mem::take(&mut self.node_mut(node)?.children);
        for child in children {
            if let Some(el) = self.nodes.get_mut(child.idx()) {
                el.parent = None;
            }
        }
        self.node_mut(node)?.text = text;
        Ok(())
    }

    /// The element's own text.
    #[must_use]
    pub fn text(&self, node: NodeId) -> &str {
        self.node(node).map_or("", |el| el.text.as_str())
    }

    /// Own text followed by the text content of all light-DOM children.
    #[must_use]
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        if let Some(el) = self.node(node) {
            out.push_str(&el.text);
            for child in &el.children {
                self.collect_text(*child, out);
            }
        }
    }

    // --- shadow DOM ---

    /// Attaches a shadow root to `host`, or returns the existing one.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for foreign ids.
    pub fn attach_shadow(&mut self, host: NodeId) -> Result<NodeId, DomError> {
        if let Some(root) = self.check(host)?.shadow_root {
            return Ok(root);
        }
        let root = self.create_element(SHADOW_ROOT_TAG)?;
        self.node_mut(root)?.host = Some(host);
        self.node_mut(host)?.shadow_root = Some(root);
        Ok(root)
    }

    /// The shadow root of `host`, if one is attached.
    #[must_use]
    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.node(host).and_then(|el| el.shadow_root)
    }

    /// The host of a shadow root.
    #[must_use]
    pub fn host(&self, shadow_root: NodeId) -> Option<NodeId> {
        self.node(shadow_root).and_then(|el| el.host)
    }

    // --- queries ---

    /// Returns `true` if `node` itself matches `selector`.
    #[must_use]
    pub fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        self.node(node).is_some_and(|el| selector.matches(el))
    }

    /// First light-DOM descendant of `root` (excluding `root`) matching
    /// `selector`, in document order.
    #[must_use]
    pub fn query_selector(&self, root: NodeId, selector: &Selector) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if self.matches(node, selector) {
                return Some(node);
            }
            stack.extend(self.children(node).iter().rev().copied());
        }
        None
    }

    /// All light-DOM descendants of `root` matching `selector`, in document order.
    #[must_use]
    pub fn query_selector_all(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if self.matches(node, selector) {
                found.push(node);
            }
            stack.extend(self.children(node).iter().rev().copied());
        }
        found
    }

    // --- events ---

    /// Queues an event.
    pub fn dispatch_event(&mut self, event: DomEvent) {
        self.events.push(event);
    }

    /// Events queued and not yet taken.
    #[must_use]
    pub fn pending_events(&self) -> &[DomEvent] {
        &self.events
    }

    /// Drains the whole queue.
    pub fn take_events(&mut self) -> Vec<DomEvent> {
        core::mem::take(&mut self.events)
    }

    /// Drains only `name` events targeted at `target`, keeping the rest queued.
    pub fn take_events_for(&mut self, target: NodeId, name: &str) -> Vec<DomEvent> {
        let (taken, kept): (Vec<_>, Vec<_>) = core::mem::take(&mut self.events)
            .into_iter()
            .partition(|e| e.is(target, name));
        self.events = kept;
        taken
    }

    /// Simulates a user click: runs the component's activation, or queues
    /// a plain `click` event for ordinary elements.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for foreign ids, or the component's error.
    pub fn click(&mut self, node: NodeId) -> Result<(), DomError> {
        self.check(node)?;
        match self.component_of(node) {
            Some(component) => component.activate(self, node),
            None => {
                self.dispatch_event(DomEvent::new(node, "click"));
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_moves_and_rejects_cycles() {
        let mut doc = Document::new();
        let a = doc.create_element("div").unwrap();
        let b = doc.create_element("div").unwrap();
        let body = doc.body();
        doc.append_child(body, a).unwrap();
        doc.append_child(a, b).unwrap();
        assert_eq!(
            doc.append_child(b, a),
            Err(DomError::Cycle {
                parent: b,
                child: a
            })
        );
        doc.append_child(body, b).unwrap();
        assert_eq!(doc.children(body), &[a, b]);
        assert!(doc.children(a).is_empty());
    }

    #[test]
    fn shadow_content_is_not_queried_from_light_dom() {
        let mut doc = Document::new();
        let host = doc.create_element("fluent-text-field").unwrap();
        let shadow = doc.attach_shadow(host).unwrap();
        assert_eq!(doc.attach_shadow(host).unwrap(), shadow);
        let inner = doc.create_element("span").unwrap();
        doc.append_child(shadow, inner).unwrap();
        let sel = Selector::tag("span");
        assert_eq!(doc.query_selector(host, &sel), None);
        assert_eq!(doc.query_selector(shadow, &sel), Some(inner));
        assert_eq!(doc.host(shadow), Some(host));
    }

    #[test]
    fn unknown_node_reads_are_empty() {
        let mut doc = Document::new();
        let foreign = NodeId::new(99);
        assert_eq!(doc.tag(foreign), None);
        assert_eq!(doc.text(foreign), "");
        assert!(!doc.has_class(foreign, "x"));
        assert_eq!(
            doc.add_class(foreign, "x"),
            Err(DomError::UnknownNode(foreign))
        );
    }
}
