// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget class registry.
//!
//! This module provides [`ClassRegistry`], the table a host assembles at
//! start-up to resolve widget class names from layouts and from dynamic
//! sub-widget definitions.

use std::rc::Rc;

use hashbrown::HashMap;

use crate::descriptor::WidgetDescriptor;
use crate::error::WidgetError;
use crate::widget::Widget;

/// Widget classes by name.
///
/// # Example
///
/// ```rust
/// use uxbind_worker::{ClassRegistry, WidgetDescriptorBuilder};
/// use uxbind_worker::workers::Element;
///
/// let mut registry = ClassRegistry::new();
/// let label = WidgetDescriptorBuilder::new("Demo.Label")
///     .structure(Element::new("span").into_worker())
///     .build()
///     .unwrap();
/// registry.register(label).unwrap();
///
/// assert!(registry.contains("Demo.Label"));
/// assert!(registry.register(
///     WidgetDescriptorBuilder::new("Demo.Label")
///         .structure(Element::new("span").into_worker())
///         .build()
///         .unwrap()
/// ).is_err());
///
/// let widget = registry.instantiate("Demo.Label").unwrap();
/// assert!(widget.root().is_none());
/// ```
#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: Vec<Rc<WidgetDescriptor>>,
    by_name: HashMap<String, usize>,
}

impl ClassRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a widget class.
    ///
    /// Classes embedding static sub-widgets must be registered after the
    /// classes they embed.
    ///
    /// # Errors
    ///
    /// [`WidgetError::DuplicateClass`] if the name is taken and
    /// [`WidgetError::UnknownWidgetClass`] if a static sub-widget class is
    /// not registered yet.
    pub fn register(
        &mut self,
        descriptor: WidgetDescriptor,
    ) -> Result<Rc<WidgetDescriptor>, WidgetError> {
        let name = descriptor.name().to_owned();
        if self.by_name.contains_key(&name) {
            tracing::error!(widget = %name, "widget class registered twice");
            return Err(WidgetError::DuplicateClass(name));
        }
        for (_, record) in descriptor.sub_widgets() {
            self.get(&record.class_name)?;
        }
        let descriptor = Rc::new(descriptor);
        self.by_name.insert(name, self.classes.len());
        self.classes.push(Rc::clone(&descriptor));
        Ok(descriptor)
    }

    /// Number of registered classes.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Looks up a class.
    ///
    /// # Errors
    ///
    /// [`WidgetError::UnknownWidgetClass`] listing the known names.
    pub fn get(&self, name: &str) -> Result<&Rc<WidgetDescriptor>, WidgetError> {
        match self.by_name.get(name) {
            Some(&index) => Ok(&self.classes[index]),
            None => Err(WidgetError::UnknownWidgetClass {
                name: name.into(),
                known: self.names(),
            }),
        }
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.by_name.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Creates an unconnected instance of class `name`.
    ///
    /// # Errors
    ///
    /// [`WidgetError::UnknownWidgetClass`] listing the known names.
    pub fn instantiate(&self, name: &str) -> Result<Widget, WidgetError> {
        self.get(name).map(|d| Widget::new(Rc::clone(d)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::WidgetDescriptorBuilder;
    use crate::workers::{Element, SlottedSubWidget};

    fn leaf(name: &str) -> WidgetDescriptor {
        WidgetDescriptorBuilder::new(name)
            .structure(Element::new("span").into_worker())
            .build()
            .unwrap()
    }

    #[test]
    fn unknown_class_lists_known_names() {
        let mut registry = ClassRegistry::new();
        registry.register(leaf("B")).unwrap();
        registry.register(leaf("A")).unwrap();
        let err = registry.get("C").unwrap_err();
        assert_eq!(
            err,
            WidgetError::UnknownWidgetClass {
                name: "C".into(),
                known: vec!["A".into(), "B".into()],
            }
        );
    }

    #[test]
    fn duplicate_class_fails() {
        let mut registry = ClassRegistry::new();
        registry.register(leaf("A")).unwrap();
        assert_eq!(
            registry.register(leaf("A")).unwrap_err(),
            WidgetError::DuplicateClass("A".into())
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn static_sub_widget_class_must_exist() {
        let parent = || {
            WidgetDescriptorBuilder::new("Parent")
                .structure(
                    Element::new("div")
                        .child(SlottedSubWidget::new("span", "btn", "Child"))
                        .into_worker(),
                )
                .build()
                .unwrap()
        };
        let mut registry = ClassRegistry::new();
        assert!(matches!(
            registry.register(parent()),
            Err(WidgetError::UnknownWidgetClass { .. })
        ));
        registry.register(leaf("Child")).unwrap();
        registry.register(parent()).unwrap();
        assert_eq!(registry.names(), ["Child", "Parent"]);
    }
}
