// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use uxbind_property::{Namespace, PropertyKey, to_boolean};

use crate::cx::WorkerCx;
use crate::error::WidgetError;
use crate::worker::{Registrar, Worker};

/// Owns the `class:` namespace.
///
/// The fixed classes are registered as `class:<name> = true` defaults, so
/// they are applied by `data_init` and come back after a RESET. Every
/// `class:` key in the data is added or removed by permissive truthiness.
#[derive(Debug)]
pub struct StyleClass {
    classes: Vec<String>,
}

impl StyleClass {
    /// Creates the worker with the widget's fixed classes.
    #[must_use]
    pub fn new<S: Into<String>>(classes: impl IntoIterator<Item = S>) -> Self {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }
}

impl Worker for StyleClass {
    fn register(&self, reg: &mut Registrar<'_>) {
        reg.setter(PropertyKey::wildcard(Namespace::Class));
        for class in &self.classes {
            reg.default_value(PropertyKey::class(class.as_str()), true);
        }
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let element = cx.element()?;
        let classes: Vec<(String, bool)> = cx
            .data()
            .namespace(Namespace::Class)
            .map(|(key, value)| (key.name().to_owned(), to_boolean(value)))
            .collect();
        for (class, on) in classes {
            cx.doc().toggle_class(element, &class, on)?;
        }
        Ok(())
    }
}

/// Owns the `style:` namespace: every `style:` key becomes an inline style.
///
/// `unset` and the empty string remove the style.
#[derive(Debug, Default)]
pub struct StyleProperty;

impl StyleProperty {
    /// Creates the worker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Worker for StyleProperty {
    fn register(&self, reg: &mut Registrar<'_>) {
        reg.setter(PropertyKey::wildcard(Namespace::Style));
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let element = cx.element()?;
        let styles: Vec<(String, String)> = cx
            .data()
            .namespace(Namespace::Style)
            .map(|(key, value)| (key.name().to_owned(), value.to_text()))
            .collect();
        for (name, value) in styles {
            if value.is_empty() || value == "unset" {
                cx.doc().remove_style(element, &name)?;
            } else {
                cx.doc().set_style(element, &name, value)?;
            }
        }
        Ok(())
    }
}
