// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use uxbind_property::{PropertyKey, PropertyValue};

use crate::cx::{InstanceView, WorkerCx};
use crate::error::WidgetError;
use crate::worker::{Registrar, TriggerMapping, Worker};

/// Claims a property without rendering it.
///
/// Keeps the key out of the unsupported-property warnings, and lets it
/// carry a default.
#[derive(Debug)]
pub struct IgnoreProperty {
    key: PropertyKey,
    default: Option<PropertyValue>,
}

impl IgnoreProperty {
    /// Claims `key`.
    #[must_use]
    pub fn new(key: impl Into<PropertyKey>) -> Self {
        Self {
            key: key.into(),
            default: None,
        }
    }

    /// Registers a default.
    #[must_use]
    pub fn default(mut self, value: impl Into<PropertyValue>) -> Self {
        self.default = Some(value.into());
        self
    }
}

impl Worker for IgnoreProperty {
    fn register(&self, reg: &mut Registrar<'_>) {
        reg.setter(&self.key);
        if let Some(value) = &self.default {
            reg.default_value(&self.key, value.clone());
        }
    }

    fn refresh(&self, _cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        Ok(())
    }
}

/// Maps host trigger `name` to `event` on the worker's element.
#[derive(Debug)]
pub struct Trigger {
    name: String,
    event: String,
    validate: bool,
}

impl Trigger {
    /// Maps `name` to `event`, without validation.
    #[must_use]
    pub fn new(name: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            event: event.into(),
            validate: false,
        }
    }

    /// Whether the host validates before firing.
    #[must_use]
    pub fn validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}

impl Worker for Trigger {
    fn register(&self, reg: &mut Registrar<'_>) {
        reg.trigger(self.name.as_str());
    }

    fn refresh(&self, _cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        Ok(())
    }

    fn trigger_mapping(&self, view: InstanceView<'_>) -> Option<TriggerMapping> {
        Some(TriggerMapping {
            element: view.element()?,
            event_name: self.event.clone(),
            validate: self.validate,
        })
    }
}
