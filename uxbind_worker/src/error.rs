// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine error type.

use thiserror::Error;
use uxbind_dom::DomError;
use uxbind_property::PropertyKey;

/// Errors raised while building widget classes or running widget instances.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// Two workers of one class both claim to provide the value of `key`.
    #[error("widget class `{widget}` registers more than one getter for `{key}`")]
    DuplicateGetter {
        /// The widget class being built.
        widget: String,
        /// The contested property.
        key: PropertyKey,
    },
    /// Two workers of one class map the same trigger.
    #[error("widget class `{widget}` maps trigger `{trigger}` more than once")]
    DuplicateTrigger {
        /// The widget class being built.
        widget: String,
        /// The contested trigger name.
        trigger: String,
    },
    /// Two workers of one class declare the same static sub-widget id.
    #[error("widget class `{widget}` declares sub-widget `{id}` more than once")]
    DuplicateSubWidget {
        /// The widget class being built.
        widget: String,
        /// The contested sub-widget id.
        id: String,
    },
    /// A widget class name is registered twice.
    #[error("widget class `{0}` is already registered")]
    DuplicateClass(String),
    /// A widget class name is not registered.
    #[error("unknown widget class `{name}`, known classes: {known:?}")]
    UnknownWidgetClass {
        /// The requested name.
        name: String,
        /// Every registered name, sorted.
        known: Vec<String>,
    },
    /// The operation needs elements, but `on_connect` has not run yet.
    #[error("widget `{widget}` is not connected")]
    NotConnected {
        /// The widget class of the instance.
        widget: String,
    },
    /// A worker's selector matched nothing below the widget root.
    #[error("widget `{widget}` has no element matching `{selector}`")]
    MissingElement {
        /// The widget class of the instance.
        widget: String,
        /// The selector that failed to match.
        selector: String,
    },
    /// The structure tree produced an unusable layout.
    #[error("widget class `{widget}` cannot be laid out: {reason}")]
    Layout {
        /// The widget class being laid out.
        widget: String,
        /// What went wrong.
        reason: &'static str,
    },
    /// A document operation failed.
    #[error(transparent)]
    Dom(#[from] DomError),
}
