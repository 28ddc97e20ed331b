// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use uxbind_dom::DomError;
use uxbind_property::{PropertyKey, UI_BLOCKED};

use crate::cx::WorkerCx;
use crate::error::WidgetError;
use crate::worker::{Registrar, Worker};

/// How a blocked widget refuses input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UiBlocking {
    /// Through the `disabled` property, restored from `html:disabled`.
    Disabled,
    /// Through the `readOnly` property, restored from `html:readonly`.
    Readonly,
}

impl UiBlocking {
    fn dom_property(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Readonly => "readOnly",
        }
    }

    fn host_property(self) -> &'static str {
        match self {
            Self::Disabled => "html:disabled",
            Self::Readonly => "html:readonly",
        }
    }
}

/// Blocks user input while the host processes a request.
///
/// Blocking adds `u-blocked`; unblocking restores whatever the host last
/// set for the blocking property. The worker owns that property too, so a
/// control that refuses the write while showing an error is handled in one
/// place.
#[derive(Debug)]
pub struct UiBlock {
    blocking: UiBlocking,
}

impl UiBlock {
    /// Creates the worker.
    #[must_use]
    pub fn new(blocking: UiBlocking) -> Self {
        Self { blocking }
    }
}

impl Worker for UiBlock {
    fn register(&self, reg: &mut Registrar<'_>) {
        let host = PropertyKey::parse(self.blocking.host_property());
        reg.setter(PropertyKey::uniface(UI_BLOCKED));
        reg.default_value(PropertyKey::uniface(UI_BLOCKED), false);
        reg.setter(&host);
        reg.default_value(host, false);
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let element = cx.element()?;
        let blocked = cx.data().flag(UI_BLOCKED);
        let on = blocked
            || cx
                .data()
                .get(&PropertyKey::parse(self.blocking.host_property()))
                .is_some_and(uxbind_property::to_boolean);
        cx.doc().toggle_class(element, "u-blocked", blocked)?;
        match cx.doc().set_property(element, self.blocking.dom_property(), on) {
            Ok(_) => Ok(()),
            // Some controls refuse the write while showing an error; the
            // error display owns the state then.
            Err(error @ DomError::Component { .. }) if !cx.error_state().is_empty() => {
                tracing::debug!(widget = %cx.widget_name(), %error, "blocking refused");
                Ok(())
            }
            Err(error) => Err(error.into()),
        }
    }
}
