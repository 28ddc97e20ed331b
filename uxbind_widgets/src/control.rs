// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plumbing shared by the value workers.

use uxbind_dom::NodeId;
use uxbind_property::{
    ERROR, ERROR_MESSAGE, FORMAT_ERROR, FORMAT_ERROR_MESSAGE, FormatError, PropertyUpdate,
    PropertyValue,
};
use uxbind_worker::{WidgetError, WorkerCx};

/// Writes DOM properties of the control and drops the `change` events the
/// control raises for them.
///
/// Draining the control's queued `change` events is the only guard needed:
/// events are delivered after the update returns, so the ones raised here
/// never reach the widget and a programmatic update is not mistaken for a
/// user edit.
pub(crate) fn write_control(
    cx: &mut WorkerCx<'_>,
    element: NodeId,
    properties: &[(&str, PropertyValue)],
) -> Result<(), WidgetError> {
    let written = properties.iter().try_for_each(|(name, value)| {
        cx.doc()
            .set_property(element, name, value.clone())
            .map(drop)
    });
    let dropped = cx.doc().take_events_for(element, "change");
    if !dropped.is_empty() {
        tracing::trace!(widget = %cx.widget_name(), events = dropped.len(), "own change events dropped");
    }
    written.map_err(Into::into)
}

/// Raises or clears the format error of the instance.
///
/// The properties are only written when they differ from the data, so
/// repeating the same verdict does not refresh the error display again.
pub(crate) fn set_format_error(
    cx: &mut WorkerCx<'_>,
    error: Option<&FormatError>,
) -> Result<(), WidgetError> {
    let active = error.is_some();
    let message = error.map(FormatError::message).unwrap_or_default();
    if cx.data().flag(FORMAT_ERROR) == active && cx.data().text(FORMAT_ERROR_MESSAGE) == message {
        return Ok(());
    }
    if let Some(error) = error {
        tracing::debug!(widget = %cx.widget_name(), %error, "value cannot be shown");
    }
    cx.set_properties(
        PropertyUpdate::new()
            .with(FORMAT_ERROR, active)
            .with(FORMAT_ERROR_MESSAGE, message),
    )
}

/// Clears both the validation and the format error, as a user edit does.
pub(crate) fn clear_errors(cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
    cx.set_properties(
        PropertyUpdate::new()
            .with(ERROR, false)
            .with(ERROR_MESSAGE, "")
            .with(FORMAT_ERROR, false)
            .with(FORMAT_ERROR_MESSAGE, ""),
    )
}
