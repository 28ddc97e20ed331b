// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only text rendering of a widget value.

use serde::Serialize;
use uxbind_property::{ERROR, ERROR_MESSAGE, PropertyData, VALUE};

/// A widget value rendered as text, for hosts that display values without
/// instantiating the widget (grid cells, menu items).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedValue {
    /// Main text.
    pub primary_plain_text: String,
    /// Secondary text, such as a value shown next to its representation.
    pub secondary_plain_text: String,
    /// Text shown before the value.
    pub prefix_text: String,
    /// Icon name shown before the value.
    pub prefix_icon: String,
    /// Text shown after the value.
    pub suffix_text: String,
    /// Icon name shown after the value.
    pub suffix_icon: String,
    /// The active error message, empty when there is none.
    pub error_message: String,
}

impl FormattedValue {
    /// Renders `value` as-is and carries the validation error message.
    #[must_use]
    pub fn plain(properties: &PropertyData) -> Self {
        Self {
            primary_plain_text: properties.text(VALUE),
            error_message: error_message(properties),
            ..Self::default()
        }
    }

    /// Serializes to the JSON shape hosts consume.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Returns `error-message` when `error` is set, otherwise `""`.
#[must_use]
pub fn error_message(properties: &PropertyData) -> String {
    if properties.flag(ERROR) {
        properties.text(ERROR_MESSAGE)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uxbind_property::PropertyKey;

    #[test]
    fn plain_carries_error_only_when_flagged() {
        let mut props: PropertyData = [
            (PropertyKey::uniface(VALUE), "abc".into()),
            (PropertyKey::uniface(ERROR_MESSAGE), "too short".into()),
        ]
        .into_iter()
        .collect();
        let formatted = FormattedValue::plain(&props);
        assert_eq!(formatted.primary_plain_text, "abc");
        assert_eq!(formatted.error_message, "");

        props.set(PropertyKey::uniface(ERROR), true.into());
        assert_eq!(FormattedValue::plain(&props).error_message, "too short");
    }

    #[test]
    fn json_uses_camel_case() {
        let formatted = FormattedValue {
            primary_plain_text: "On".into(),
            ..FormattedValue::default()
        };
        let json = formatted.to_json();
        assert!(json.contains("\"primaryPlainText\":\"On\""), "{json}");
        assert!(json.contains("\"errorMessage\":\"\""), "{json}");
    }
}
