// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `UX.Select`: a drop-down `<fluent-select>` over a valrep.
//!
//! The control selects by index: its `value` property holds the position
//! of the selected item in `valrep` as a string, and `""` when the value
//! is not among the items.

use uxbind_dom::{Document, DomEvent, NodeId, Selector};
use uxbind_property::{FormatError, PropertyData, PropertyKey, PropertyValue, VALREP, VALUE, ValRep};
use uxbind_worker::workers::{
    DisplayFormat, Element, HtmlAttribute, HtmlAttributeBoolean, HtmlAttributeChoice,
    HtmlAttributeNumber, IgnoreProperty, SlottedElement, SlottedError, StyleClass, Trigger,
    UiBlock, UiBlocking, ValRepElements,
};
use uxbind_worker::{
    FormattedValue, InstanceView, LayoutCx, Registrar, Updater, WidgetDescriptor,
    WidgetDescriptorBuilder, WidgetError, Worker, WorkerCx, error_message,
};

use crate::control::set_format_error;

/// Registered class name.
pub const NAME: &str = "UX.Select";

/// Tag of the rendered control.
pub const TAG: &str = "fluent-select";

const DISPLAY_FORMAT: &str = "display-format";
const PLACEHOLDER_TEXT: &str = "placeholder-text";
const SHOW_PLACEHOLDER: &str = "show-placeholder";

/// Index of the selected item, read from the control.
fn selected_index(doc: &Document, root: NodeId) -> Option<usize> {
    doc.property(root, VALUE)
        .and_then(PropertyValue::parse_integer)
        .and_then(|index| usize::try_from(index).ok())
}

/// Owns `value` and renders the selected item into the control's
/// `selected-value` slot, or a placeholder while nothing is selected.
#[derive(Debug)]
struct SelectedValue {
    selector: Selector,
}

impl SelectedValue {
    fn new() -> Self {
        Self {
            selector: Selector::attribute("slot", Some("selected-value")),
        }
    }

    fn render(cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let element = cx.element()?;
        let root = cx.root()?;
        let data = cx.data();
        let value = data.text(VALUE);
        let valrep = data.valrep(VALREP);
        let format = DisplayFormat::parse(&data.text(DISPLAY_FORMAT));
        let placeholder = (value.is_empty() && data.flag(SHOW_PLACEHOLDER))
            .then(|| data.text(PLACEHOLDER_TEXT));
        let index = valrep.position(&value);

        let doc = cx.doc();
        doc.set_text(element, "")?;
        let shown = match (index.and_then(|i| valrep.get(i)), placeholder) {
            (Some(entry), _) => format.render(doc, &entry.value, &entry.representation)?,
            (None, Some(text)) => {
                let span = doc.create_element("span")?;
                doc.add_class(span, "u-placeholder")?;
                doc.set_text(span, text)?;
                vec![span]
            }
            (None, None) if value.is_empty() => Vec::new(),
            (None, None) => format.render(doc, &value, "")?,
        };
        for span in shown {
            doc.append_child(element, span)?;
        }
        doc.set_attribute(element, "value", value.as_str())?;
        doc.set_property(root, VALUE, index.map_or_else(String::new, |i| i.to_string()))?;

        let error = (!value.is_empty() && index.is_none()).then(FormatError::default);
        set_format_error(cx, error.as_ref())
    }
}

impl Worker for SelectedValue {
    fn register(&self, reg: &mut Registrar<'_>) {
        reg.setter(VALUE);
        reg.getter(VALUE);
        reg.default_value(VALUE, "");
        reg.setter(PropertyKey::uniface(VALREP));
        reg.setter(DISPLAY_FORMAT);
        reg.setter(PLACEHOLDER_TEXT);
        reg.default_value(PLACEHOLDER_TEXT, "Selected item");
        reg.setter(SHOW_PLACEHOLDER);
        reg.default_value(SHOW_PLACEHOLDER, false);
    }

    fn selector(&self) -> Option<&Selector> {
        Some(&self.selector)
    }

    fn layout(&self, cx: &mut LayoutCx<'_>) -> Result<Vec<NodeId>, WidgetError> {
        let div = cx.doc().create_element("div")?;
        cx.doc().set_attribute(div, "slot", "selected-value")?;
        Ok(vec![div])
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        Self::render(cx)
    }

    fn value(&self, view: InstanceView<'_>) -> PropertyValue {
        let valrep = view.data().valrep(VALREP);
        view.root()
            .and_then(|root| selected_index(view.document(), root))
            .and_then(|index| valrep.get(index))
            .map(|entry| PropertyValue::from(entry.value.as_str()))
            .or_else(|| view.data().value(VALUE).cloned())
            .unwrap_or_default()
    }

    fn value_updaters(&self, view: InstanceView<'_>) -> Vec<Updater> {
        view.root()
            .map(|root| Updater {
                element: root,
                event_name: "change".into(),
                handler: Some(view.worker_id()),
            })
            .into_iter()
            .collect()
    }

    fn handle_event(&self, cx: &mut WorkerCx<'_>, event: &DomEvent) -> Result<bool, WidgetError> {
        if event.name != "change" {
            return Ok(false);
        }
        let root = cx.root()?;
        let valrep: ValRep = cx.data().valrep(VALREP);
        let Some(entry) = selected_index(cx.document(), root).and_then(|i| valrep.get(i)) else {
            tracing::debug!(widget = %cx.widget_name(), "change without a selected item");
            return Ok(false);
        };
        let selected = PropertyValue::from(entry.value.as_str());
        cx.data_mut().set(PropertyKey::uniface(VALUE), selected);
        Self::render(cx)?;
        Ok(true)
    }
}

/// Formats the entry of `valrep` matching `value` in the display format.
pub(crate) fn format(properties: &PropertyData) -> FormattedValue {
    let value = properties.text(VALUE);
    let valrep = properties.valrep(VALREP);
    let mut formatted = FormattedValue {
        error_message: error_message(properties),
        ..FormattedValue::default()
    };
    match valrep.find(&value) {
        Some(entry) => match DisplayFormat::parse(&properties.text(DISPLAY_FORMAT)) {
            DisplayFormat::Rep => formatted.primary_plain_text = entry.representation.clone(),
            DisplayFormat::Val => formatted.primary_plain_text = entry.value.clone(),
            DisplayFormat::ValRep => {
                formatted.primary_plain_text = entry.representation.clone();
                formatted.secondary_plain_text = entry.value.clone();
            }
        },
        None if value.is_empty() => {}
        None => {
            formatted.primary_plain_text = "ERROR".into();
            formatted.secondary_plain_text = value;
            formatted.error_message = FormatError::default().message().to_owned();
        }
    }
    formatted
}

/// Builds the `UX.Select` class.
///
/// # Errors
///
/// Registration conflicts in the structure.
pub fn descriptor() -> Result<WidgetDescriptor, WidgetError> {
    WidgetDescriptorBuilder::new(NAME)
        .structure(
            Element::new(TAG)
                .child(StyleClass::new(["u-select", "collapsible", "outline"]))
                .child(HtmlAttribute::property("html:title", "title"))
                .child(HtmlAttribute::fixed("role", "combobox"))
                .child(HtmlAttributeBoolean::property("html:disabled", "disabled").default(false))
                .child(HtmlAttributeBoolean::attribute("html:hidden", "hidden").default(false))
                .child(
                    HtmlAttributeNumber::property("html:tabindex", "tabIndex")
                        .default(0)
                        .range(Some(-1), None),
                )
                .child(
                    HtmlAttributeChoice::new(
                        "label-position",
                        "u-label-position",
                        ["above", "below", "before", "after"],
                    )
                    .default("above"),
                )
                .child(
                    HtmlAttributeChoice::new("popup-position", "u-position", ["above", "below"])
                        .default("below"),
                )
                .child(UiBlock::new(UiBlocking::Readonly))
                .child(SelectedValue::new())
                .child(IgnoreProperty::new("html:minlength"))
                .child(IgnoreProperty::new("html:maxlength"))
                .child(
                    SlottedElement::new("span", "u-label-text")
                        .slot("label")
                        .text("label-text", ""),
                )
                .child(SlottedError::new("span", "u-error-icon").slot("end"))
                .child(ValRepElements::new("fluent-option"))
                .child(Trigger::new("onchange", "change").validate(true))
                .into_worker(),
        )
        .value_formatter(format, [VALUE, VALREP, DISPLAY_FORMAT, "error", "error-message"])
        .build()
}
