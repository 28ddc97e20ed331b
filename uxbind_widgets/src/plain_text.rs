// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `UX.PlainText`: read-only text, optionally looked up in a valrep.

use uxbind_dom::{Document, NodeId, Selector};
use uxbind_property::{FormatError, PropertyData, PropertyValue, VALREP, VALUE, ValRep, ValRepEntry};
use uxbind_worker::workers::{
    Element, HtmlAttribute, HtmlAttributeBoolean, IgnoreProperty, SlottedElement, SlottedError,
    StyleClass,
};
use uxbind_worker::{
    FormattedValue, InstanceView, LayoutCx, Registrar, WidgetDescriptor, WidgetDescriptorBuilder,
    WidgetError, Worker, WorkerCx,
};

use crate::control::set_format_error;
use crate::text_field::format_affixed;

/// Registered class name.
pub const NAME: &str = "UX.PlainText";

const PLAINTEXT_FORMAT: &str = "plaintext-format";

/// How `plaintext-format` renders the value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlainTextFormat {
    /// The first line, with `...` when more lines follow.
    #[default]
    FirstLine,
    /// All lines joined with spaces.
    SingleLine,
    /// The text as-is.
    MultiLine,
    /// One paragraph per line.
    MultiParagraphs,
    /// `representation (value)` of the matching valrep item.
    ValRepText,
    /// The representation of the matching valrep item.
    RepresentationOnly,
    /// The value of the matching valrep item.
    ValueOnly,
}

impl PlainTextFormat {
    /// Parses a format name.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        Some(match text {
            "first-line" => Self::FirstLine,
            "single-line" => Self::SingleLine,
            "multi-line" => Self::MultiLine,
            "multi-paragraphs" => Self::MultiParagraphs,
            "valrep-text" => Self::ValRepText,
            "representation-only" => Self::RepresentationOnly,
            "value-only" => Self::ValueOnly,
            _ => return None,
        })
    }

    /// Whether the format shows a valrep item rather than the text.
    #[must_use]
    pub fn uses_valrep(self) -> bool {
        matches!(self, Self::ValRepText | Self::RepresentationOnly | Self::ValueOnly)
    }

    /// The text formats applied to `value`; the valrep formats leave it as-is.
    #[must_use]
    pub fn apply(self, value: &str) -> String {
        match self {
            Self::FirstLine => match value.split_once('\n') {
                Some((first, _)) => format!("{first}..."),
                None => value.to_owned(),
            },
            Self::SingleLine => value.replace('\n', " "),
            _ => value.to_owned(),
        }
    }
}

/// Renders `value` into the `u-control` span according to `plaintext-format`.
///
/// Unknown formats render like `first-line`.
#[derive(Debug)]
struct PlainTextValue {
    selector: Selector,
}

impl PlainTextValue {
    fn new() -> Self {
        Self {
            selector: Selector::class("u-control"),
        }
    }

    fn render(
        doc: &mut Document,
        element: NodeId,
        format: PlainTextFormat,
        value: &str,
        entry: Option<&ValRepEntry>,
    ) -> Result<(), WidgetError> {
        let span = |doc: &mut Document, tag: &str, class: &str, text: &str| {
            let node = doc.create_element(tag)?;
            doc.add_class(node, class)?;
            doc.set_text(node, text)?;
            doc.append_child(element, node)
        };
        match (format, entry) {
            (PlainTextFormat::MultiParagraphs, _) => {
                for line in value.split('\n') {
                    span(doc, "p", "u-paragraph", line)?;
                }
            }
            (PlainTextFormat::ValRepText, Some(entry)) => {
                doc.set_text(element, format!("{} ({value})", entry.representation))?;
            }
            (PlainTextFormat::RepresentationOnly, Some(entry)) => {
                span(doc, "span", "u-valrep-rep", &entry.representation)?;
            }
            (PlainTextFormat::ValueOnly, Some(entry)) => doc.set_text(element, entry.value.as_str())?,
            (format, _) => doc.set_text(element, format.apply(value))?,
        }
        Ok(())
    }
}

impl Worker for PlainTextValue {
    fn register(&self, reg: &mut Registrar<'_>) {
        reg.setter(VALUE);
        reg.getter(VALUE);
        reg.default_value(VALUE, "");
        reg.setter(VALREP);
        reg.default_value(VALREP, ValRep::new());
        reg.setter(PLAINTEXT_FORMAT);
        reg.default_value(PLAINTEXT_FORMAT, "first-line");
    }

    fn selector(&self) -> Option<&Selector> {
        Some(&self.selector)
    }

    fn layout(&self, cx: &mut LayoutCx<'_>) -> Result<Vec<NodeId>, WidgetError> {
        let doc = cx.doc();
        let span = doc.create_element("span")?;
        doc.add_class(span, "u-control")?;
        doc.set_hidden(span, true)?;
        Ok(vec![span])
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let element = cx.element()?;
        let data = cx.data();
        let value = data.text(VALUE);
        let valrep = data.valrep(VALREP);
        let format = PlainTextFormat::parse(&data.text(PLAINTEXT_FORMAT)).unwrap_or_default();
        let entry = valrep.find(&value);

        let doc = cx.doc();
        doc.set_text(element, "")?;
        doc.set_hidden(element, value.is_empty())?;
        if format.uses_valrep() && entry.is_none() {
            doc.set_text(element, value)?;
            return set_format_error(cx, Some(&FormatError::default()));
        }
        Self::render(doc, element, format, &value, entry)?;
        set_format_error(cx, None)
    }

    fn value(&self, view: InstanceView<'_>) -> PropertyValue {
        view.data().value(VALUE).cloned().unwrap_or_default()
    }
}

fn format(properties: &PropertyData) -> FormattedValue {
    let value = properties.text(VALUE);
    let mut formatted = format_affixed(properties);
    let valrep = properties.valrep(VALREP);
    match PlainTextFormat::parse(&properties.text(PLAINTEXT_FORMAT)) {
        Some(format) if !format.uses_valrep() => formatted.primary_plain_text = format.apply(&value),
        Some(format) => match (format, valrep.find(&value)) {
            (PlainTextFormat::ValueOnly, Some(entry)) => {
                formatted.primary_plain_text = entry.value.clone();
            }
            (PlainTextFormat::RepresentationOnly, Some(entry)) => {
                formatted.primary_plain_text = entry.representation.clone();
            }
            (_, Some(entry)) => {
                formatted.primary_plain_text = entry.representation.clone();
                formatted.secondary_plain_text = entry.value.clone();
            }
            (_, None) => {
                formatted.primary_plain_text = "ERROR".into();
                formatted.secondary_plain_text = value;
                formatted.error_message = FormatError::default().message().to_owned();
            }
        },
        None => {
            formatted.primary_plain_text = "ERROR".into();
            formatted.secondary_plain_text = value;
            formatted.error_message = FormatError::default().message().to_owned();
        }
    }
    formatted
}

/// Builds the `UX.PlainText` class.
///
/// # Errors
///
/// Registration conflicts in the structure.
pub fn descriptor() -> Result<WidgetDescriptor, WidgetError> {
    WidgetDescriptorBuilder::new(NAME)
        .structure(
            Element::new("span")
                .child(StyleClass::new(["u-plain-text"]))
                .child(HtmlAttribute::property("html:title", "title"))
                .child(HtmlAttributeBoolean::attribute("html:hidden", "hidden").default(false))
                .child(HtmlAttribute::attribute("html:slot", "slot").default(""))
                .child(IgnoreProperty::new("html:maxlength"))
                .child(IgnoreProperty::new("html:minlength"))
                .child(IgnoreProperty::new("html:readonly"))
                .child(SlottedElement::new("span", "u-label-text").text("label-text", ""))
                .child(
                    SlottedElement::new("span", "u-prefix")
                        .text("prefix-text", "")
                        .icon("prefix-icon", ""),
                )
                .child(PlainTextValue::new())
                .child(SlottedError::new("span", "u-error-icon"))
                .child(
                    SlottedElement::new("span", "u-suffix")
                        .text("suffix-text", "")
                        .icon("suffix-icon", ""),
                )
                .into_worker(),
        )
        .value_formatter(
            format,
            [
                VALUE,
                VALREP,
                PLAINTEXT_FORMAT,
                "error",
                "error-message",
                "prefix-icon",
                "prefix-text",
                "suffix-icon",
                "suffix-text",
            ],
        )
        .build()
}
