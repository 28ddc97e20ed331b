// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use uxbind_dom::{Document, NodeId};
use uxbind_property::{PropertyKey, VALREP, VALUE, ValRep};

use crate::cx::WorkerCx;
use crate::error::WidgetError;
use crate::worker::{Registrar, Worker};

/// How a valrep item is shown: `rep`, `val` or `valrep`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DisplayFormat {
    /// The representation only.
    #[default]
    Rep,
    /// The value only.
    Val,
    /// The representation followed by the value.
    ValRep,
}

impl DisplayFormat {
    /// Parses the `display-format` property; unknown formats read as `rep`.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text {
            "val" => Self::Val,
            "valrep" => Self::ValRep,
            _ => Self::Rep,
        }
    }

    /// Creates the `<span>` elements showing one item.
    ///
    /// # Errors
    ///
    /// Document failures.
    pub fn render(
        self,
        doc: &mut Document,
        value: &str,
        representation: &str,
    ) -> Result<Vec<NodeId>, WidgetError> {
        let span = |doc: &mut Document, class: &str, text: &str| -> Result<NodeId, WidgetError> {
            let span = doc.create_element("span")?;
            doc.add_class(span, class)?;
            doc.set_text(span, text)?;
            Ok(span)
        };
        let value = if value.is_empty() { "null" } else { value };
        Ok(match self {
            Self::Rep => vec![span(doc, "u-valrep-representation", representation)?],
            Self::Val => vec![span(doc, "u-valrep-value", value)?],
            Self::ValRep => {
                let rep = span(doc, "u-valrep-representation", representation)?;
                let val = span(doc, "u-valrep-value", value)?;
                doc.add_class(val, "u-value")?;
                vec![rep, val]
            }
        })
    }
}

/// Renders `valrep` as one `<tag value="<index>">` child per item.
///
/// Children with this tag are owned by the worker and rebuilt on every
/// refresh. With [`selected`](Self::selected) the worker also follows
/// `value` and flags the matching item.
#[derive(Debug)]
pub struct ValRepElements {
    tag: String,
    class: Option<String>,
    selected: Option<String>,
}

impl ValRepElements {
    /// Creates `<tag>` items.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            class: None,
            selected: None,
        }
    }

    /// Adds a style class to every item.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Sets the boolean DOM property `property` on the item whose value is
    /// `value`, and clears it on the others.
    #[must_use]
    pub fn selected(mut self, property: impl Into<String>) -> Self {
        self.selected = Some(property.into());
        self
    }

    fn render(
        &self,
        doc: &mut Document,
        element: NodeId,
        valrep: &ValRep,
        format: DisplayFormat,
        value: &str,
    ) -> Result<(), WidgetError> {
        let stale: Vec<NodeId> = doc
            .children(element)
            .iter()
            .copied()
            .filter(|&child| doc.tag(child) == Some(self.tag.as_str()))
            .collect();
        for child in stale {
            doc.remove_child(element, child)?;
        }
        for (index, entry) in valrep.iter().enumerate() {
            let item = doc.create_element(&self.tag)?;
            doc.set_attribute(item, "value", index.to_string())?;
            if let Some(class) = &self.class {
                doc.add_class(item, class)?;
            }
            for span in format.render(doc, &entry.value, &entry.representation)? {
                doc.append_child(item, span)?;
            }
            if let Some(property) = &self.selected {
                doc.set_property(item, property, entry.value == value)?;
            }
            doc.append_child(element, item)?;
        }
        Ok(())
    }
}

impl Worker for ValRepElements {
    fn register(&self, reg: &mut Registrar<'_>) {
        reg.setter(PropertyKey::uniface(VALREP));
        reg.default_value(PropertyKey::uniface(VALREP), ValRep::new());
        reg.setter(PropertyKey::uniface("display-format"));
        reg.default_value(PropertyKey::uniface("display-format"), "rep");
        if self.selected.is_some() {
            reg.setter(PropertyKey::uniface(VALUE));
        }
    }

    fn refresh(&self, cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        let element = cx.element()?;
        let valrep = cx.data().valrep(VALREP);
        let format = DisplayFormat::parse(&cx.data().text("display-format"));
        let value = cx.data().text(VALUE);
        self.render(cx.doc(), element, &valrep, format, &value)
    }
}
