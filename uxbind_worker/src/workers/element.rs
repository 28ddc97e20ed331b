// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use uxbind_dom::{NodeId, Selector};

use crate::cx::WorkerCx;
use crate::error::WidgetError;
use crate::layout::LayoutCx;
use crate::worker::{Registrar, Worker};

/// A structural element: a tag, an optional style class and nested workers.
///
/// Nested workers without a selector of their own operate on this element.
/// With a style class, the element is found back by `.class`.
#[derive(Debug)]
pub struct Element {
    tag: String,
    class: Option<String>,
    selector: Option<Selector>,
    hidden: bool,
    children: Vec<Rc<dyn Worker>>,
}

impl Element {
    /// Creates a `<tag>` element.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            class: None,
            selector: None,
            hidden: false,
            children: Vec::new(),
        }
    }

    /// Adds a style class, which also becomes the selector.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if self.selector.is_none() {
            self.selector = Some(Selector::class(class.as_str()));
        }
        self.class = Some(class);
        self
    }

    /// Overrides the selector.
    #[must_use]
    pub fn selector(mut self, selector: Selector) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Starts hidden.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Appends a nested worker.
    #[must_use]
    pub fn child(mut self, worker: impl Worker + 'static) -> Self {
        self.children.push(Rc::new(worker));
        self
    }

    /// Wraps the element for [`WidgetDescriptorBuilder::structure`](crate::WidgetDescriptorBuilder::structure).
    #[must_use]
    pub fn into_worker(self) -> Rc<dyn Worker> {
        Rc::new(self)
    }
}

impl Worker for Element {
    fn register(&self, _reg: &mut Registrar<'_>) {}

    fn selector(&self) -> Option<&Selector> {
        self.selector.as_ref()
    }

    fn children(&self) -> &[Rc<dyn Worker>] {
        &self.children
    }

    fn layout(&self, cx: &mut LayoutCx<'_>) -> Result<Vec<NodeId>, WidgetError> {
        let element = cx.doc().create_element(&self.tag)?;
        if let Some(class) = &self.class {
            cx.doc().add_class(element, class)?;
        }
        if self.hidden {
            cx.doc().set_hidden(element, true)?;
        }
        cx.layout_children(&self.children, element)?;
        Ok(vec![element])
    }

    fn refresh(&self, _cx: &mut WorkerCx<'_>) -> Result<(), WidgetError> {
        Ok(())
    }
}
