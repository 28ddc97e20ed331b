// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reusable workers.
//!
//! Widget classes are mostly declarations: a tree of these workers, each
//! bound to one or a few property ids. Widget-specific behavior (value
//! coercion, custom event handling) lives in workers next to the widget.

mod attribute;
mod element;
mod range;
mod slotted;
mod style;
mod sub_widget;
mod trigger;
mod ui_block;
mod valrep;

pub use attribute::{HtmlAttribute, HtmlAttributeBoolean, HtmlAttributeChoice, HtmlAttributeNumber};
pub use element::Element;
pub use range::{HtmlAttributeMinMax, HtmlAttributeMinMaxLength};
pub use slotted::{SlottedElement, SlottedError, remove_icon_classes};
pub use style::{StyleClass, StyleProperty};
pub use sub_widget::{IdSplit, SlottedSubWidget, SubWidgetsByProperty};
pub use trigger::{IgnoreProperty, Trigger};
pub use ui_block::{UiBlock, UiBlocking};
pub use valrep::{DisplayFormat, ValRepElements};
