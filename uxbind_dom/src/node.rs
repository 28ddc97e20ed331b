// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node identifiers and per-node storage.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use hashbrown::HashMap;
use smallvec::SmallVec;
use uxbind_property::PropertyValue;

/// Identifier for a node in a [`Document`](crate::Document).
///
/// This is a small, copyable handle. Nodes are never freed while their
/// document lives: removing a node only detaches it, so an id stays valid
/// and can be re-attached.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) const fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Tag used for shadow roots.
pub(crate) const SHADOW_ROOT_TAG: &str = "#shadow-root";

/// Storage for one element.
#[derive(Debug, Default)]
pub(crate) struct Element {
    pub(crate) tag: String,
    /// Attributes in insertion order.
    pub(crate) attributes: Vec<(String, String)>,
    /// Class list in insertion order, without duplicates.
    pub(crate) classes: SmallVec<[String; 4]>,
    pub(crate) styles: Vec<(String, String)>,
    pub(crate) properties: HashMap<String, PropertyValue>,
    pub(crate) text: String,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) shadow_root: Option<NodeId>,
    /// Set on shadow roots: the element hosting this root.
    pub(crate) host: Option<NodeId>,
}

impl Element {
    pub(crate) fn new(tag: &str) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}
