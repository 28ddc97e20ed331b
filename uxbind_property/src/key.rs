// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Namespaced property keys.
//!
//! Hosts address widget properties with flat strings such as `"value"`,
//! `"html:disabled"`, `"style:color"` or `"class:u-dense"`. This module turns
//! those strings into a [`PropertyKey`]: a [`Namespace`] plus a bare name.

use alloc::format;
use alloc::string::String;
use core::fmt;

/// Name of the field value property.
pub const VALUE: &str = "value";
/// Name of the value → representation table property.
pub const VALREP: &str = "valrep";
/// Name of the host-driven validation error flag.
pub const ERROR: &str = "error";
/// Name of the host-driven validation error message.
pub const ERROR_MESSAGE: &str = "error-message";
/// Name of the adapter-driven format error flag.
pub const FORMAT_ERROR: &str = "format-error";
/// Name of the adapter-driven format error message.
pub const FORMAT_ERROR_MESSAGE: &str = "format-error-message";
/// Name of the administrative UI-blocking flag.
pub const UI_BLOCKED: &str = "uiblocked";

/// Name used by class and style setters that accept every key of their namespace.
pub const WILDCARD: &str = "*";

/// The namespace a property key belongs to.
///
/// The declaration order is the sort order, so sorted key collections group
/// framework properties first, then HTML, style and class keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Namespace {
    /// Unqualified, framework-defined properties (including `value` and `valrep`).
    Uniface,
    /// `html:<name>`, a raw DOM attribute or property.
    Html,
    /// `style:<name>`, a CSS style property.
    Style,
    /// `class:<name>` (or `classes:<name>`), boolean class membership.
    Class,
}

impl Namespace {
    /// Returns the textual prefix of this namespace, if it has one.
    #[must_use]
    pub const fn prefix(self) -> Option<&'static str> {
        match self {
            Self::Uniface => None,
            Self::Html => Some("html"),
            Self::Style => Some("style"),
            Self::Class => Some("class"),
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "html" => Some(Self::Html),
            "style" => Some(Self::Style),
            "class" | "classes" => Some(Self::Class),
            _ => None,
        }
    }
}

/// A namespaced property key.
///
/// # Example
///
/// ```rust
/// use uxbind_property::{Namespace, PropertyKey};
///
/// let key = PropertyKey::parse("html:disabled");
/// assert_eq!(key.namespace(), Namespace::Html);
/// assert_eq!(key.name(), "disabled");
/// assert_eq!(key.to_string(), "html:disabled");
///
/// // Unknown prefixes stay part of a framework property name.
/// let child = PropertyKey::parse("a:html:disabled");
/// assert_eq!(child.namespace(), Namespace::Uniface);
/// assert_eq!(child.strip_sub_widget_prefix("a"), Some(PropertyKey::html("disabled")));
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyKey {
    namespace: Namespace,
    name: String,
}

impl PropertyKey {
    /// Creates a key from a namespace and a bare name.
    #[must_use]
    pub fn new(namespace: Namespace, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }

    /// Creates a framework property key.
    #[must_use]
    pub fn uniface(name: impl Into<String>) -> Self {
        Self::new(Namespace::Uniface, name)
    }

    /// Creates an `html:` key.
    #[must_use]
    pub fn html(name: impl Into<String>) -> Self {
        Self::new(Namespace::Html, name)
    }

    /// Creates a `style:` key.
    #[must_use]
    pub fn style(name: impl Into<String>) -> Self {
        Self::new(Namespace::Style, name)
    }

    /// Creates a `class:` key.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(Namespace::Class, name)
    }

    /// Creates the wildcard key of a namespace.
    #[must_use]
    pub fn wildcard(namespace: Namespace) -> Self {
        Self::new(namespace, WILDCARD)
    }

    /// Parses a flat host key.
    ///
    /// `html:`, `style:`, `class:` and `classes:` select their namespace when
    /// followed by a non-empty name; everything else is a framework property.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if let Some((prefix, rest)) = text.split_once(':')
            && !rest.is_empty()
            && let Some(namespace) = Namespace::from_prefix(prefix)
        {
            return Self::new(namespace, rest);
        }
        Self::uniface(text)
    }

    /// Returns the namespace of this key.
    #[must_use]
    #[inline]
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Returns the bare name of this key.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for the wildcard key of a namespace.
    #[must_use]
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        self.name == WILDCARD
    }

    /// Returns `true` if this is the framework property `name`.
    #[must_use]
    #[inline]
    pub fn is_uniface(&self, name: &str) -> bool {
        self.namespace == Namespace::Uniface && self.name == name
    }

    /// Strips a `<id>:` sub-widget prefix and re-parses the remainder.
    ///
    /// Returns `None` if the key does not target the sub-widget `id`.
    #[must_use]
    pub fn strip_sub_widget_prefix(&self, id: &str) -> Option<Self> {
        if self.namespace != Namespace::Uniface {
            return None;
        }
        let rest = self.name.strip_prefix(id)?.strip_prefix(':')?;
        if rest.is_empty() {
            None
        } else {
            Some(Self::parse(rest))
        }
    }

    /// Returns the key the parent widget uses to address `self` on sub-widget `id`.
    #[must_use]
    pub fn with_sub_widget_prefix(&self, id: &str) -> Self {
        Self::uniface(format!("{id}:{self}"))
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespace.prefix() {
            Some(prefix) => write!(f, "{prefix}:{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl fmt::Debug for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyKey({self})")
    }
}

impl From<&str> for PropertyKey {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<String> for PropertyKey {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl From<&Self> for PropertyKey {
    fn from(key: &Self) -> Self {
        key.clone()
    }
}
