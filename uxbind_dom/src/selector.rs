// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compound selectors.
//!
//! Only what widget adapters need to find their elements back is supported:
//! one compound selector made of an optional tag (or `*`), `#id`, `.class`,
//! `[attr]` and `[attr=value]` parts. Combinators are not supported.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::error::DomError;
use crate::node::Element;

/// A parsed compound selector.
///
/// # Example
///
/// ```rust
/// use uxbind_dom::Selector;
///
/// let sel: Selector = "span.u-prefix[slot=start]".parse().unwrap();
/// assert_eq!(sel.to_string(), "span.u-prefix[slot=\"start\"]");
/// assert!("div > span".parse::<Selector>().is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl Selector {
    /// A selector matching elements that carry `class`.
    #[must_use]
    pub fn class(class: impl Into<String>) -> Self {
        Self {
            classes: alloc::vec![class.into()],
            ..Self::default()
        }
    }

    /// A selector matching elements with the given tag.
    #[must_use]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::default()
        }
    }

    /// A selector matching elements that have attribute `name` (with `value`, if given).
    #[must_use]
    pub fn attribute(name: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            attributes: alloc::vec![(name.into(), value.map(ToString::to_string))],
            ..Self::default()
        }
    }

    /// Adds a class requirement.
    #[must_use]
    pub fn and_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub(crate) fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag
            && !element.tag.eq_ignore_ascii_case(tag)
        {
            return false;
        }
        if let Some(id) = &self.id
            && element.attribute("id") != Some(id.as_str())
        {
            return false;
        }
        if !self.classes.iter().all(|c| element.has_class(c)) {
            return false;
        }
        self.attributes
            .iter()
            .all(|(name, value)| match (element.attribute(name), value) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == expected,
            })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn invalid(selector: &str, reason: &'static str) -> DomError {
    DomError::InvalidSelector {
        selector: selector.into(),
        reason,
    }
}

fn take_ident<'a>(input: &'a str, rest: &mut &'a str) -> Result<&'a str, DomError> {
    let end = rest.find(|c: char| !is_ident_char(c)).unwrap_or(rest.len());
    if end == 0 {
        return Err(invalid(input, "expected an identifier"));
    }
    let (ident, tail) = rest.split_at(end);
    *rest = tail;
    Ok(ident)
}

fn parse_attribute(input: &str, body: &str) -> Result<(String, Option<String>), DomError> {
    let Some((name, value)) = body.split_once('=') else {
        let name = body.trim();
        if name.is_empty() || !name.chars().all(is_ident_char) {
            return Err(invalid(input, "bad attribute name"));
        }
        return Ok((name.into(), None));
    };
    let name = name.trim();
    if name.is_empty() || !name.chars().all(is_ident_char) {
        return Err(invalid(input, "bad attribute name"));
    }
    let value = value.trim();
    let value = match value.as_bytes().first() {
        Some(q @ (b'"' | b'\'')) => {
            let quote = char::from(*q);
            value
                .strip_prefix(quote)
                .and_then(|v| v.strip_suffix(quote))
                .ok_or_else(|| invalid(input, "unterminated attribute value"))?
        }
        _ => value,
    };
    Ok((name.into(), Some(value.into())))
}

impl FromStr for Selector {
    type Err = DomError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut selector = Self::default();
        let mut rest = input.trim();
        if rest.is_empty() {
            return Err(invalid(input, "empty selector"));
        }
        if let Some(tail) = rest.strip_prefix('*') {
            rest = tail;
        } else if rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
            selector.tag = Some(take_ident(input, &mut rest)?.into());
        }
        while let Some(c) = rest.chars().next() {
            rest = &rest[c.len_utf8()..];
            match c {
                '.' => selector.classes.push(take_ident(input, &mut rest)?.into()),
                '#' => selector.id = Some(take_ident(input, &mut rest)?.into()),
                '[' => {
                    let end = rest
                        .find(']')
                        .ok_or_else(|| invalid(input, "unterminated attribute selector"))?;
                    selector.attributes.push(parse_attribute(input, &rest[..end])?);
                    rest = &rest[end + 1..];
                }
                _ => return Err(invalid(input, "unsupported selector syntax")),
            }
        }
        Ok(selector)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => f.write_str(tag)?,
            None if self.id.is_none() && self.classes.is_empty() && self.attributes.is_empty() => {
                f.write_str("*")?;
            }
            None => {}
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        for (name, value) in &self.attributes {
            match value {
                Some(value) => write!(f, "[{name}=\"{value}\"]")?,
                None => write!(f, "[{name}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(tag: &str, classes: &[&str], attributes: &[(&str, &str)]) -> Element {
        let mut el = Element::new(tag);
        el.classes = classes.iter().map(|c| String::from(*c)).collect();
        el.attributes = attributes
            .iter()
            .map(|(n, v)| (String::from(*n), String::from(*v)))
            .collect();
        el
    }

    #[test]
    fn parse_compound() {
        let sel: Selector = "fluent-option#o1.a.b[value='x'][hidden]".parse().unwrap();
        let el = element(
            "fluent-option",
            &["b", "a"],
            &[("id", "o1"), ("value", "x"), ("hidden", "")],
        );
        assert!(sel.matches(&el));
        let other = element("fluent-option", &["a"], &[("id", "o1"), ("value", "x")]);
        assert!(!sel.matches(&other));
    }

    #[test]
    fn universal_and_class_only() {
        let any: Selector = "*".parse().unwrap();
        assert!(any.matches(&element("div", &[], &[])));
        let cls: Selector = ".u-x".parse().unwrap();
        assert!(cls.matches(&element("span", &["u-x"], &[])));
        assert!(!cls.matches(&element("span", &["u-y"], &[])));
    }

    #[test]
    fn tag_match_ignores_ascii_case() {
        let sel = Selector::tag("SPAN");
        assert!(sel.matches(&element("span", &[], &[])));
    }

    #[test]
    fn rejects_unsupported_syntax() {
        for bad in ["", "div span", "a > b", "[x", ".", "[=v]", "[x=\"v]"] {
            assert!(bad.parse::<Selector>().is_err(), "{bad}");
        }
    }
}
