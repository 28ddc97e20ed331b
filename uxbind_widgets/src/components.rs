// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Models of the Fluent web components the widget classes render into.
//!
//! These reproduce the parts of the components' behavior the widgets rely
//! on: their shadow structure, the events they raise, and the writes they
//! refuse.

use std::rc::Rc;

use uxbind_dom::{Component, Document, DomError, DomEvent, NodeId};
use uxbind_property::PropertyValue;

/// Toggles `checked` on activation unless the control is disabled or read-only.
fn toggle(doc: &mut Document, host: NodeId) -> Result<(), DomError> {
    if doc.property_flag(host, "disabled") || doc.property_flag(host, "readOnly") {
        return Ok(());
    }
    let checked = doc.property_flag(host, "checked");
    doc.set_property(host, "indeterminate", false)?;
    doc.set_property(host, "checked", !checked)?;
    Ok(())
}

/// Raises `change` whenever `checked` changes.
fn checked_changed(doc: &mut Document, host: NodeId, name: &str) {
    if name == "checked" {
        doc.dispatch_event(DomEvent::new(host, "change"));
    }
}

/// `<fluent-checkbox>`.
#[derive(Debug, Default)]
pub struct FluentCheckbox;

impl Component for FluentCheckbox {
    fn property_changed(
        &self,
        doc: &mut Document,
        host: NodeId,
        name: &str,
        _old: &PropertyValue,
    ) -> Result<(), DomError> {
        checked_changed(doc, host, name);
        Ok(())
    }

    fn activate(&self, doc: &mut Document, host: NodeId) -> Result<(), DomError> {
        toggle(doc, host)
    }
}

/// `<fluent-switch>`.
///
/// Its shadow root holds the `switch` slot for the toggle and the
/// `checked-message` and `unchecked-message` slots.
#[derive(Debug, Default)]
pub struct FluentSwitch;

impl Component for FluentSwitch {
    fn construct(&self, doc: &mut Document, host: NodeId) -> Result<(), DomError> {
        let shadow = doc.attach_shadow(host)?;
        let label = doc.create_element("label")?;
        doc.set_attribute(label, "part", "label")?;
        let unnamed = doc.create_element("slot")?;
        doc.append_child(label, unnamed)?;
        doc.append_child(shadow, label)?;
        for name in ["switch", "checked-message", "unchecked-message"] {
            let slot = doc.create_element("slot")?;
            doc.set_attribute(slot, "name", name)?;
            doc.append_child(shadow, slot)?;
        }
        Ok(())
    }

    fn property_changed(
        &self,
        doc: &mut Document,
        host: NodeId,
        name: &str,
        _old: &PropertyValue,
    ) -> Result<(), DomError> {
        checked_changed(doc, host, name);
        Ok(())
    }

    fn activate(&self, doc: &mut Document, host: NodeId) -> Result<(), DomError> {
        toggle(doc, host)
    }
}

/// `<fluent-text-field>` and `<fluent-number-field>`.
///
/// Refuses `readOnly` writes while the host shows an error, the way the
/// real control throws from its `readOnly` setter in that state.
#[derive(Debug, Default)]
pub struct FluentTextField;

impl Component for FluentTextField {
    fn construct(&self, doc: &mut Document, host: NodeId) -> Result<(), DomError> {
        let shadow = doc.attach_shadow(host)?;
        let root = doc.create_element("div")?;
        doc.add_class(root, "root")?;
        let input = doc.create_element("input")?;
        doc.add_class(input, "control")?;
        doc.append_child(root, input)?;
        doc.append_child(shadow, root)?;
        Ok(())
    }

    fn will_set_property(
        &self,
        doc: &Document,
        host: NodeId,
        name: &str,
        _value: &PropertyValue,
    ) -> Result<(), DomError> {
        let invalid = doc.has_class(host, "u-invalid") || doc.has_class(host, "u-format-invalid");
        if name == "readOnly" && invalid {
            return Err(DomError::Component {
                tag: doc.tag(host).unwrap_or_default().into(),
                property: name.into(),
                message: "cannot change read-only state while invalid".into(),
            });
        }
        Ok(())
    }
}

/// `<fluent-button>`; activation raises `click`.
#[derive(Debug, Default)]
pub struct FluentButton;

impl Component for FluentButton {
    fn construct(&self, doc: &mut Document, host: NodeId) -> Result<(), DomError> {
        let shadow = doc.attach_shadow(host)?;
        let button = doc.create_element("button")?;
        doc.add_class(button, "control")?;
        doc.set_attribute(button, "part", "control")?;
        for name in ["start", "", "end"] {
            let slot = doc.create_element("slot")?;
            if !name.is_empty() {
                doc.set_attribute(slot, "name", name)?;
            }
            doc.append_child(button, slot)?;
        }
        doc.append_child(shadow, button)?;
        Ok(())
    }
}

/// Children of `parent` with `tag`.
fn children_tagged(doc: &Document, parent: NodeId, tag: &str) -> Vec<NodeId> {
    doc.children(parent)
        .iter()
        .copied()
        .filter(|&child| doc.tag(child) == Some(tag))
        .collect()
}

/// Whether the user may change the selection of `control`.
fn selectable(doc: &Document, control: NodeId) -> bool {
    !doc.property_flag(control, "disabled") && !doc.property_flag(control, "readOnly")
}

/// `<fluent-radio-group>`; raises `change` whenever `value` changes.
///
/// Its shadow root holds the `label` slot ahead of the radios.
#[derive(Debug, Default)]
pub struct FluentRadioGroup;

impl Component for FluentRadioGroup {
    fn construct(&self, doc: &mut Document, host: NodeId) -> Result<(), DomError> {
        let shadow = doc.attach_shadow(host)?;
        let region = doc.create_element("div")?;
        doc.set_attribute(region, "part", "positioning-region")?;
        for name in ["label", ""] {
            let slot = doc.create_element("slot")?;
            if !name.is_empty() {
                doc.set_attribute(slot, "name", name)?;
            }
            doc.append_child(region, slot)?;
        }
        doc.append_child(shadow, region)?;
        Ok(())
    }

    fn property_changed(
        &self,
        doc: &mut Document,
        host: NodeId,
        name: &str,
        _old: &PropertyValue,
    ) -> Result<(), DomError> {
        if name == "value" {
            doc.dispatch_event(DomEvent::new(host, "change"));
        }
        Ok(())
    }
}

/// `<fluent-radio>`.
///
/// Activation checks the radio and, inside a group that accepts it, makes
/// the radio's `value` attribute the group's value.
#[derive(Debug, Default)]
pub struct FluentRadio;

impl Component for FluentRadio {
    fn activate(&self, doc: &mut Document, host: NodeId) -> Result<(), DomError> {
        if doc.property_flag(host, "disabled") {
            return Ok(());
        }
        let Some(group) = doc
            .parent(host)
            .filter(|&parent| doc.tag(parent) == Some("fluent-radio-group"))
        else {
            doc.set_property(host, "checked", true)?;
            return Ok(());
        };
        if !selectable(doc, group) {
            return Ok(());
        }
        for radio in children_tagged(doc, group, "fluent-radio") {
            doc.set_property(radio, "checked", radio == host)?;
        }
        let value = doc.attribute(host, "value").unwrap_or_default().to_owned();
        doc.set_property(group, "value", value)?;
        Ok(())
    }
}

/// `<fluent-listbox>`, with an unnamed slot for its options.
#[derive(Debug, Default)]
pub struct FluentListbox;

impl Component for FluentListbox {
    fn construct(&self, doc: &mut Document, host: NodeId) -> Result<(), DomError> {
        let shadow = doc.attach_shadow(host)?;
        let slot = doc.create_element("slot")?;
        doc.append_child(shadow, slot)?;
        Ok(())
    }
}

/// `<fluent-option>`.
///
/// Activation selects the option in its `<fluent-listbox>` (`selectedIndex`)
/// or `<fluent-select>` (`value`), and raises `change` on that control when
/// the selection moved.
#[derive(Debug, Default)]
pub struct FluentOption;

impl Component for FluentOption {
    fn activate(&self, doc: &mut Document, host: NodeId) -> Result<(), DomError> {
        let Some(control) = doc.parent(host) else {
            return Ok(());
        };
        if doc.property_flag(host, "disabled") || !selectable(doc, control) {
            return Ok(());
        }
        let value = doc.attribute(host, "value").unwrap_or_default().to_owned();
        let tag = doc.tag(control).unwrap_or_default().to_owned();
        let changed = match tag.as_str() {
            "fluent-listbox" => {
                let Ok(index) = value.parse::<i32>() else {
                    return Ok(());
                };
                doc.set_property(control, "selectedIndex", index)?
            }
            "fluent-select" => doc.set_property(control, "value", value)?,
            _ => return Ok(()),
        };
        for option in children_tagged(doc, control, "fluent-option") {
            doc.set_property(option, "selected", option == host)?;
        }
        if changed {
            doc.dispatch_event(DomEvent::new(control, "change"));
        }
        Ok(())
    }
}

/// Defines every component model on `doc`.
///
/// Elements only get their component's behavior when created after this.
pub fn register_components(doc: &mut Document) {
    doc.define_component("fluent-checkbox", Rc::new(FluentCheckbox));
    doc.define_component("fluent-switch", Rc::new(FluentSwitch));
    doc.define_component("fluent-text-field", Rc::new(FluentTextField));
    doc.define_component("fluent-number-field", Rc::new(FluentTextField));
    doc.define_component("fluent-button", Rc::new(FluentButton));
    doc.define_component("fluent-radio-group", Rc::new(FluentRadioGroup));
    doc.define_component("fluent-radio", Rc::new(FluentRadio));
    doc.define_component("fluent-listbox", Rc::new(FluentListbox));
    doc.define_component("fluent-option", Rc::new(FluentOption));
}
