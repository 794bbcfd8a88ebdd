//! Editable controls handed out by parameter wrappers
//!
//! The UI toolkit that renders controls is an external collaborator. The
//! bridge only needs to create a control bound to an initial value (and, for
//! enumerations, a fixed allowed-value list), read its current value back and
//! push edits into it. [`HeadlessToolkit`] implements that contract without
//! any rendering and is what the command-line front end and tests use.

use crate::errors::BridgeError;
use crate::variant::Variant;
use std::fmt;

/// Widget family a control is rendered as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlKind {
    SpinBox,
    DoubleSpinBox,
    CheckBox,
    LineEdit,
    /// Line edit holding a delimited list
    ListEdit,
    ComboBox,
}

/// Everything a toolkit needs to build a control
#[derive(Debug, Clone)]
pub struct ControlSpec {
    pub name: String,
    pub label: String,
    pub tooltip: String,
    pub kind: ControlKind,
    pub initial: Variant,
    /// Allowed values, only meaningful for combo boxes
    pub allowed: Vec<String>,
}

/// A renderable control bound to one parameter value
pub trait Control: fmt::Debug {
    fn kind(&self) -> ControlKind;

    fn label(&self) -> &str;

    fn tooltip(&self) -> &str {
        ""
    }

    fn value(&self) -> Variant;

    fn set_value(&mut self, value: Variant) -> Result<(), BridgeError>;

    fn allowed_values(&self) -> &[String] {
        &[]
    }
}

/// Factory for controls
pub trait Toolkit {
    fn create_control(&self, spec: ControlSpec) -> Box<dyn Control>;
}

impl<T: Toolkit + ?Sized> Toolkit for &T {
    fn create_control(&self, spec: ControlSpec) -> Box<dyn Control> {
        (**self).create_control(spec)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessToolkit;

impl Toolkit for HeadlessToolkit {
    fn create_control(&self, spec: ControlSpec) -> Box<dyn Control> {
        Box::new(HeadlessControl::new(spec))
    }
}

/// Control that only stores its value
#[derive(Debug, Clone)]
pub struct HeadlessControl {
    name: String,
    label: String,
    tooltip: String,
    kind: ControlKind,
    value: Variant,
    allowed: Vec<String>,
}

impl HeadlessControl {
    pub fn new(spec: ControlSpec) -> Self {
        HeadlessControl {
            name: spec.name,
            label: spec.label,
            tooltip: spec.tooltip,
            kind: spec.kind,
            value: spec.initial,
            allowed: spec.allowed,
        }
    }
}

impl Control for HeadlessControl {
    fn kind(&self) -> ControlKind {
        self.kind
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn tooltip(&self) -> &str {
        &self.tooltip
    }

    fn value(&self) -> Variant {
        self.value.clone()
    }

    fn set_value(&mut self, value: Variant) -> Result<(), BridgeError> {
        if self.kind == ControlKind::ComboBox {
            let text = value.to_text();
            if !self.allowed.iter().any(|a| *a == text) {
                return Err(BridgeError::NotAllowed {
                    name: self.name.clone(),
                    value: text,
                    allowed: self.allowed.join(", "),
                });
            }
            self.value = Variant::String(text);
            return Ok(());
        }
        self.value = value;
        Ok(())
    }

    fn allowed_values(&self) -> &[String] {
        &self.allowed
    }
}

#[cfg(test)]
mod tests {
    use crate::control::*;

    fn combo() -> Box<dyn Control> {
        HeadlessToolkit.create_control(ControlSpec {
            name: "mode".to_string(),
            label: "Mode".to_string(),
            tooltip: String::new(),
            kind: ControlKind::ComboBox,
            initial: Variant::from("Below"),
            allowed: vec!["Below".to_string(), "Above".to_string()],
        })
    }

    #[test]
    fn test_combo_box_enforces_allowed_values() {
        let mut control = combo();
        assert!(control.set_value(Variant::from("Above")).is_ok());
        assert_eq!(control.value(), Variant::from("Above"));

        let result = control.set_value(Variant::from("Sideways"));
        assert!(matches!(result, Err(BridgeError::NotAllowed { .. })));
        assert_eq!(control.value(), Variant::from("Above"));
        assert_eq!(control.allowed_values().len(), 2);
    }

    #[test]
    fn test_plain_control_stores_value() {
        let mut control = HeadlessToolkit.create_control(ControlSpec {
            name: "iterations".to_string(),
            label: "Iterations".to_string(),
            tooltip: "How many passes".to_string(),
            kind: ControlKind::SpinBox,
            initial: Variant::Int(1),
            allowed: Vec::new(),
        });
        assert_eq!(control.kind(), ControlKind::SpinBox);
        assert_eq!(control.tooltip(), "How many passes");
        assert!(control.set_value(Variant::Int(4)).is_ok());
        assert_eq!(control.value(), Variant::Int(4));
        assert!(control.allowed_values().is_empty());
    }
}
