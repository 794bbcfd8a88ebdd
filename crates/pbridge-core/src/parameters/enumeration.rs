use crate::control::{Control, ControlKind, Toolkit};
use crate::converters::Convert;
use crate::errors::{BridgeError, ConversionError};
use crate::parameters::control_spec;
use crate::variant::Variant;
use pbridge_manifest::ModuleParameter;
use std::marker::PhantomData;

/// Wrapper for a parameter restricted to the descriptor's element list
#[derive(Debug)]
pub struct EnumerationParameter<T> {
    descriptor: ModuleParameter,
    control: Box<dyn Control>,
    _value: PhantomData<fn() -> T>,
}

impl<T: Convert> EnumerationParameter<T> {
    /// Every element must convert to `T`. The current value must be one of
    /// the elements; an empty current value selects the first element.
    pub(crate) fn initialize(
        descriptor: &ModuleParameter,
        toolkit: &dyn Toolkit,
    ) -> Result<Self, BridgeError> {
        let allowed: Vec<String> = descriptor.allowed_values().map(str::to_string).collect();
        let Some(first) = allowed.first() else {
            return Err(BridgeError::EmptyEnumeration(descriptor.name.to_string()));
        };
        for element in &allowed {
            T::from_text(element)?;
        }

        let current = descriptor.current_value();
        let selected = if current.is_empty() {
            first.clone()
        } else if allowed.iter().any(|a| a == current) {
            current.to_string()
        } else {
            return Err(BridgeError::NotAllowed {
                name: descriptor.name.to_string(),
                value: current.to_string(),
                allowed: allowed.join(", "),
            });
        };

        let control = toolkit.create_control(control_spec(
            descriptor,
            ControlKind::ComboBox,
            Variant::String(selected),
            allowed,
        ));
        Ok(EnumerationParameter {
            descriptor: descriptor.clone(),
            control,
            _value: PhantomData,
        })
    }

    pub fn value(&self) -> Result<T, ConversionError> {
        T::from_variant(&self.control.value())
    }

    /// Select another element; the control rejects values outside the list
    pub fn set_value(&mut self, value: Variant) -> Result<(), BridgeError> {
        let text = value.to_text();
        T::from_text(&text)?;
        self.control.set_value(Variant::String(text))
    }

    /// The allowed values in declaration order
    pub fn allowed_values(&self) -> Result<Vec<T>, ConversionError> {
        self.control
            .allowed_values()
            .iter()
            .map(|v| T::from_text(v))
            .collect()
    }

    pub fn control(&self) -> &dyn Control {
        self.control.as_ref()
    }

    pub fn control_mut(&mut self) -> &mut dyn Control {
        self.control.as_mut()
    }

    pub fn descriptor(&self) -> &ModuleParameter {
        &self.descriptor
    }
}

#[cfg(test)]
mod tests {
    use crate::control::HeadlessToolkit;
    use crate::parameters::enumeration::*;
    use std::sync::Arc;

    fn param(tag: &str, elements: &[&str], value: &str) -> ModuleParameter {
        let mut p = ModuleParameter::new("choice", tag);
        p.elements = elements.iter().map(|e| Arc::from(*e)).collect();
        p.value = value.to_string();
        p
    }

    #[test]
    fn test_selects_current_value() {
        let result = EnumerationParameter::<i32>::initialize(
            &param("integer-enumeration", &["1", "2", "4"], "2"),
            &HeadlessToolkit,
        );
        assert!(result.is_ok_and(|w| w.value() == Ok(2)
            && w.allowed_values() == Ok(vec![1, 2, 4])
            && w.control().kind() == ControlKind::ComboBox));
    }

    #[test]
    fn test_defaults_to_first_element() {
        let result = EnumerationParameter::<String>::initialize(
            &param("string-enumeration", &["Linear", "Nearest"], ""),
            &HeadlessToolkit,
        );
        assert!(result.is_ok_and(|w| w.value() == Ok("Linear".to_string())));
    }

    #[test]
    fn test_rejects_value_outside_elements() {
        let result = EnumerationParameter::<String>::initialize(
            &param("string-enumeration", &["Linear", "Nearest"], "Cubic"),
            &HeadlessToolkit,
        );
        assert!(matches!(result, Err(BridgeError::NotAllowed { .. })));
    }

    #[test]
    fn test_rejects_empty_and_mistyped_elements() {
        let empty = EnumerationParameter::<f64>::initialize(
            &param("double-enumeration", &[], ""),
            &HeadlessToolkit,
        );
        assert!(matches!(empty, Err(BridgeError::EmptyEnumeration(_))));

        let mistyped = EnumerationParameter::<f32>::initialize(
            &param("float-enumeration", &["0.5", "half"], ""),
            &HeadlessToolkit,
        );
        assert!(matches!(mistyped, Err(BridgeError::Conversion(_))));
    }

    #[test]
    fn test_set_value_respects_allowed_list() {
        let Ok(mut wrapper) = EnumerationParameter::<f64>::initialize(
            &param("double-enumeration", &["0.5", "1.5"], ""),
            &HeadlessToolkit,
        ) else {
            panic!("wrapper should initialize");
        };
        assert!(wrapper.set_value(Variant::from("1.5")).is_ok());
        assert_eq!(wrapper.value(), Ok(1.5));
        assert!(matches!(
            wrapper.set_value(Variant::from("2.5")),
            Err(BridgeError::NotAllowed { .. })
        ));
        assert_eq!(wrapper.value(), Ok(1.5));
    }
}
