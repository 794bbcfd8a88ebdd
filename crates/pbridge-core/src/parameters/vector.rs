use crate::control::{Control, ControlKind, Toolkit};
use crate::converters::Convert;
use crate::errors::{BridgeError, ConversionError};
use crate::parameters::control_spec;
use crate::variant::Variant;
use pbridge_manifest::ModuleParameter;
use std::marker::PhantomData;

/// Wrapper for a parameter holding an ordered list of values.
///
/// The control holds the list as delimited text. A blank default leaves the
/// control blank; reading it back then follows the text rule, so a blank
/// numeric list does not convert.
#[derive(Debug)]
pub struct VectorParameter<T> {
    descriptor: ModuleParameter,
    control: Box<dyn Control>,
    _value: PhantomData<fn() -> T>,
}

impl<T: Convert> VectorParameter<T> {
    pub(crate) fn initialize(
        descriptor: &ModuleParameter,
        toolkit: &dyn Toolkit,
    ) -> Result<Self, BridgeError> {
        let text = descriptor.current_value();
        let initial = if text.is_empty() {
            Variant::String(String::new())
        } else {
            Vec::<T>::from_text(text)?.to_variant()
        };
        let control = toolkit.create_control(control_spec(
            descriptor,
            ControlKind::ListEdit,
            initial,
            Vec::new(),
        ));
        Ok(VectorParameter {
            descriptor: descriptor.clone(),
            control,
            _value: PhantomData,
        })
    }

    pub fn value(&self) -> Result<Vec<T>, ConversionError> {
        Vec::<T>::from_variant(&self.control.value())
    }

    pub fn set_value(&mut self, value: Variant) -> Result<(), BridgeError> {
        let typed = Vec::<T>::from_variant(&value)?;
        self.control.set_value(typed.to_variant())
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
    use crate::parameters::vector::*;

    fn param(tag: &str, default: &str) -> ModuleParameter {
        let mut p = ModuleParameter::new("list", tag);
        p.default = default.to_string();
        p
    }

    #[test]
    fn test_integer_vector_from_default() {
        let result =
            VectorParameter::<i32>::initialize(&param("integer-vector", "1,2,3"), &HeadlessToolkit);
        assert!(result.is_ok_and(|w| w.value() == Ok(vec![1, 2, 3])
            && w.control().kind() == ControlKind::ListEdit
            && w.control().value() == Variant::from("1,2,3")));
    }

    #[test]
    fn test_blank_default_reads_through_text_rule() {
        let Ok(numbers) =
            VectorParameter::<i32>::initialize(&param("integer-vector", ""), &HeadlessToolkit)
        else {
            panic!("blank default should initialize");
        };
        assert_eq!(numbers.control().value(), Variant::from(""));
        assert!(matches!(
            numbers.value(),
            Err(ConversionError::Element { index: 0, .. })
        ));

        let strings =
            VectorParameter::<String>::initialize(&param("string-vector", ""), &HeadlessToolkit);
        assert!(strings.is_ok_and(|w| w.value() == Ok(vec![String::new()])));
    }

    #[test]
    fn test_bad_element_fails_initialization() {
        let result =
            VectorParameter::<f32>::initialize(&param("float-vector", "1.5,x"), &HeadlessToolkit);
        assert!(matches!(
            result,
            Err(BridgeError::Conversion(ConversionError::Element { index: 1, .. }))
        ));
    }

    #[test]
    fn test_set_value_normalizes_text() {
        let Ok(mut wrapper) =
            VectorParameter::<f64>::initialize(&param("double-vector", "1"), &HeadlessToolkit)
        else {
            panic!("wrapper should initialize");
        };
        assert!(wrapper.set_value(Variant::from(" 0.5 , 2")).is_ok());
        assert_eq!(wrapper.control().value(), Variant::from("0.5,2"));
        assert_eq!(wrapper.value(), Ok(vec![0.5, 2.0]));

        assert!(matches!(
            wrapper.set_value(Variant::from("")),
            Err(BridgeError::Conversion(ConversionError::Element { index: 0, .. }))
        ));
        assert_eq!(wrapper.value(), Ok(vec![0.5, 2.0]));
    }
}
