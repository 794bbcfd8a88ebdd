use crate::control::{Control, ControlKind, Toolkit};
use crate::converters::Convert;
use crate::errors::{BridgeError, ConversionError};
use crate::parameters::control_spec;
use crate::variant::Variant;
use pbridge_manifest::ModuleParameter;
use std::marker::PhantomData;

/// Value types that can back a single-valued parameter
pub trait ScalarValue: Convert + Default {
    /// Control used to edit the value
    const CONTROL: ControlKind;
}

impl ScalarValue for i32 {
    const CONTROL: ControlKind = ControlKind::SpinBox;
}

impl ScalarValue for f32 {
    const CONTROL: ControlKind = ControlKind::DoubleSpinBox;
}

impl ScalarValue for f64 {
    const CONTROL: ControlKind = ControlKind::DoubleSpinBox;
}

impl ScalarValue for bool {
    const CONTROL: ControlKind = ControlKind::CheckBox;
}

impl ScalarValue for String {
    const CONTROL: ControlKind = ControlKind::LineEdit;
}

/// Wrapper for a parameter holding one value
#[derive(Debug)]
pub struct ScalarParameter<T> {
    descriptor: ModuleParameter,
    control: Box<dyn Control>,
    _value: PhantomData<fn() -> T>,
}

impl<T: ScalarValue> ScalarParameter<T> {
    /// Build the control from the descriptor's current value.
    ///
    /// An empty current value starts the control at `T::default()`.
    pub(crate) fn initialize(
        descriptor: &ModuleParameter,
        toolkit: &dyn Toolkit,
    ) -> Result<Self, BridgeError> {
        let text = descriptor.current_value();
        let initial = if text.is_empty() {
            T::default()
        } else {
            T::from_text(text)?
        };
        let control = toolkit.create_control(control_spec(
            descriptor,
            T::CONTROL,
            initial.to_variant(),
            Vec::new(),
        ));
        Ok(ScalarParameter {
            descriptor: descriptor.clone(),
            control,
            _value: PhantomData,
        })
    }

    pub fn value(&self) -> Result<T, ConversionError> {
        T::from_variant(&self.control.value())
    }

    /// Replace the value; the input must convert to `T`
    pub fn set_value(&mut self, value: Variant) -> Result<(), BridgeError> {
        let typed = T::from_variant(&value)?;
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
