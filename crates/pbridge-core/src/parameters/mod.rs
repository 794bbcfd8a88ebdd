//! Parameter wrappers
//!
//! A wrapper binds one parameter descriptor to a control and reports the
//! control's value in typed form. There is one wrapper variant per
//! (base type, shape) pair the bridge supports; [`WrapperKind`] names them and
//! [`WrapperKind::resolve`] is the tag/multiplicity matching table.

mod enumeration;
mod scalar;
mod vector;

pub use enumeration::EnumerationParameter;
pub use scalar::{ScalarParameter, ScalarValue};
pub use vector::VectorParameter;

use crate::control::{Control, ControlKind, ControlSpec, Toolkit};
use crate::errors::{BridgeError, ConversionError};
use crate::variant::Variant;
use pbridge_manifest::{BaseType, ModuleParameter, ParameterKind, TagShape};
use serde::Serialize;
use std::fmt;

fn control_spec(
    descriptor: &ModuleParameter,
    kind: ControlKind,
    initial: Variant,
    allowed: Vec<String>,
) -> ControlSpec {
    let label = if descriptor.label.is_empty() {
        descriptor.name.to_string()
    } else {
        descriptor.label.to_string()
    };
    ControlSpec {
        name: descriptor.name.to_string(),
        label,
        tooltip: descriptor.description.clone(),
        kind,
        initial,
        allowed,
    }
}

// =============================================================================
// WRAPPER KIND - the matching table
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WrapperKind {
    ScalarInteger,
    ScalarFloat,
    ScalarDouble,
    ScalarBoolean,
    ScalarString,
    VectorInteger,
    VectorFloat,
    VectorDouble,
    VectorString,
    EnumerationInteger,
    EnumerationFloat,
    EnumerationDouble,
    EnumerationString,
}

impl WrapperKind {
    pub const ALL: [WrapperKind; 13] = [
        WrapperKind::ScalarInteger,
        WrapperKind::ScalarFloat,
        WrapperKind::ScalarDouble,
        WrapperKind::ScalarBoolean,
        WrapperKind::ScalarString,
        WrapperKind::VectorInteger,
        WrapperKind::VectorFloat,
        WrapperKind::VectorDouble,
        WrapperKind::VectorString,
        WrapperKind::EnumerationInteger,
        WrapperKind::EnumerationFloat,
        WrapperKind::EnumerationDouble,
        WrapperKind::EnumerationString,
    ];

    /// Map a parsed tag and multiplicity flag to the wrapper variant.
    ///
    /// Multiplicity turns a plain base type into a vector of it. Booleans have
    /// no vector form, and tags that already carry a shape do not combine
    /// with multiplicity.
    pub fn resolve(kind: ParameterKind, multiple: bool) -> Option<WrapperKind> {
        use BaseType::{Boolean, Double, Float, Integer, String};
        use TagShape::{Enumeration, Scalar, Vector};

        let resolved = match (kind.base, kind.shape, multiple) {
            (Integer, Scalar, false) => WrapperKind::ScalarInteger,
            (Float, Scalar, false) => WrapperKind::ScalarFloat,
            (Double, Scalar, false) => WrapperKind::ScalarDouble,
            (Boolean, Scalar, false) => WrapperKind::ScalarBoolean,
            (String, Scalar, false) => WrapperKind::ScalarString,

            (Integer, Vector, false) | (Integer, Scalar, true) => WrapperKind::VectorInteger,
            (Float, Vector, false) | (Float, Scalar, true) => WrapperKind::VectorFloat,
            (Double, Vector, false) | (Double, Scalar, true) => WrapperKind::VectorDouble,
            (String, Vector, false) | (String, Scalar, true) => WrapperKind::VectorString,

            (Integer, Enumeration, false) => WrapperKind::EnumerationInteger,
            (Float, Enumeration, false) => WrapperKind::EnumerationFloat,
            (Double, Enumeration, false) => WrapperKind::EnumerationDouble,
            (String, Enumeration, false) => WrapperKind::EnumerationString,

            (Boolean, Scalar, true)
            | (Boolean, Vector | Enumeration, _)
            | (_, Vector | Enumeration, true) => return None,
        };
        Some(resolved)
    }

    /// Variant for a descriptor, or `None` when its tag/multiplicity pair is
    /// not in the table
    pub fn for_parameter(descriptor: &ModuleParameter) -> Option<WrapperKind> {
        descriptor
            .kind()
            .and_then(|kind| Self::resolve(kind, descriptor.is_multiple()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WrapperKind::ScalarInteger => "scalar-integer",
            WrapperKind::ScalarFloat => "scalar-float",
            WrapperKind::ScalarDouble => "scalar-double",
            WrapperKind::ScalarBoolean => "scalar-boolean",
            WrapperKind::ScalarString => "scalar-string",
            WrapperKind::VectorInteger => "vector-integer",
            WrapperKind::VectorFloat => "vector-float",
            WrapperKind::VectorDouble => "vector-double",
            WrapperKind::VectorString => "vector-string",
            WrapperKind::EnumerationInteger => "enumeration-integer",
            WrapperKind::EnumerationFloat => "enumeration-float",
            WrapperKind::EnumerationDouble => "enumeration-double",
            WrapperKind::EnumerationString => "enumeration-string",
        }
    }
}

impl fmt::Display for WrapperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// PARAMETER VALUE
// =============================================================================

/// Typed value reported by a wrapper
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Integer(i32),
    Float(f32),
    Double(f64),
    Boolean(bool),
    String(String),
    IntegerList(Vec<i32>),
    FloatList(Vec<f32>),
    DoubleList(Vec<f64>),
    StringList(Vec<String>),
}

// =============================================================================
// BRIDGE PARAMETER
// =============================================================================

/// A wrapper of any supported variant
#[derive(Debug)]
pub enum BridgeParameter {
    Integer(ScalarParameter<i32>),
    Float(ScalarParameter<f32>),
    Double(ScalarParameter<f64>),
    Boolean(ScalarParameter<bool>),
    String(ScalarParameter<String>),
    IntegerVector(VectorParameter<i32>),
    FloatVector(VectorParameter<f32>),
    DoubleVector(VectorParameter<f64>),
    StringVector(VectorParameter<String>),
    IntegerEnumeration(EnumerationParameter<i32>),
    FloatEnumeration(EnumerationParameter<f32>),
    DoubleEnumeration(EnumerationParameter<f64>),
    StringEnumeration(EnumerationParameter<String>),
}

macro_rules! each_variant {
    ($value:expr, $wrapper:ident => $body:expr) => {
        match $value {
            BridgeParameter::Integer($wrapper) => $body,
            BridgeParameter::Float($wrapper) => $body,
            BridgeParameter::Double($wrapper) => $body,
            BridgeParameter::Boolean($wrapper) => $body,
            BridgeParameter::String($wrapper) => $body,
            BridgeParameter::IntegerVector($wrapper) => $body,
            BridgeParameter::FloatVector($wrapper) => $body,
            BridgeParameter::DoubleVector($wrapper) => $body,
            BridgeParameter::StringVector($wrapper) => $body,
            BridgeParameter::IntegerEnumeration($wrapper) => $body,
            BridgeParameter::FloatEnumeration($wrapper) => $body,
            BridgeParameter::DoubleEnumeration($wrapper) => $body,
            BridgeParameter::StringEnumeration($wrapper) => $body,
        }
    };
}

impl BridgeParameter {
    /// Construct and initialize the wrapper for `kind`
    pub(crate) fn create(
        kind: WrapperKind,
        descriptor: &ModuleParameter,
        toolkit: &dyn Toolkit,
    ) -> Result<Self, BridgeError> {
        let wrapper = match kind {
            WrapperKind::ScalarInteger => {
                BridgeParameter::Integer(ScalarParameter::initialize(descriptor, toolkit)?)
            }
            WrapperKind::ScalarFloat => {
                BridgeParameter::Float(ScalarParameter::initialize(descriptor, toolkit)?)
            }
            WrapperKind::ScalarDouble => {
                BridgeParameter::Double(ScalarParameter::initialize(descriptor, toolkit)?)
            }
            WrapperKind::ScalarBoolean => {
                BridgeParameter::Boolean(ScalarParameter::initialize(descriptor, toolkit)?)
            }
            WrapperKind::ScalarString => {
                BridgeParameter::String(ScalarParameter::initialize(descriptor, toolkit)?)
            }
            WrapperKind::VectorInteger => {
                BridgeParameter::IntegerVector(VectorParameter::initialize(descriptor, toolkit)?)
            }
            WrapperKind::VectorFloat => {
                BridgeParameter::FloatVector(VectorParameter::initialize(descriptor, toolkit)?)
            }
            WrapperKind::VectorDouble => {
                BridgeParameter::DoubleVector(VectorParameter::initialize(descriptor, toolkit)?)
            }
            WrapperKind::VectorString => {
                BridgeParameter::StringVector(VectorParameter::initialize(descriptor, toolkit)?)
            }
            WrapperKind::EnumerationInteger => BridgeParameter::IntegerEnumeration(
                EnumerationParameter::initialize(descriptor, toolkit)?,
            ),
            WrapperKind::EnumerationFloat => BridgeParameter::FloatEnumeration(
                EnumerationParameter::initialize(descriptor, toolkit)?,
            ),
            WrapperKind::EnumerationDouble => BridgeParameter::DoubleEnumeration(
                EnumerationParameter::initialize(descriptor, toolkit)?,
            ),
            WrapperKind::EnumerationString => BridgeParameter::StringEnumeration(
                EnumerationParameter::initialize(descriptor, toolkit)?,
            ),
        };
        Ok(wrapper)
    }

    pub fn kind(&self) -> WrapperKind {
        match self {
            BridgeParameter::Integer(_) => WrapperKind::ScalarInteger,
            BridgeParameter::Float(_) => WrapperKind::ScalarFloat,
            BridgeParameter::Double(_) => WrapperKind::ScalarDouble,
            BridgeParameter::Boolean(_) => WrapperKind::ScalarBoolean,
            BridgeParameter::String(_) => WrapperKind::ScalarString,
            BridgeParameter::IntegerVector(_) => WrapperKind::VectorInteger,
            BridgeParameter::FloatVector(_) => WrapperKind::VectorFloat,
            BridgeParameter::DoubleVector(_) => WrapperKind::VectorDouble,
            BridgeParameter::StringVector(_) => WrapperKind::VectorString,
            BridgeParameter::IntegerEnumeration(_) => WrapperKind::EnumerationInteger,
            BridgeParameter::FloatEnumeration(_) => WrapperKind::EnumerationFloat,
            BridgeParameter::DoubleEnumeration(_) => WrapperKind::EnumerationDouble,
            BridgeParameter::StringEnumeration(_) => WrapperKind::EnumerationString,
        }
    }

    pub fn descriptor(&self) -> &ModuleParameter {
        each_variant!(self, w => w.descriptor())
    }

    pub fn name(&self) -> &str {
        &self.descriptor().name
    }

    /// Current value read back from the control
    pub fn value(&self) -> Result<ParameterValue, ConversionError> {
        match self {
            BridgeParameter::Integer(w) => w.value().map(ParameterValue::Integer),
            BridgeParameter::Float(w) => w.value().map(ParameterValue::Float),
            BridgeParameter::Double(w) => w.value().map(ParameterValue::Double),
            BridgeParameter::Boolean(w) => w.value().map(ParameterValue::Boolean),
            BridgeParameter::String(w) => w.value().map(ParameterValue::String),
            BridgeParameter::IntegerVector(w) => w.value().map(ParameterValue::IntegerList),
            BridgeParameter::FloatVector(w) => w.value().map(ParameterValue::FloatList),
            BridgeParameter::DoubleVector(w) => w.value().map(ParameterValue::DoubleList),
            BridgeParameter::StringVector(w) => w.value().map(ParameterValue::StringList),
            BridgeParameter::IntegerEnumeration(w) => w.value().map(ParameterValue::Integer),
            BridgeParameter::FloatEnumeration(w) => w.value().map(ParameterValue::Float),
            BridgeParameter::DoubleEnumeration(w) => w.value().map(ParameterValue::Double),
            BridgeParameter::StringEnumeration(w) => w.value().map(ParameterValue::String),
        }
    }

    pub fn set_value(&mut self, value: Variant) -> Result<(), BridgeError> {
        each_variant!(self, w => w.set_value(value))
    }

    pub fn control(&self) -> &dyn Control {
        each_variant!(self, w => w.control())
    }

    pub fn control_mut(&mut self) -> &mut dyn Control {
        each_variant!(self, w => w.control_mut())
    }
}
