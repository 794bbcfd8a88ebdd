//! Parameter bridge between CLI tool descriptions and pipeline authoring
//!
//! Given the description of one CLI parameter (name, type tag, multiplicity,
//! allowed values), the bridge builds a wrapper exposing the parameter's
//! current value in typed form together with an editable control. The
//! [`ParameterFactory`] picks the wrapper variant from the tag and
//! multiplicity, owns every wrapper it creates, and holds the run node of the
//! tool it loaded from a [`ToolProvider`].

pub mod control;
pub mod converters;
pub mod errors;
pub mod factory;
pub mod module;
pub mod parameters;
pub mod pipeline;
pub mod provider;
pub mod variant;

pub use control::{Control, ControlKind, HeadlessToolkit, Toolkit};
pub use errors::{BridgeError, ConversionError};
pub use factory::{ParameterFactory, WrapperId};
pub use module::{BridgeFlavor, BridgeModule, LegacyPipelineBridge, PipelineBridge};
pub use parameters::{BridgeParameter, ParameterValue, WrapperKind};
pub use pipeline::{plan_step, PipelineError, PipelineStepSpec};
pub use provider::{RunNode, ToolCatalog, ToolProvider};
pub use variant::Variant;
