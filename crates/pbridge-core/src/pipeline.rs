//! Pipeline step planning
//!
//! A CLI tool becomes a pipeline step by picking one scene-data parameter as
//! the step input and one as its output; every other parameter is exposed to
//! the pipeline through a wrapper. This module works out that mapping and
//! describes the resulting step. It never runs anything.

use crate::control::{HeadlessToolkit, Toolkit};
use crate::errors::BridgeError;
use crate::factory::{ParameterFactory, WrapperId};
use crate::parameters::WrapperKind;
use crate::provider::ToolProvider;
use pbridge_manifest::{ModuleDescription, ModuleParameter};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Tags the pipeline wrapping cannot handle yet
pub const UNSUPPORTED_TAGS: &[&str] = &[
    "point",
    "pointfile",
    "region",
    "table",
    "transform",
    "integer-enumeration",
    "float-enumeration",
    "double-enumeration",
    "string-enumeration",
    "file",
    "directory",
];

/// Dependency every generated step carries
pub const PIPELINE_CREATOR: &str = "PipelineCreator";

const SUPPORT_HINT: &str =
    "This type may be supported by CLI modules but not yet by pipeline wrapping";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    #[error("Unknown {tag} type: {ptype}. {hint}", hint = SUPPORT_HINT)]
    UnsupportedType { tag: String, ptype: String },

    #[error("Unknown tag: {0}. {hint}", hint = SUPPORT_HINT)]
    UnsupportedTag(String),

    #[error("Parameter '{name}' uses the currently unsupported tag: {tag}")]
    UnsupportedParameter { name: String, tag: String },

    #[error("Unable to deduce {channel} argument from candidates: [{}]", .candidates.join(", "))]
    AmbiguousRunArgument {
        channel: Channel,
        candidates: Vec<String>,
    },

    #[error("No parameter named '{0}'")]
    ArgumentNotFound(String),

    #[error("Unable to find a CLI module with the name: {0}")]
    ToolNotFound(String),

    #[error("No wrapper could be created for parameter '{0}'. Is a module loaded into the factory?")]
    MissingWrapper(String),

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

// =============================================================================
// CHANNELS AND PARAMETER SUMMARIES
// =============================================================================

/// Direction of a parameter relative to the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Input,
    Output,
    None,
}

impl FromStr for Channel {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Channel::None);
        }
        match s.to_ascii_lowercase().as_str() {
            "input" => Ok(Channel::Input),
            "output" => Ok(Channel::Output),
            _ => Err(PipelineError::UnknownChannel(s.to_string())),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Input => write!(f, "input"),
            Channel::Output => write!(f, "output"),
            Channel::None => write!(f, "none"),
        }
    }
}

/// What the pipeline needs to know about one parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CliParameter {
    pub name: String,
    /// Name used for the step's setter, e.g. `Iterations`
    pub pipeline_name: String,
    pub label: String,
    pub tag: String,
    pub channel: Channel,
    pub ptype: String,
}

impl CliParameter {
    pub fn from_descriptor(descriptor: &ModuleParameter) -> Result<Self, PipelineError> {
        Ok(CliParameter {
            name: descriptor.name.to_string(),
            pipeline_name: pipeline_parameter_name(&descriptor.name),
            label: descriptor.label.to_string(),
            tag: descriptor.tag.to_string(),
            channel: descriptor.channel.parse()?,
            ptype: descriptor.ptype.to_string(),
        })
    }
}

/// First character upper-cased, the rest lower-cased
pub fn pipeline_parameter_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Summaries of every parameter in declaration order
pub fn cli_parameters(description: &ModuleDescription) -> Result<Vec<CliParameter>, PipelineError> {
    description
        .parameters()
        .map(CliParameter::from_descriptor)
        .collect()
}

/// Whether a tag denotes data living in the host's scene
pub fn is_scene_data(tag: &str) -> bool {
    matches!(tag, "geometry" | "image")
}

/// Scene node class holding data for `param`
pub fn scene_node_type(param: &CliParameter) -> Result<&'static str, PipelineError> {
    match (param.tag.as_str(), param.ptype.as_str()) {
        ("geometry", "scalar" | "model") => Ok("vtkMRMLModelNode"),
        ("image", "label") => Ok("vtkMRMLLabelMapVolumeNode"),
        ("image", "scalar") => Ok("vtkMRMLScalarVolumeNode"),
        ("geometry" | "image", ptype) => Err(PipelineError::UnsupportedType {
            tag: param.tag.clone(),
            ptype: ptype.to_string(),
        }),
        (tag, _) => Err(PipelineError::UnsupportedTag(tag.to_string())),
    }
}

/// Fail on the first non-excluded parameter whose tag is in [`UNSUPPORTED_TAGS`]
pub fn check_for_unsupported_tags(
    description: &ModuleDescription,
    exclude: &[String],
) -> Result<(), PipelineError> {
    let offending = description.parameters().find(|p| {
        !exclude.iter().any(|e| e.as_str() == p.name.as_ref())
            && UNSUPPORTED_TAGS.contains(&p.tag.as_ref())
    });
    match offending {
        Some(p) => Err(PipelineError::UnsupportedParameter {
            name: p.name.to_string(),
            tag: p.tag.to_string(),
        }),
        None => Ok(()),
    }
}

/// The single scene-data parameter on `channel`
pub fn deduce_run_argument(
    params: &[CliParameter],
    channel: Channel,
) -> Result<&CliParameter, PipelineError> {
    let options: Vec<&CliParameter> = params
        .iter()
        .filter(|p| is_scene_data(&p.tag) && p.channel == channel)
        .collect();
    match options.as_slice() {
        [only] => Ok(*only),
        _ => Err(PipelineError::AmbiguousRunArgument {
            channel,
            candidates: options.iter().map(|p| p.name.clone()).collect(),
        }),
    }
}

pub fn find_argument<'a>(
    params: &'a [CliParameter],
    name: &str,
) -> Result<&'a CliParameter, PipelineError> {
    params
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| PipelineError::ArgumentNotFound(name.to_string()))
}

/// Module name reduced to characters valid in an identifier
pub fn fixup_module_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

// =============================================================================
// PIPELINE PARAMETERS
// =============================================================================

/// A wrapper exposed to the pipeline under its pipeline name
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineParameter<'a> {
    pub pipeline_name: &'a str,
    pub label: &'a str,
    pub wrapper: WrapperId,
}

/// Create one wrapper per parameter not named in `exclude`
pub fn to_pipeline_parameters<'a, P: ToolProvider, K: Toolkit>(
    factory: &mut ParameterFactory<P, K>,
    params: &'a [CliParameter],
    exclude: &[String],
) -> Result<Vec<PipelineParameter<'a>>, PipelineError> {
    let mut parameters = Vec::new();
    for param in params {
        if exclude.iter().any(|e| *e == param.name) {
            continue;
        }
        let Some(wrapper) = factory.create_wrapper_by_name(&param.name)? else {
            return Err(PipelineError::MissingWrapper(param.name.clone()));
        };
        parameters.push(PipelineParameter {
            pipeline_name: &param.pipeline_name,
            label: &param.label,
            wrapper,
        });
    }
    Ok(parameters)
}

// =============================================================================
// STEP PLANNING
// =============================================================================

/// A parameter the step exposes for editing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExposedParameter {
    pub name: String,
    pub pipeline_name: String,
    pub label: String,
    pub kind: WrapperKind,
}

/// Everything needed to register a tool as a pipeline step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineStepSpec {
    pub name: String,
    pub class_name: String,
    pub input_type: &'static str,
    pub output_type: &'static str,
    pub input_parameter: String,
    pub output_parameter: String,
    pub dependencies: Vec<String>,
    pub setters: Vec<String>,
    pub parameters: Vec<ExposedParameter>,
}

/// Describe `module` as a pipeline step.
///
/// `input`/`output` name the run arguments explicitly; when absent they are
/// deduced from the scene-data parameters on each channel. Parameters in
/// `exclude` are neither checked for support nor exposed.
pub fn plan_step<P: ToolProvider>(
    provider: P,
    module: &str,
    input: Option<&str>,
    output: Option<&str>,
    exclude: &[String],
) -> Result<PipelineStepSpec, PipelineError> {
    let description = provider
        .find_tool(module)
        .ok_or_else(|| PipelineError::ToolNotFound(module.to_string()))?;
    check_for_unsupported_tags(&description, exclude)?;

    let params = cli_parameters(&description)?;
    let input_arg = match input {
        Some(name) => find_argument(&params, name)?,
        None => deduce_run_argument(&params, Channel::Input)?,
    };
    let output_arg = match output {
        Some(name) => find_argument(&params, name)?,
        None => deduce_run_argument(&params, Channel::Output)?,
    };
    let input_type = scene_node_type(input_arg)?;
    let output_type = scene_node_type(output_arg)?;

    let mut hidden = vec![input_arg.name.clone(), output_arg.name.clone()];
    hidden.extend(exclude.iter().cloned());

    let mut factory = ParameterFactory::new(provider, HeadlessToolkit);
    factory.load_tool(module);
    let exposed = to_pipeline_parameters(&mut factory, &params, &hidden)?;
    let parameters = exposed
        .iter()
        .map(|p| {
            let wrapper = &factory[p.wrapper];
            ExposedParameter {
                name: wrapper.name().to_string(),
                pipeline_name: p.pipeline_name.to_string(),
                label: p.label.to_string(),
                kind: wrapper.kind(),
            }
        })
        .collect();

    let dependencies: BTreeSet<String> = description
        .dependencies
        .iter()
        .map(|d| d.to_string())
        .chain(std::iter::once(PIPELINE_CREATOR.to_string()))
        .collect();

    let spec = PipelineStepSpec {
        name: module.to_string(),
        class_name: format!("PipelineWrapper_{}", fixup_module_name(module)),
        input_type,
        output_type,
        input_parameter: input_arg.pipeline_name.clone(),
        output_parameter: output_arg.pipeline_name.clone(),
        dependencies: dependencies.into_iter().collect(),
        setters: params
            .iter()
            .map(|p| format!("Set{}", p.pipeline_name))
            .collect(),
        parameters,
    };
    debug!(
        "Planned step '{}' with {} exposed parameter(s)",
        spec.name,
        spec.parameters.len()
    );
    Ok(spec)
}
