use crate::errors::CliError;
use crate::GlobalOpts;
use pbridge_config::Config;
use pbridge_core::{
    BridgeParameter, ControlKind, ParameterFactory, ParameterValue, Variant, WrapperKind,
};
use serde::Serialize;

/// What `pbridge value` prints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueReport {
    pub tool: String,
    pub parameter: String,
    pub kind: WrapperKind,
    pub control: ControlKind,
    pub value: ParameterValue,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<String>,
}

impl ValueReport {
    pub fn from_wrapper(tool: &str, wrapper: &BridgeParameter) -> Result<Self, CliError> {
        Ok(ValueReport {
            tool: tool.to_string(),
            parameter: wrapper.name().to_string(),
            kind: wrapper.kind(),
            control: wrapper.control().kind(),
            value: wrapper.value()?,
            allowed: wrapper.control().allowed_values().to_vec(),
        })
    }
}

/// Load `tool`, wrap `parameter`, optionally edit it, and report the value
pub fn show_value(
    opts: &GlobalOpts,
    config: &Config,
    tool: &str,
    parameter: &str,
    set: Option<String>,
) -> Result<(), CliError> {
    let catalog = opts.load_catalog(config)?;
    let mut factory = ParameterFactory::headless(&catalog);
    factory.load_tool(tool);
    if !factory.has_tool() {
        return Err(CliError::ToolNotLoaded(tool.to_string()));
    }

    let Some(id) = factory.create_wrapper_by_name(parameter)? else {
        return Err(CliError::ParameterNotFound {
            tool: tool.to_string(),
            name: parameter.to_string(),
        });
    };

    let wrapper = &mut factory[id];
    if let Some(text) = set {
        wrapper.set_value(Variant::from(text))?;
    }

    let report = ValueReport::from_wrapper(tool, wrapper)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
