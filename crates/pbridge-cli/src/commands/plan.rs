use crate::errors::CliError;
use crate::GlobalOpts;
use pbridge_config::Config;
use pbridge_core::plan_step;

/// Print the pipeline step `tool` would register as
pub fn plan_tool(
    opts: &GlobalOpts,
    config: &Config,
    tool: &str,
    input: Option<&str>,
    output: Option<&str>,
    exclude: &[String],
) -> Result<(), CliError> {
    let catalog = opts.load_catalog(config)?;
    let spec = plan_step(&catalog, tool, input, output, exclude)?;
    pbridge_logger::debug(&format!(
        "Step '{}' exposes {} parameter(s)",
        spec.name,
        spec.parameters.len()
    ));
    println!("{}", serde_json::to_string_pretty(&spec)?);
    Ok(())
}
