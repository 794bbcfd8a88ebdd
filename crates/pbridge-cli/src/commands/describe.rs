use crate::errors::CliError;
use crate::GlobalOpts;
use colored::Colorize;
use pbridge_config::Config;
use pbridge_core::{ToolProvider, WrapperKind};
use pbridge_manifest::ModuleDescription;
use serde::Serialize;

/// One parameter row of `pbridge describe`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterRow {
    pub group: String,
    pub name: String,
    pub tag: String,
    pub multiple: bool,
    /// `None` when the tag/multiplicity pair has no wrapper
    pub kind: Option<WrapperKind>,
    pub current: String,
}

pub fn parameter_rows(tool: &ModuleDescription) -> Vec<ParameterRow> {
    tool.parameter_groups
        .iter()
        .flat_map(|group| {
            group.parameters.iter().map(move |param| ParameterRow {
                group: group.label.to_string(),
                name: param.name.to_string(),
                tag: param.tag.to_string(),
                multiple: param.is_multiple(),
                kind: WrapperKind::for_parameter(param),
                current: param.current_value().to_string(),
            })
        })
        .collect()
}

pub fn describe_tool(
    opts: &GlobalOpts,
    config: &Config,
    name: &str,
    json: bool,
) -> Result<(), CliError> {
    let catalog = opts.load_catalog(config)?;
    let tool = catalog
        .find_tool(name)
        .ok_or_else(|| CliError::ToolNotFound(name.to_string()))?;
    let rows = parameter_rows(&tool);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", tool.name.bold().green());
    if !tool.description.is_empty() {
        println!("  {}", tool.description);
    }
    if !tool.runnable {
        println!("  {}", "This tool has no execution logic and cannot be loaded.".yellow());
    }

    let mut current_group: Option<&str> = None;
    for row in &rows {
        if current_group != Some(row.group.as_str()) {
            let label = if row.group.is_empty() {
                "(ungrouped)"
            } else {
                row.group.as_str()
            };
            println!("\n  {}", label.bold());
            current_group = Some(row.group.as_str());
        }

        let tag = if row.multiple {
            format!("multiple {}", row.tag)
        } else {
            row.tag.clone()
        };
        let kind = match row.kind {
            Some(kind) => kind.to_string().cyan(),
            None => "unsupported".red(),
        };
        let mut line = format!("    {} {} -> {}", row.name, format!("<{}>", tag).dimmed(), kind);
        if !row.current.is_empty() {
            line.push_str(&format!(" = {}", row.current));
        }
        println!("{}", line);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::commands::describe::*;
    use pbridge_manifest::{ModuleParameter, ParameterGroup};
    use std::sync::Arc;

    #[test]
    fn test_rows_mark_unsupported_parameters() {
        let mut flags = ModuleParameter::new("flags", "boolean");
        flags.multiple = Arc::from("true");
        let mut sigma = ModuleParameter::new("sigma", "double");
        sigma.default = "1.5".to_string();

        let tool = ModuleDescription {
            name: Arc::from("Blur"),
            parameter_groups: vec![ParameterGroup {
                label: Arc::from("Parameters"),
                parameters: vec![sigma, flags, ModuleParameter::new("input", "image")],
                ..Default::default()
            }],
            ..Default::default()
        };

        let rows = parameter_rows(&tool);
        let kinds: Vec<Option<WrapperKind>> = rows.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![Some(WrapperKind::ScalarDouble), None, None]);
        assert_eq!(rows[0].current, "1.5");
        assert!(rows[1].multiple);
    }
}
