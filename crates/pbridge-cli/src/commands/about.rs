use crate::errors::CliError;
use colored::Colorize;
use pbridge_config::{Config, Flavor};
use pbridge_core::module::ModuleInfo;
use pbridge_core::{BridgeModule, LegacyPipelineBridge, PipelineBridge};

/// Metadata of the bridge module for `flavor`, after running its setup hook
pub fn module_info(flavor: Flavor) -> ModuleInfo {
    match flavor {
        Flavor::Current => {
            let mut module = BridgeModule::<PipelineBridge>::new();
            module.setup();
            module.info()
        }
        Flavor::Legacy => {
            let mut module = BridgeModule::<LegacyPipelineBridge>::new();
            module.setup();
            module.info()
        }
    }
}

pub fn show_about(config: &Config, legacy: bool, json: bool) -> Result<(), CliError> {
    let flavor = if legacy {
        Flavor::Legacy
    } else {
        config.flavor()
    };
    let info = module_info(flavor);

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{} {}", info.title.bold().green(), format!("({})", info.name).dimmed());
    println!("  {} {}", "categories:".cyan(), info.categories.join(", "));
    println!("  {} {}", "contributors:".cyan(), info.contributors.join(", "));
    println!("  {} {}", "factory:".cyan(), info.factory_class);
    if info.hidden {
        println!("  {}", "hidden from the module list".dimmed());
    }
    println!("\n{}", info.help);
    if !info.acknowledgement.is_empty() {
        println!("\n{}", info.acknowledgement);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::commands::about::*;

    #[test]
    fn test_module_info_per_flavor() {
        let current = module_info(Flavor::Current);
        let legacy = module_info(Flavor::Legacy);
        assert_eq!(current.name, "PipelineCLIBridge");
        assert_eq!(legacy.name, "LegacyPipelineCLIBridge");
        assert_eq!(current.help, legacy.help);
    }
}
