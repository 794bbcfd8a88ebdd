use crate::errors::CliError;
use crate::GlobalOpts;
use clap::Subcommand;
use colored::Colorize;
use pbridge_config::Config;
use std::fs;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Set a configuration key (catalogs, flavor, verbosity)
    Set { key: String, value: String },
    /// Get or set the path to the config file.
    /// If `new_path` is provided, the CLI will use that file from now on.
    /// If omitted, the CLI prints the current configuration file path.
    Path {
        /// Optional new config path to set
        new_path: Option<String>,
    },
}

pub fn handle_config(action: Option<ConfigAction>, opts: &GlobalOpts) -> Result<(), CliError> {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => show_config(opts),
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            pbridge_logger::success(&format!("Set {} = {}", key, value));
            Ok(())
        }
        ConfigAction::Path { new_path } => match new_path {
            Some(path) => set_config_path(&path),
            None => {
                show_config_path();
                Ok(())
            }
        },
    }
}

fn show_config(opts: &GlobalOpts) -> Result<(), CliError> {
    let config = Config::load()?;
    println!("{}", "Configuration:".bold().green());
    if config.is_empty() {
        if opts.verbose > 0 {
            println!("  {}", "(empty)".yellow());
        }
    } else {
        for (key, value) in config.values_iter() {
            println!("  {}: {}", key.cyan(), value);
        }
    }
    Ok(())
}

fn set_config_path(path: &str) -> Result<(), CliError> {
    let pointer_path = Config::pointer_path();
    if let Some(parent) = pointer_path.parent() {
        fs::create_dir_all(parent).map_err(pbridge_config::ConfigError::from)?;
    }
    fs::write(&pointer_path, path.as_bytes()).map_err(pbridge_config::ConfigError::from)?;
    pbridge_logger::success(&format!("Config path set to {}", path));
    Ok(())
}

fn show_config_path() {
    let config_path = Config::path();
    pbridge_logger::debug(&format!("Reading config from: {}", config_path.display()));
    println!("{}", config_path.display());

    let pointer_path = Config::pointer_path();
    if let Ok(contents) = fs::read_to_string(&pointer_path) {
        let trimmed = contents.trim();
        if !trimmed.is_empty() {
            println!("{} {}", "overridden-by".cyan(), trimmed);
        }
    }
    if let Some(log_path) = pbridge_logger::get_log_path() {
        println!("{} {}", "log-file".cyan(), log_path.display());
    }
}
