//! Common types and utilities shared across commands

use crate::errors::CliError;
use clap::Parser;
use pbridge_config::{resolve_catalog_files, Config};
use pbridge_core::ToolCatalog;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Global CLI options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    #[arg(short, long, global = true, help = "Only print warnings and errors")]
    pub quiet: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity (-v for debug, -vv for trace)")]
    pub verbose: u8,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Catalog file or directory to load (repeatable, overrides the configured catalogs)"
    )]
    pub catalog: Vec<PathBuf>,
}

impl GlobalOpts {
    /// Effective verbosity: `-q` wins, then `-v` flags, then the configured level
    pub fn verbosity_level(&self, config: &Config) -> u8 {
        if self.quiet {
            0
        } else if self.verbose > 0 {
            self.verbose
        } else {
            config.verbosity.unwrap_or(0)
        }
    }

    /// Catalog locations to load.
    ///
    /// Command-line paths take precedence. Configured paths are relative to
    /// the config file's directory. With neither, the default catalog
    /// directory is used when it exists.
    pub fn catalog_entries(&self, config: &Config) -> Vec<PathBuf> {
        if !self.catalog.is_empty() {
            return self.catalog.clone();
        }
        if !config.catalogs.is_empty() {
            let config_path = Config::path();
            let base = config_path.parent().unwrap_or_else(|| Path::new("."));
            return config.catalogs.iter().map(|c| base.join(c)).collect();
        }
        let default_dir = Config::default_catalog_dir();
        if default_dir.is_dir() {
            vec![default_dir]
        } else {
            Vec::new()
        }
    }

    /// Load every catalog into one in-memory provider
    pub fn load_catalog(&self, config: &Config) -> Result<ToolCatalog, CliError> {
        let files = resolve_catalog_files(&self.catalog_entries(config))?;
        debug!("Loading {} catalog file(s): {:?}", files.len(), files);
        Ok(ToolCatalog::load(files.as_slice())?)
    }
}
