//! Configuration for the pbridge CLI parameter bridge
//!
//! The configuration file is a small TOML document listing where tool catalogs
//! live, which bridge flavor to present, and the default verbosity.

pub mod catalog_paths;
pub mod config;

pub use catalog_paths::{resolve_catalog_files, CatalogPathError, CATALOG_EXTENSIONS};
pub use config::{Config, ConfigError, Flavor, CONFIG_ENV_VAR};
