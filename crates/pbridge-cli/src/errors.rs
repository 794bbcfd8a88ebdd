//! Errors surfaced by CLI commands

use pbridge_config::{CatalogPathError, ConfigError};
use pbridge_core::{BridgeError, ConversionError, PipelineError};
use pbridge_manifest::ManifestError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    CatalogPath(#[from] CatalogPathError),

    #[error("Failed to load tool catalog: {0}")]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No tool named '{0}' in the loaded catalogs")]
    ToolNotFound(String),

    #[error("Tool '{0}' could not be loaded")]
    ToolNotLoaded(String),

    #[error("Tool '{tool}' has no parameter named '{name}'")]
    ParameterNotFound { tool: String, name: String },
}

#[cfg(test)]
mod tests {
    use crate::errors::*;

    #[test]
    fn test_error_display() {
        let err = CliError::ParameterNotFound {
            tool: "Smoothing".to_string(),
            name: "radius".to_string(),
        };
        assert_eq!(err.to_string(), "Tool 'Smoothing' has no parameter named 'radius'");

        let err = CliError::from(PipelineError::ToolNotFound("Blur".to_string()));
        assert_eq!(err.to_string(), "Unable to find a CLI module with the name: Blur");
    }
}
