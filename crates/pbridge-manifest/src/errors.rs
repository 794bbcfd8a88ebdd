use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading tool catalogs
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Cannot infer catalog format from path: {0}")]
    UnknownFormat(PathBuf),

    #[error("Invalid tool description: {0}")]
    InvalidTool(String),
}
