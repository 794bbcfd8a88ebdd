//! CLI tool descriptions
//!
//! A tool description is the declarative record the host application keeps for
//! each command-line module: its metadata and an ordered list of parameter
//! groups, each holding parameter descriptors. Catalog files bundle several
//! descriptions and are stored as TOML, JSON or YAML.

pub mod errors;
pub mod manifest;
pub mod tag;
pub mod types;

pub use errors::ManifestError;
pub use manifest::{CatalogFormat, ToolManifest};
pub use tag::{BaseType, ParameterKind, TagShape};
pub use types::{ModuleDescription, ModuleParameter, ParameterGroup};
