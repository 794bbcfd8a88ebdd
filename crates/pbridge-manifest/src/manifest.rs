//! Tool catalogs: collections of module descriptions loaded from disk

use crate::errors::ManifestError;
use crate::types::ModuleDescription;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// On-disk encoding of a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Toml,
    Json,
    Yaml,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("toml") => Ok(CatalogFormat::Toml),
            Some("json") => Ok(CatalogFormat::Json),
            Some("yaml" | "yml") => Ok(CatalogFormat::Yaml),
            _ => Err(ManifestError::UnknownFormat(path.to_path_buf())),
        }
    }
}

/// A set of tool descriptions indexed by module name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolManifest {
    #[serde(default = "default_version")]
    pub version: Arc<str>,
    #[serde(default)]
    pub tools: Vec<ModuleDescription>,

    /// Runtime only - rebuilt on load for O(1) tool lookup
    #[serde(skip)]
    pub tool_index: AHashMap<Arc<str>, usize>,
}

fn default_version() -> Arc<str> {
    Arc::from("1.0")
}

impl Default for ToolManifest {
    fn default() -> Self {
        ToolManifest {
            version: default_version(),
            tools: Vec::new(),
            tool_index: AHashMap::new(),
        }
    }
}

impl ToolManifest {
    /// Parse catalog text in the given format
    pub fn parse(content: &str, format: CatalogFormat) -> Result<Self, ManifestError> {
        let mut manifest: ToolManifest = match format {
            CatalogFormat::Toml => toml::from_str(content)?,
            CatalogFormat::Json => serde_json::from_str(content)?,
            CatalogFormat::Yaml => serde_yaml::from_str(content)?,
        };
        manifest.validate()?;
        manifest.rebuild_index();
        Ok(manifest)
    }

    /// Read a catalog, inferring the format from the file extension
    pub fn load_from_path(path: &Path) -> Result<Self, ManifestError> {
        debug!("Reading tool catalog from: {:?}", path);
        let format = CatalogFormat::from_path(path)?;
        let content = fs::read_to_string(path)?;
        let manifest = Self::parse(&content, format)?;
        info!(
            "Loaded {} tool description(s) from {:?}",
            manifest.tools.len(),
            path
        );
        Ok(manifest)
    }

    /// Load and merge several catalog files, later files overriding earlier ones
    pub fn load_all(paths: &[impl AsRef<Path>]) -> Result<Self, ManifestError> {
        let mut merged = ToolManifest::default();
        for path in paths {
            merged.merge(Self::load_from_path(path.as_ref())?);
        }
        Ok(merged)
    }

    fn validate(&self) -> Result<(), ManifestError> {
        for tool in &self.tools {
            if tool.name.trim().is_empty() {
                return Err(ManifestError::InvalidTool(format!(
                    "tool titled '{}' has no name",
                    tool.title
                )));
            }
            if let Some(param) = tool.parameters().find(|p| p.name.trim().is_empty()) {
                return Err(ManifestError::InvalidTool(format!(
                    "tool '{}' has a '{}' parameter without a name",
                    tool.name, param.tag
                )));
            }
        }
        Ok(())
    }

    /// Rebuild the name index. On duplicate names the last description wins.
    pub fn rebuild_index(&mut self) {
        self.tool_index.clear();
        for (idx, tool) in self.tools.iter().enumerate() {
            if self.tool_index.insert(tool.name.clone(), idx).is_some() {
                warn!("Duplicate tool '{}' in catalog, keeping the last one", tool.name);
            }
        }
    }

    /// Add every tool of `other`, replacing same-named tools
    pub fn merge(&mut self, other: ToolManifest) {
        for tool in other.tools {
            match self.tool_index.get(&tool.name) {
                Some(&idx) => {
                    warn!("Tool '{}' redefined, replacing earlier description", tool.name);
                    self.tools[idx] = tool;
                }
                None => {
                    self.tool_index.insert(tool.name.clone(), self.tools.len());
                    self.tools.push(tool);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::manifest::*;
    use tempfile::TempDir;

    fn tool<'a>(manifest: &'a ToolManifest, name: &str) -> Option<&'a ModuleDescription> {
        manifest.tools.iter().find(|t| t.name.as_ref() == name)
    }

    const TOML_CATALOG: &str = r#"
version = "1.0"

[[tools]]
name = "Threshold"
title = "Threshold Scalar Volume"
category = "Filtering"

[[tools.parameter_groups]]
label = "Parameters"

[[tools.parameter_groups.parameters]]
name = "iterations"
tag = "integer"
value = "3"

[[tools.parameter_groups.parameters]]
name = "mode"
tag = "string-enumeration"
elements = ["Below", "Above", "Outside"]
default = "Below"
"#;

    #[test]
    fn test_parse_toml_catalog() {
        let result = ToolManifest::parse(TOML_CATALOG, CatalogFormat::Toml);
        let Ok(manifest) = result else {
            panic!("catalog should parse: {:?}", result.err());
        };
        let Some(tool) = tool(&manifest, "Threshold") else {
            panic!("Threshold should be indexed");
        };
        assert!(tool.runnable);
        assert_eq!(tool.parameter_count(), 2);
        assert!(tool
            .find_parameter("mode")
            .is_some_and(|p| p.elements.len() == 3 && p.current_value() == "Below"));
    }

    #[test]
    fn test_parse_json_and_yaml_catalogs() {
        let json = r#"{"tools": [{"name": "Resample", "runnable": false,
            "parameter_groups": [{"parameters": [
                {"name": "spacing", "tag": "double-vector", "default": "1,1,1"}]}]}]}"#;
        let json_manifest = ToolManifest::parse(json, CatalogFormat::Json);
        assert!(json_manifest.is_ok_and(|m| tool(&m, "Resample").is_some_and(|t| !t.runnable)));

        let yaml = "tools:\n  - name: Smooth\n    parameter_groups:\n      - parameters:\n          - name: radius\n            tag: float\n            multiple: \"true\"\n";
        let yaml_manifest = ToolManifest::parse(yaml, CatalogFormat::Yaml);
        assert!(yaml_manifest.is_ok_and(|m| tool(&m, "Smooth")
            .and_then(|t| t.find_parameter("radius"))
            .is_some_and(|p| p.is_multiple())));
    }

    #[test]
    fn test_rejects_unnamed_tool() {
        let result = ToolManifest::parse("[[tools]]\ntitle = \"x\"\nname = \" \"\n", CatalogFormat::Toml);
        assert!(matches!(result, Err(ManifestError::InvalidTool(_))));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            CatalogFormat::from_path(Path::new("a/b.YML")).ok(),
            Some(CatalogFormat::Yaml)
        );
        assert!(matches!(
            CatalogFormat::from_path(Path::new("tools.xml")),
            Err(ManifestError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_merge_replaces_same_name() {
        let first = ToolManifest::parse(
            "[[tools]]\nname = \"Blur\"\ntitle = \"old\"\n",
            CatalogFormat::Toml,
        );
        let second = ToolManifest::parse(
            r#"{"tools": [{"name": "Blur", "title": "new"}, {"name": "Add"}]}"#,
            CatalogFormat::Json,
        );
        let (Ok(mut first), Ok(second)) = (first, second) else {
            panic!("manifests should parse");
        };
        first.merge(second);
        assert_eq!(first.tools.len(), 2);
        assert!(tool(&first, "Blur").is_some_and(|t| t.title.as_ref() == "new"));
        assert_eq!(first.tool_index.get("Add"), Some(&1));
    }

    #[test]
    fn test_load_all_merges_in_order() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let first = temp_dir.path().join("base.yaml");
        let second = temp_dir.path().join("override.toml");
        assert!(std::fs::write(&first, "tools:\n  - name: Mask\n    title: Base\n").is_ok());
        let toml = "[[tools]]\nname = \"Mask\"\ntitle = \"Override\"\n";
        assert!(std::fs::write(&second, toml).is_ok());

        let loaded = ToolManifest::load_all(&[first, second]);
        assert!(loaded.is_ok_and(|m| m.tools.len() == 1
            && tool(&m, "Mask").is_some_and(|t| t.title.as_ref() == "Override")));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ToolManifest::load_from_path(Path::new("/nonexistent/pbridge/tools.toml"));
        assert!(matches!(result, Err(ManifestError::Io(_))));
    }
}
