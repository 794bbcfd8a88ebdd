//! Tool description types
//!
//! These mirror the host's module description: a module holds ordered
//! parameter groups and each group holds ordered parameter descriptors.
//! Descriptor fields stay in their textual form (the host encodes even the
//! multiplicity flag as text); typed views are provided by accessor methods.

use crate::tag::ParameterKind;
use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;

// =============================================================================
// MODULE DESCRIPTION
// =============================================================================

/// Declarative description of one CLI tool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleDescription {
    /// Module name used for lookups
    pub name: Arc<str>,
    #[serde(default)]
    pub title: Arc<str>,
    #[serde(default, skip_serializing_if = "str::is_empty")]
    pub category: Arc<str>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "str::is_empty")]
    pub version: Arc<str>,
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub contributors: SmallVec<[Arc<str>; 2]>,
    /// Other modules this tool needs loaded
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub dependencies: SmallVec<[Arc<str>; 2]>,
    /// Whether the tool has execution logic (can create run nodes)
    #[serde(default = "default_true")]
    pub runnable: bool,
    #[serde(default)]
    pub parameter_groups: Vec<ParameterGroup>,
}

fn default_true() -> bool {
    true
}

impl Default for ModuleDescription {
    fn default() -> Self {
        ModuleDescription {
            name: Arc::from(""),
            title: Arc::from(""),
            category: Arc::from(""),
            description: String::new(),
            version: Arc::from(""),
            contributors: SmallVec::new(),
            dependencies: SmallVec::new(),
            runnable: true,
            parameter_groups: Vec::new(),
        }
    }
}

impl ModuleDescription {
    /// First parameter with exactly this name, scanning groups in order
    pub fn find_parameter(&self, name: &str) -> Option<&ModuleParameter> {
        self.parameters().find(|p| p.name.as_ref() == name)
    }

    pub fn find_parameter_mut(&mut self, name: &str) -> Option<&mut ModuleParameter> {
        self.parameter_groups
            .iter_mut()
            .flat_map(|g| g.parameters.iter_mut())
            .find(|p| p.name.as_ref() == name)
    }

    /// All parameters in declaration order
    pub fn parameters(&self) -> impl Iterator<Item = &ModuleParameter> {
        self.parameter_groups.iter().flat_map(|g| g.parameters.iter())
    }

    pub fn parameter_count(&self) -> usize {
        self.parameter_groups.iter().map(|g| g.parameters.len()).sum()
    }
}

// =============================================================================
// PARAMETER GROUP
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParameterGroup {
    #[serde(default)]
    pub label: Arc<str>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub advanced: bool,
    #[serde(default)]
    pub parameters: Vec<ModuleParameter>,
}

// =============================================================================
// PARAMETER DESCRIPTOR
// =============================================================================

/// One CLI parameter as declared by its tool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleParameter {
    pub name: Arc<str>,
    #[serde(default)]
    pub label: Arc<str>,
    pub tag: Arc<str>,
    /// Text-encoded flag; only the literal `"true"` enables it
    #[serde(default = "default_multiple", deserialize_with = "text_or_bool")]
    pub multiple: Arc<str>,
    #[serde(default, skip_serializing_if = "str::is_empty")]
    pub channel: Arc<str>,
    /// Sub-type, e.g. `scalar` or `label` for images
    #[serde(default, rename = "type", skip_serializing_if = "str::is_empty")]
    pub ptype: Arc<str>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default: String,
    /// Current value as text
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    /// Allowed values for enumerations
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub elements: SmallVec<[Arc<str>; 4]>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<Arc<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longflag: Option<Arc<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

fn default_multiple() -> Arc<str> {
    Arc::from("false")
}

/// Accept `multiple = true` as well as `multiple = "true"` in catalog files
fn text_or_bool<'de, D>(deserializer: D) -> Result<Arc<str>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrBool {
        Bool(bool),
        Text(String),
    }

    Ok(match TextOrBool::deserialize(deserializer)? {
        TextOrBool::Bool(b) => Arc::from(if b { "true" } else { "false" }),
        TextOrBool::Text(s) => Arc::from(s),
    })
}

impl Default for ModuleParameter {
    fn default() -> Self {
        ModuleParameter {
            name: Arc::from(""),
            label: Arc::from(""),
            tag: Arc::from(""),
            multiple: default_multiple(),
            channel: Arc::from(""),
            ptype: Arc::from(""),
            default: String::new(),
            value: String::new(),
            elements: SmallVec::new(),
            description: String::new(),
            flag: None,
            longflag: None,
            index: None,
        }
    }
}

impl ModuleParameter {
    /// Convenience constructor used heavily in tests
    pub fn new(name: &str, tag: &str) -> Self {
        ModuleParameter {
            name: Arc::from(name),
            label: Arc::from(name),
            tag: Arc::from(tag),
            ..Default::default()
        }
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple.as_ref() == "true"
    }

    pub fn kind(&self) -> Option<ParameterKind> {
        ParameterKind::parse(&self.tag)
    }

    /// The value a control should start from: `value`, else `default`
    pub fn current_value(&self) -> &str {
        if self.value.is_empty() {
            &self.default
        } else {
            &self.value
        }
    }

    pub fn allowed_values(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|e| e.as_ref())
    }
}
