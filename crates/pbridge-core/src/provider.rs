//! Tool descriptions and run nodes
//!
//! The host application owns the tool descriptions and a container of run
//! nodes (one per tool invocation). The factory only borrows that container
//! through [`ToolProvider`]. [`ToolCatalog`] is the in-memory provider backed
//! by catalog files.

use ahash::AHashMap;
use pbridge_manifest::{ManifestError, ModuleDescription, ToolManifest};
use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;
use tracing::debug;

/// Identity of a run node inside its provider's container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunNodeId(pub u64);

/// One invocation of a tool, holding its own copy of the description so
/// parameter values can be edited per run
#[derive(Debug, Clone)]
pub struct RunNode {
    id: RunNodeId,
    tool: Arc<str>,
    description: ModuleDescription,
}

impl RunNode {
    pub fn new(id: RunNodeId, tool: Arc<str>, description: ModuleDescription) -> Self {
        RunNode {
            id,
            tool,
            description,
        }
    }

    pub fn id(&self) -> RunNodeId {
        self.id
    }

    pub fn tool_name(&self) -> &str {
        &self.tool
    }

    pub fn description(&self) -> &ModuleDescription {
        &self.description
    }

    /// Set the text value of a parameter. Returns false when the node has no
    /// parameter with that name.
    pub fn set_parameter_value(&mut self, name: &str, value: &str) -> bool {
        match self.description.find_parameter_mut(name) {
            Some(param) => {
                param.value = value.to_string();
                true
            }
            None => false,
        }
    }
}

/// Source of tool descriptions and owner of run nodes
pub trait ToolProvider {
    /// Look up a tool by its exact module name
    fn find_tool(&self, name: &str) -> Option<Arc<ModuleDescription>>;

    /// Whether the tool has execution logic
    fn supports_runs(&self, tool: &ModuleDescription) -> bool {
        tool.runnable
    }

    /// Create a run node for `tool` and add it to the provider's container
    fn create_run_node(&self, name: &str, tool: &Arc<ModuleDescription>) -> Option<RunNode>;

    /// Remove a node previously returned by [`ToolProvider::create_run_node`]
    fn remove_run_node(&self, node: &RunNode);
}

impl<T: ToolProvider + ?Sized> ToolProvider for &T {
    fn find_tool(&self, name: &str) -> Option<Arc<ModuleDescription>> {
        (**self).find_tool(name)
    }

    fn supports_runs(&self, tool: &ModuleDescription) -> bool {
        (**self).supports_runs(tool)
    }

    fn create_run_node(&self, name: &str, tool: &Arc<ModuleDescription>) -> Option<RunNode> {
        (**self).create_run_node(name, tool)
    }

    fn remove_run_node(&self, node: &RunNode) {
        (**self).remove_run_node(node);
    }
}

impl<T: ToolProvider + ?Sized> ToolProvider for Rc<T> {
    fn find_tool(&self, name: &str) -> Option<Arc<ModuleDescription>> {
        (**self).find_tool(name)
    }

    fn supports_runs(&self, tool: &ModuleDescription) -> bool {
        (**self).supports_runs(tool)
    }

    fn create_run_node(&self, name: &str, tool: &Arc<ModuleDescription>) -> Option<RunNode> {
        (**self).create_run_node(name, tool)
    }

    fn remove_run_node(&self, node: &RunNode) {
        (**self).remove_run_node(node);
    }
}

// =============================================================================
// TOOL CATALOG
// =============================================================================

/// In-memory provider built from catalog files
#[derive(Debug, Default)]
pub struct ToolCatalog {
    tools: AHashMap<Arc<str>, Arc<ModuleDescription>>,
    scene: RefCell<Vec<RunNodeId>>,
    next_id: Cell<u64>,
}

impl ToolCatalog {
    pub fn from_manifest(manifest: ToolManifest) -> Self {
        let mut tools = AHashMap::with_capacity(manifest.tools.len());
        // Later descriptions replace earlier ones with the same name
        for tool in manifest.tools {
            tools.insert(tool.name.clone(), Arc::new(tool));
        }
        ToolCatalog {
            tools,
            ..Default::default()
        }
    }

    /// Load and merge catalog files in order
    pub fn load(paths: &[impl AsRef<Path>]) -> Result<Self, ManifestError> {
        Ok(Self::from_manifest(ToolManifest::load_all(paths)?))
    }

    /// Tool names, sorted
    pub fn tool_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|k| k.as_ref()).collect();
        names.sort_unstable();
        names
    }

    /// Tool descriptions, sorted by name
    pub fn tools(&self) -> Vec<&Arc<ModuleDescription>> {
        let mut tools: Vec<&Arc<ModuleDescription>> = self.tools.values().collect();
        tools.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Number of run nodes currently in the container
    pub fn run_node_count(&self) -> usize {
        self.scene.borrow().len()
    }

    pub fn contains_run_node(&self, id: RunNodeId) -> bool {
        self.scene.borrow().contains(&id)
    }
}

impl ToolProvider for ToolCatalog {
    fn find_tool(&self, name: &str) -> Option<Arc<ModuleDescription>> {
        self.tools.get(name).cloned()
    }

    fn create_run_node(&self, name: &str, tool: &Arc<ModuleDescription>) -> Option<RunNode> {
        if !self.supports_runs(tool) {
            return None;
        }
        let id = RunNodeId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.scene.borrow_mut().push(id);
        debug!("Created run node {} for tool '{}'", id.0, name);
        Some(RunNode::new(id, Arc::from(name), (**tool).clone()))
    }

    fn remove_run_node(&self, node: &RunNode) {
        let mut scene = self.scene.borrow_mut();
        if let Some(pos) = scene.iter().position(|id| *id == node.id()) {
            scene.remove(pos);
            debug!("Removed run node {} for tool '{}'", node.id().0, node.tool_name());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::provider::*;
    use pbridge_manifest::{ModuleParameter, ParameterGroup};

    fn catalog() -> ToolCatalog {
        let blur = ModuleDescription {
            name: Arc::from("GaussianBlur"),
            parameter_groups: vec![ParameterGroup {
                parameters: vec![ModuleParameter::new("sigma", "double")],
                ..Default::default()
            }],
            ..Default::default()
        };
        let docs = ModuleDescription {
            name: Arc::from("Documentation"),
            runnable: false,
            ..Default::default()
        };
        let manifest = ToolManifest {
            tools: vec![blur, docs],
            ..Default::default()
        };
        ToolCatalog::from_manifest(manifest)
    }

    #[test]
    fn test_find_tool_is_exact() {
        let catalog = catalog();
        assert!(catalog.find_tool("GaussianBlur").is_some());
        assert!(catalog.find_tool("gaussianblur").is_none());
        assert_eq!(catalog.tool_names(), vec!["Documentation", "GaussianBlur"]);
    }

    #[test]
    fn test_run_nodes_are_tracked() {
        let catalog = catalog();
        let Some(tool) = catalog.find_tool("GaussianBlur") else {
            panic!("tool should exist");
        };
        let first = catalog.create_run_node("GaussianBlur", &tool);
        let second = catalog.create_run_node("GaussianBlur", &tool);
        assert_eq!(catalog.run_node_count(), 2);

        let (Some(first), Some(second)) = (first, second) else {
            panic!("run nodes should be created");
        };
        assert_ne!(first.id(), second.id());
        catalog.remove_run_node(&first);
        assert_eq!(catalog.run_node_count(), 1);
        assert!(catalog.contains_run_node(second.id()));

        // Removing twice is harmless
        catalog.remove_run_node(&first);
        assert_eq!(catalog.run_node_count(), 1);
    }

    #[test]
    fn test_non_runnable_tool_has_no_run_node() {
        let catalog = catalog();
        let Some(tool) = catalog.find_tool("Documentation") else {
            panic!("tool should exist");
        };
        assert!(!catalog.supports_runs(&tool));
        assert!(catalog.create_run_node("Documentation", &tool).is_none());
        assert_eq!(catalog.run_node_count(), 0);
    }

    #[test]
    fn test_run_node_values_do_not_touch_catalog() {
        let catalog = catalog();
        let Some(tool) = catalog.find_tool("GaussianBlur") else {
            panic!("tool should exist");
        };
        let Some(mut node) = catalog.create_run_node("GaussianBlur", &tool) else {
            panic!("run node should be created");
        };
        assert!(node.set_parameter_value("sigma", "2.5"));
        assert!(!node.set_parameter_value("radius", "1"));
        assert!(node
            .description()
            .find_parameter("sigma")
            .is_some_and(|p| p.value == "2.5"));
        assert!(tool.find_parameter("sigma").is_some_and(|p| p.value.is_empty()));
    }

    #[test]
    fn test_load_from_catalog_files() {
        let Ok(dir) = tempfile::TempDir::new() else {
            panic!("temp dir should be created");
        };
        let first = dir.path().join("a.toml");
        let second = dir.path().join("b.json");
        let toml = "[[tools]]\nname = \"Blur\"\ntitle = \"Old\"\n";
        let json = r#"{"tools": [{"name": "Blur", "title": "New", "runnable": false}]}"#;
        assert!(std::fs::write(&first, toml).is_ok());
        assert!(std::fs::write(&second, json).is_ok());

        let loaded = ToolCatalog::load(&[first, second]);
        let Ok(catalog) = loaded else {
            panic!("catalogs should load");
        };
        assert_eq!(catalog.len(), 1);
        assert!(catalog
            .find_tool("Blur")
            .is_some_and(|t| t.title.as_ref() == "New" && !t.runnable));
    }

    #[test]
    fn test_provider_through_rc() {
        let catalog = Rc::new(catalog());
        let shared = Rc::clone(&catalog);
        let Some(tool) = shared.find_tool("GaussianBlur") else {
            panic!("tool should exist");
        };
        let node = shared.create_run_node("GaussianBlur", &tool);
        assert!(node.is_some());
        assert_eq!(catalog.run_node_count(), 1);
    }
}
