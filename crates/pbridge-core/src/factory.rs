//! Wrapper factory
//!
//! The factory resolves a tool through its provider, keeps one run node of that
//! tool, and creates wrappers for the node's parameters on request. It owns
//! every wrapper it creates; they live until [`ParameterFactory::release_all`]
//! or until the factory is dropped, which also removes the run node from the
//! provider's container.
//!
//! Lookup failures (no tool loaded, unknown parameter name, tool resolution)
//! are reported on the diagnostic channel and surface as absent results.
//! Only a descriptor outside the matching table, or a value that fails to
//! convert, is an error.

use crate::control::{HeadlessToolkit, Toolkit};
use crate::errors::BridgeError;
use crate::parameters::{BridgeParameter, WrapperKind};
use crate::provider::{RunNode, ToolProvider};
use pbridge_manifest::ModuleParameter;
use std::ops::{Index, IndexMut};
use tracing::debug;

/// Handle to a wrapper owned by a [`ParameterFactory`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WrapperId(usize);

impl WrapperId {
    pub fn index(self) -> usize {
        self.0
    }
}

pub struct ParameterFactory<P: ToolProvider, K: Toolkit = HeadlessToolkit> {
    provider: P,
    toolkit: K,
    wrappers: Vec<BridgeParameter>,
    node: Option<RunNode>,
}

impl<P: ToolProvider> ParameterFactory<P> {
    /// Factory producing headless controls
    pub fn headless(provider: P) -> Self {
        Self::new(provider, HeadlessToolkit)
    }
}

impl<P: ToolProvider, K: Toolkit> ParameterFactory<P, K> {
    pub fn new(provider: P, toolkit: K) -> Self {
        ParameterFactory {
            provider,
            toolkit,
            wrappers: Vec::new(),
            node: None,
        }
    }

    /// Make `name` the active tool.
    ///
    /// Any previously retained run node is removed from the provider first.
    /// Resolution stops at the first failing step with a diagnostic, leaving
    /// no active tool.
    pub fn load_tool(&mut self, name: &str) {
        self.release_node();
        self.node = self.resolve_run_node(name);
    }

    fn resolve_run_node(&self, name: &str) -> Option<RunNode> {
        let Some(tool) = self.provider.find_tool(name) else {
            pbridge_logger::warn(&format!("Unable to find a CLI module with the name: {}", name));
            return None;
        };
        if !self.provider.supports_runs(&tool) {
            pbridge_logger::warn(&format!(
                "Unable to find CLI logic for module with the name: {}",
                name
            ));
            return None;
        }
        let Some(node) = self.provider.create_run_node(name, &tool) else {
            pbridge_logger::warn(&format!(
                "Unable to create a run node for module with the name: {}",
                name
            ));
            return None;
        };
        debug!("Loaded tool '{}' as run node {}", name, node.id().0);
        Some(node)
    }

    fn release_node(&mut self) {
        if let Some(node) = self.node.take() {
            self.provider.remove_run_node(&node);
        }
    }

    /// Create a wrapper for the active tool's parameter called `name`.
    ///
    /// Returns `Ok(None)` when no tool is loaded or the tool has no such
    /// parameter.
    pub fn create_wrapper_by_name(&mut self, name: &str) -> Result<Option<WrapperId>, BridgeError> {
        let Some(node) = &self.node else {
            pbridge_logger::warn("Must load a cli module before creating parameter wrappers");
            return Ok(None);
        };
        let Some(descriptor) = node.description().find_parameter(name).cloned() else {
            pbridge_logger::warn(&format!("Unable to find parameter with name: {}", name));
            return Ok(None);
        };
        self.create_wrapper(&descriptor).map(Some)
    }

    /// Create, initialize and store the wrapper matching `descriptor`
    pub fn create_wrapper(&mut self, descriptor: &ModuleParameter) -> Result<WrapperId, BridgeError> {
        let Some(kind) = WrapperKind::for_parameter(descriptor) else {
            let err = BridgeError::UnrecognizedParameter {
                name: descriptor.name.to_string(),
                tag: descriptor.tag.to_string(),
                multiple: descriptor.is_multiple(),
            };
            pbridge_logger::error(&err.to_string());
            return Err(err);
        };

        let wrapper = BridgeParameter::create(kind, descriptor, &self.toolkit)?;
        let id = WrapperId(self.wrappers.len());
        debug!("Created {} wrapper for '{}'", kind, descriptor.name);
        self.wrappers.push(wrapper);
        Ok(id)
    }

    pub fn wrapper(&self, id: WrapperId) -> Option<&BridgeParameter> {
        self.wrappers.get(id.0)
    }

    pub fn wrapper_mut(&mut self, id: WrapperId) -> Option<&mut BridgeParameter> {
        self.wrappers.get_mut(id.0)
    }

    /// Wrappers in creation order
    pub fn iter(&self) -> impl Iterator<Item = (WrapperId, &BridgeParameter)> {
        self.wrappers
            .iter()
            .enumerate()
            .map(|(idx, wrapper)| (WrapperId(idx), wrapper))
    }

    pub fn len(&self) -> usize {
        self.wrappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wrappers.is_empty()
    }

    /// Drop every wrapper; previously issued ids become invalid
    pub fn release_all(&mut self) {
        if !self.wrappers.is_empty() {
            debug!("Releasing {} wrapper(s)", self.wrappers.len());
        }
        self.wrappers.clear();
    }

    pub fn active_node(&self) -> Option<&RunNode> {
        self.node.as_ref()
    }

    pub fn active_node_mut(&mut self) -> Option<&mut RunNode> {
        self.node.as_mut()
    }

    pub fn has_tool(&self) -> bool {
        self.node.is_some()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn toolkit(&self) -> &K {
        &self.toolkit
    }
}

impl<P: ToolProvider, K: Toolkit> Index<WrapperId> for ParameterFactory<P, K> {
    type Output = BridgeParameter;

    fn index(&self, id: WrapperId) -> &BridgeParameter {
        &self.wrappers[id.0]
    }
}

impl<P: ToolProvider, K: Toolkit> IndexMut<WrapperId> for ParameterFactory<P, K> {
    fn index_mut(&mut self, id: WrapperId) -> &mut BridgeParameter {
        &mut self.wrappers[id.0]
    }
}

impl<P: ToolProvider, K: Toolkit> Drop for ParameterFactory<P, K> {
    fn drop(&mut self) {
        self.release_all();
        self.release_node();
    }
}
