//! Host-facing module facade
//!
//! The bridge registers with the host as a module. Two registrations exist,
//! the current pipeline bridge and the legacy one kept for older pipelines;
//! they differ only in naming and export metadata, which [`BridgeFlavor`]
//! supplies.

use crate::control::Toolkit;
use crate::factory::ParameterFactory;
use crate::provider::ToolProvider;
use serde::Serialize;
use std::marker::PhantomData;
use tracing::debug;

const HELP_TEXT: &str = "Bridges the parameter descriptions of CLI modules to the pipeline creator. \
Each bridge parameter exposes the current value of one CLI parameter in typed form together with \
a control for editing it. The bridge factory creates the matching bridge parameter type from the \
parameter's tag and multiplicity.";

const CONTRIBUTORS: &[&str] = &["Connor Bowley (Kitware, Inc.)"];

const CATEGORIES: &[&str] = &["Pipelines.Advanced"];

/// Naming and export metadata of one bridge registration
pub trait BridgeFlavor {
    const MODULE_NAME: &'static str;
    const TITLE: &'static str;
    const FACTORY_CLASS: &'static str;
    const ICON: &'static str;
    const ACKNOWLEDGEMENT: &'static str;
    const HIDDEN: bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineBridge;

impl BridgeFlavor for PipelineBridge {
    const MODULE_NAME: &'static str = "PipelineCLIBridge";
    const TITLE: &'static str = "Pipeline CLI Bridge";
    const FACTORY_CLASS: &'static str = "PipelineCLIModulesBridgeParameterFactory";
    const ICON: &'static str = ":/Icons/PipelineCLIBridge.png";
    const ACKNOWLEDGEMENT: &'static str = "";
    const HIDDEN: bool = false;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyPipelineBridge;

impl BridgeFlavor for LegacyPipelineBridge {
    const MODULE_NAME: &'static str = "LegacyPipelineCLIBridge";
    const TITLE: &'static str = "Legacy Pipeline CLI Bridge";
    const FACTORY_CLASS: &'static str = "LegacyPipelineCLIModulesBridgeParameterFactory";
    const ICON: &'static str = ":/Icons/LegacyPipelineCLIBridge.png";
    const ACKNOWLEDGEMENT: &'static str =
        "This module was originally developed by Connor Bowley (Kitware, Inc.) for SlicerSALT.";
    const HIDDEN: bool = true;
}

/// Module metadata in serializable form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleInfo {
    pub name: &'static str,
    pub title: &'static str,
    pub help: &'static str,
    pub acknowledgement: &'static str,
    pub contributors: Vec<&'static str>,
    pub categories: Vec<&'static str>,
    pub dependencies: Vec<&'static str>,
    pub icon: &'static str,
    pub hidden: bool,
    pub factory_class: &'static str,
}

/// The bridge module as registered with the host
#[derive(Debug)]
pub struct BridgeModule<F: BridgeFlavor> {
    setup_done: bool,
    _flavor: PhantomData<F>,
}

impl<F: BridgeFlavor> Default for BridgeModule<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: BridgeFlavor> BridgeModule<F> {
    pub fn new() -> Self {
        BridgeModule {
            setup_done: false,
            _flavor: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        F::MODULE_NAME
    }

    pub fn title(&self) -> &'static str {
        F::TITLE
    }

    pub fn help_text(&self) -> &'static str {
        HELP_TEXT
    }

    pub fn acknowledgement_text(&self) -> &'static str {
        F::ACKNOWLEDGEMENT
    }

    pub fn contributors(&self) -> &'static [&'static str] {
        CONTRIBUTORS
    }

    pub fn icon(&self) -> &'static str {
        F::ICON
    }

    pub fn categories(&self) -> &'static [&'static str] {
        CATEGORIES
    }

    pub fn dependencies(&self) -> &'static [&'static str] {
        &[]
    }

    pub fn is_hidden(&self) -> bool {
        F::HIDDEN
    }

    /// Lifecycle hook run once the host has loaded the module. Repeated
    /// calls do nothing.
    pub fn setup(&mut self) {
        if self.setup_done {
            return;
        }
        self.setup_done = true;
        debug!("Module '{}' set up", F::MODULE_NAME);
    }

    pub fn is_setup(&self) -> bool {
        self.setup_done
    }

    /// The bridge has no panel of its own
    pub fn create_widget_representation(&self) -> Option<()> {
        None
    }

    /// The bridge has no scene logic of its own
    pub fn create_logic(&self) -> Option<()> {
        None
    }

    /// Name under which the factory is exported to scripting
    pub fn factory_class_name(&self) -> &'static str {
        F::FACTORY_CLASS
    }

    pub fn new_factory<P: ToolProvider, K: Toolkit>(
        &self,
        provider: P,
        toolkit: K,
    ) -> ParameterFactory<P, K> {
        ParameterFactory::new(provider, toolkit)
    }

    pub fn info(&self) -> ModuleInfo {
        ModuleInfo {
            name: self.name(),
            title: self.title(),
            help: self.help_text(),
            acknowledgement: self.acknowledgement_text(),
            contributors: self.contributors().to_vec(),
            categories: self.categories().to_vec(),
            dependencies: self.dependencies().to_vec(),
            icon: self.icon(),
            hidden: self.is_hidden(),
            factory_class: self.factory_class_name(),
        }
    }
}
