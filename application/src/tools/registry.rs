//! Tool Registry
//!
//! The [`ToolRegistry`] maps tool names to [`BlockchainTool`] implementations.
//! It is built once at startup and read concurrently afterwards.
//!
//! # Usage
//!
//! ```ignore
//! use blockagent_application::tools::{ToolRegistry, GetBalanceTool};
//!
//! let registry = ToolRegistry::new().register(GetBalanceTool::new());
//! let tool = registry.resolve("GET_BALANCE")?;
//! ```
//!
//! Registering a second tool under an existing name replaces the first.

use std::collections::HashMap;
use std::sync::Arc;

use blockagent_domain::{ToolDefinition, ToolError};

use super::{
    BlockchainTool, ContractCallTool, DeployContractTool, GetBalanceTool, NewWalletTool,
    SendNativeTool,
};

/// Name-keyed set of tools.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn BlockchainTool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registry holding every built-in tool
    pub fn builtin() -> Self {
        Self::new()
            .register(GetBalanceTool::new())
            .register(SendNativeTool::new())
            .register(DeployContractTool::new())
            .register(ContractCallTool::new())
            .register(NewWalletTool::new())
    }

    /// Register a tool
    pub fn register<T: BlockchainTool + 'static>(self, tool: T) -> Self {
        self.register_arc(Arc::new(tool))
    }

    /// Register a tool (Arc version)
    pub fn register_arc(mut self, tool: Arc<dyn BlockchainTool>) -> Self {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            tracing::debug!(tool = %name, "Replacing previously registered tool");
        }
        self.tools.insert(name, tool);
        self
    }

    /// Look a tool up by its exact name
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn BlockchainTool>, ToolError> {
        self.tools
            .get(name)
            .cloned()
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Definitions of all tools, sorted by name
    pub fn definitions(&self) -> Vec<&ToolDefinition> {
        let mut defs: Vec<_> = self.tools.values().map(|t| t.definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Sorted tool names
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
