//! Chain resolver port
//!
//! Maps an optional chain selector to a [`ChainClient`] handle. Adapters
//! decide where endpoints come from (config file, environment).

use std::sync::Arc;

use blockagent_domain::ToolError;

use super::chain_client::ChainClient;

/// Port for selecting the chain client of a request.
pub trait ChainResolver: Send + Sync {
    /// Build a client for `chain` (or the default chain).
    ///
    /// Fails with [`ToolError::ChainConfigMissing`] when no endpoint is
    /// configured for the selected chain.
    fn resolve(&self, chain: Option<&str>) -> Result<Arc<dyn ChainClient>, ToolError>;
}
