//! Chain resolver backed by the `[chains]` configuration.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use blockagent_application::{ChainClient, ChainError, ChainResolver};
use blockagent_domain::ToolError;
use tracing::debug;

use super::evm_client::EvmChainClient;
use super::json_rpc::RpcTransport;
use crate::config::FileConfig;
use crate::signer::KeySource;

/// Builds an [`EvmChainClient`] per request from configured endpoints.
///
/// Chain names are matched case-insensitively. All clients share one HTTP
/// connection pool.
pub struct ConfiguredChainResolver {
    endpoints: BTreeMap<String, String>,
    default_chain: Option<String>,
    timeout: Duration,
    http: reqwest::Client,
    keys: Arc<dyn KeySource>,
}

impl ConfiguredChainResolver {
    pub fn from_config(config: &FileConfig, keys: Arc<dyn KeySource>) -> Result<Self, ChainError> {
        let endpoints = config
            .chains
            .iter()
            .filter_map(|(name, chain)| {
                chain
                    .endpoint()
                    .map(|url| (name.to_ascii_lowercase(), url.to_string()))
            })
            .collect();

        let default_chain = Some(config.default_chain.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_ascii_lowercase);

        let timeout = Duration::from_secs(config.rpc.timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChainError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoints,
            default_chain,
            timeout,
            http,
            keys,
        })
    }
}

impl ChainResolver for ConfiguredChainResolver {
    fn resolve(&self, chain: Option<&str>) -> Result<Arc<dyn ChainClient>, ToolError> {
        let name = match chain.map(str::trim).filter(|c| !c.is_empty()) {
            Some(name) => name.to_ascii_lowercase(),
            None => self
                .default_chain
                .clone()
                .ok_or_else(|| ToolError::ChainConfigMissing("default".into()))?,
        };

        let url = self
            .endpoints
            .get(&name)
            .ok_or_else(|| ToolError::ChainConfigMissing(name.clone()))?;

        debug!(chain = %name, url = %url, "Resolved chain");
        let transport = RpcTransport::with_client(self.http.clone(), url.clone(), self.timeout);
        Ok(Arc::new(EvmChainClient::with_transport(
            name,
            transport,
            self.keys.clone(),
        )))
    }
}
