//! Chain endpoints from TOML (`[chains.<name>]` sections)

use serde::{Deserialize, Serialize};

/// Raw endpoint configuration for one chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChainConfig {
    /// HTTP(S) JSON-RPC endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
}

impl FileChainConfig {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: Some(rpc_url.into()),
        }
    }

    /// Endpoint with surrounding whitespace removed; `None` when blank.
    pub fn endpoint(&self) -> Option<&str> {
        self.rpc_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Raw RPC client settings (`[rpc]` section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRpcConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileRpcConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}
