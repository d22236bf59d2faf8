//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod audit;
mod chains;
mod policy;
mod signer;

pub use audit::FileAuditConfig;
pub use chains::{FileChainConfig, FileRpcConfig};
pub use policy::FilePolicyConfig;
pub use signer::{DEFAULT_PRIVATE_KEY_ENV, FileSignerConfig};

use blockagent_domain::ConfigIssue;
use blockagent_domain::policy::DEFAULT_ALLOWED_TOOLS;
use ethers_core::utils::parse_ether;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Chain used when a request names none
pub const DEFAULT_CHAIN: &str = "celo";

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chain used when a request does not select one
    pub default_chain: String,
    /// Endpoints keyed by chain name (matched case-insensitively)
    pub chains: BTreeMap<String, FileChainConfig>,
    /// Inline policy; overridden by `policy_file` when set
    pub policy: FilePolicyConfig,
    /// Optional JSON policy file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_file: Option<PathBuf>,
    pub signer: FileSignerConfig,
    pub rpc: FileRpcConfig,
    pub audit: FileAuditConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            default_chain: DEFAULT_CHAIN.to_string(),
            chains: BTreeMap::new(),
            policy: FilePolicyConfig::default(),
            policy_file: None,
            signer: FileSignerConfig::default(),
            rpc: FileRpcConfig::default(),
            audit: FileAuditConfig::default(),
        }
    }
}

impl FileConfig {
    /// Look a chain up by name, ignoring ASCII case.
    pub fn chain(&self, name: &str) -> Option<&FileChainConfig> {
        self.chains
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, chain)| chain)
    }

    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks:
    /// 1. Default chain has an endpoint
    /// 2. Every endpoint is a non-blank http(s) URL, names are unique
    /// 3. Policy ceiling parses as a decimal amount, tools are known
    /// 4. RPC timeout and signer settings are usable
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Default chain
        if self.default_chain.trim().is_empty() {
            issues.push(ConfigIssue::error("default_chain", "must not be empty"));
        } else if self.chain(&self.default_chain).and_then(|c| c.endpoint()).is_none() {
            issues.push(ConfigIssue::warning(
                "default_chain",
                format!(
                    "no rpc_url configured for '{}'; requests without a chain will fail",
                    self.default_chain
                ),
            ));
        }

        // 2. Chain endpoints
        let mut seen: Vec<String> = Vec::new();
        for (name, chain) in &self.chains {
            let field = format!("chains.{}.rpc_url", name);
            match chain.endpoint() {
                None => issues.push(ConfigIssue::warning(field, "no endpoint configured")),
                Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                    issues.push(ConfigIssue::error(
                        field,
                        format!("'{}' is not an http(s) URL", url),
                    ))
                }
                Some(_) => {}
            }

            let lowered = name.to_ascii_lowercase();
            if seen.contains(&lowered) {
                issues.push(ConfigIssue::warning(
                    format!("chains.{}", name),
                    "duplicate chain name (names are case-insensitive)",
                ));
            }
            seen.push(lowered);
        }

        // 3. Policy
        if let Some(max) = &self.policy.max_amount_ether
            && let Err(e) = parse_ether(max.trim())
        {
            issues.push(ConfigIssue::error(
                "policy.max_amount_ether",
                format!("'{}' is not a decimal amount: {}", max, e),
            ));
        }
        if let Some(tools) = &self.policy.allowed_tools {
            for tool in tools {
                if !DEFAULT_ALLOWED_TOOLS.contains(&tool.trim()) {
                    issues.push(ConfigIssue::warning(
                        "policy.allowed_tools",
                        format!("'{}' is not a built-in tool", tool),
                    ));
                }
            }
        }
        if let Some(path) = &self.policy_file
            && !path.exists()
        {
            issues.push(ConfigIssue::error(
                "policy_file",
                format!("{} does not exist", path.display()),
            ));
        }

        // 4. Client settings
        if self.rpc.timeout_secs == 0 {
            issues.push(ConfigIssue::error("rpc.timeout_secs", "must be greater than 0"));
        }
        if self.signer.private_key_env.trim().is_empty() {
            issues.push(ConfigIssue::error(
                "signer.private_key_env",
                "must name an environment variable",
            ));
        }

        issues
    }
}
