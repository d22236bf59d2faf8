//! Execution policy from TOML (`[policy]` section) or a JSON policy file
//!
//! Both snake_case and camelCase keys are accepted, so a JSON file of the
//! form `{ "allowedTools": [...], "maxAmountEther": "1.0",
//! "blockedMethods": [...] }` loads into the same struct.

use blockagent_domain::Policy;
use blockagent_domain::policy::{
    DEFAULT_ALLOWED_TOOLS, DEFAULT_BLOCKED_METHODS, DEFAULT_MAX_AMOUNT,
};
use serde::{Deserialize, Serialize};

/// Raw policy configuration; unset fields fall back to the built-in policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePolicyConfig {
    #[serde(alias = "allowedTools", skip_serializing_if = "Option::is_none")]
    pub allowed_tools: Option<Vec<String>>,
    /// Transfer ceiling in whole native units, as a decimal string
    #[serde(alias = "maxAmountEther", skip_serializing_if = "Option::is_none")]
    pub max_amount_ether: Option<String>,
    #[serde(alias = "blockedMethods", skip_serializing_if = "Option::is_none")]
    pub blocked_methods: Option<Vec<String>>,
}

impl FilePolicyConfig {
    /// Build the immutable domain policy.
    pub fn to_policy(&self) -> Policy {
        let allowed: Vec<String> = match &self.allowed_tools {
            Some(tools) => tools.clone(),
            None => DEFAULT_ALLOWED_TOOLS.iter().map(|t| t.to_string()).collect(),
        };
        let blocked: Vec<String> = match &self.blocked_methods {
            Some(methods) => methods.clone(),
            None => DEFAULT_BLOCKED_METHODS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        };
        Policy::new(
            allowed,
            self.max_amount_ether
                .as_deref()
                .unwrap_or(DEFAULT_MAX_AMOUNT),
            blocked,
        )
    }
}
