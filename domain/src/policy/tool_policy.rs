//! Tool policy: static allow/deny rules for the execution pipeline.
//!
//! [`Policy`] is loaded once at startup and shared read-only. The rules here
//! are pure; unit conversion for the amount ceiling happens in the
//! application layer, which hands both sides to [`Policy::check_amount`]
//! already converted to the chain's smallest unit.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Default tools enabled when no policy is configured.
pub const DEFAULT_ALLOWED_TOOLS: [&str; 5] = [
    "GET_BALANCE",
    "SEND_NATIVE",
    "DEPLOY_CONTRACT",
    "CONTRACT_CALL",
    "NEW_WALLET",
];

/// Default transfer ceiling in whole native units.
pub const DEFAULT_MAX_AMOUNT: &str = "1.0";

/// Default blocked method substrings.
pub const DEFAULT_BLOCKED_METHODS: [&str; 3] = ["selfdestruct", "destroy", "kill"];

/// A rejected request, raised before the chain is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    #[error("Tool '{0}' is not allowed by policy")]
    ToolNotAllowed(String),

    #[error("Amount {requested} exceeds policy maximum {maximum}")]
    AmountExceedsPolicy { requested: String, maximum: String },

    #[error("Method '{method}' is blocked by policy (matched '{pattern}')")]
    MethodBlocked { method: String, pattern: String },
}

/// Static execution policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Exact tool names that may run
    allowed_tools: BTreeSet<String>,
    /// Transfer ceiling as a decimal string in whole native units
    max_amount: String,
    /// Lower-cased substrings that block a contract method
    blocked_method_substrings: Vec<String>,
}

impl Default for Policy {
    fn default() -> Self {
        Self::new(
            DEFAULT_ALLOWED_TOOLS,
            DEFAULT_MAX_AMOUNT,
            DEFAULT_BLOCKED_METHODS,
        )
    }
}

impl Policy {
    /// Build a policy. Blocked substrings are trimmed and lower-cased so
    /// they compare against lower-cased method names; empty ones are dropped.
    pub fn new(
        allowed_tools: impl IntoIterator<Item = impl Into<String>>,
        max_amount: impl Into<String>,
        blocked_methods: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            allowed_tools: allowed_tools
                .into_iter()
                .map(|t| t.into().trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            max_amount: max_amount.into().trim().to_string(),
            blocked_method_substrings: blocked_methods
                .into_iter()
                .map(|m| m.into().trim().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    pub fn allowed_tools(&self) -> impl Iterator<Item = &str> {
        self.allowed_tools.iter().map(|s| s.as_str())
    }

    pub fn max_amount(&self) -> &str {
        &self.max_amount
    }

    pub fn blocked_method_substrings(&self) -> &[String] {
        &self.blocked_method_substrings
    }

    /// Rule 1: the tool must be on the allowlist.
    pub fn check_tool(&self, tool_name: &str) -> Result<(), PolicyViolation> {
        if self.allowed_tools.contains(tool_name) {
            Ok(())
        } else {
            Err(PolicyViolation::ToolNotAllowed(tool_name.to_string()))
        }
    }

    /// Rule 2: the requested amount must not exceed the ceiling.
    ///
    /// Both values must already be in the same (smallest) unit. The
    /// boundary is inclusive: `requested == ceiling` passes.
    pub fn check_amount<T: Ord>(
        &self,
        requested_display: &str,
        requested: &T,
        ceiling: &T,
    ) -> Result<(), PolicyViolation> {
        if requested > ceiling {
            Err(PolicyViolation::AmountExceedsPolicy {
                requested: requested_display.to_string(),
                maximum: self.max_amount.clone(),
            })
        } else {
            Ok(())
        }
    }

    /// Rule 3: the lower-cased method must not contain a blocked substring.
    pub fn check_method(&self, method: &str) -> Result<(), PolicyViolation> {
        let lowered = method.to_lowercase();
        match self
            .blocked_method_substrings
            .iter()
            .find(|pattern| lowered.contains(pattern.as_str()))
        {
            Some(pattern) => Err(PolicyViolation::MethodBlocked {
                method: method.to_string(),
                pattern: pattern.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = Policy::default();
        assert_eq!(policy.allowed_tools().count(), 5);
        assert_eq!(policy.max_amount(), "1.0");
        assert!(policy.check_tool("SEND_NATIVE").is_ok());
    }

    #[test]
    fn test_allowlist_is_exact() {
        let policy = Policy::new(["GET_BALANCE"], "1.0", Vec::<String>::new());
        assert!(policy.check_tool("GET_BALANCE").is_ok());
        assert_eq!(
            policy.check_tool("get_balance"),
            Err(PolicyViolation::ToolNotAllowed("get_balance".into()))
        );
        assert!(policy.check_tool("SEND_NATIVE").is_err());
    }

    #[test]
    fn test_amount_boundary_inclusive() {
        let policy = Policy::new(["SEND_NATIVE"], "1.0", Vec::<String>::new());
        let ceiling: u128 = 1_000_000_000_000_000_000;

        assert!(policy.check_amount("1.0", &ceiling, &ceiling).is_ok());
        assert!(policy.check_amount("0.5", &(ceiling / 2), &ceiling).is_ok());

        let err = policy
            .check_amount("1.000001", &(ceiling + 1_000_000_000_000), &ceiling)
            .unwrap_err();
        assert_eq!(
            err,
            PolicyViolation::AmountExceedsPolicy {
                requested: "1.000001".into(),
                maximum: "1.0".into()
            }
        );
    }

    #[test]
    fn test_method_blocklist_substring_case_insensitive() {
        let policy = Policy::new(["CONTRACT_CALL"], "1.0", ["destroy"]);

        assert!(policy.check_method("getValue").is_ok());
        assert!(policy.check_method("destroyContract").is_err());
        assert!(policy.check_method("DESTROY").is_err());
        // substring match uses the configured text verbatim
        assert!(policy.check_method("selfDestructNow").is_ok());

        let policy = Policy::new(["CONTRACT_CALL"], "1.0", ["Destruct"]);
        let err = policy.check_method("selfDestructNow").unwrap_err();
        assert_eq!(
            err,
            PolicyViolation::MethodBlocked {
                method: "selfDestructNow".into(),
                pattern: "destruct".into()
            }
        );
    }

    #[test]
    fn test_new_drops_blank_entries() {
        let policy = Policy::new([" GET_BALANCE ", ""], " 2 ", ["", "  kill "]);
        assert_eq!(policy.allowed_tools().collect::<Vec<_>>(), vec!["GET_BALANCE"]);
        assert_eq!(policy.max_amount(), "2");
        assert_eq!(policy.blocked_method_substrings(), &["kill".to_string()]);
    }
}
