//! Policy gate
//!
//! Applies the static [`Policy`] to a hydrated call before anything reaches
//! the chain. Rules run in order and the first violation wins:
//!
//! 1. tool allowlist
//! 2. amount ceiling (`SEND_NATIVE` with an `amount`)
//! 3. method blocklist (`CONTRACT_CALL` with a `method`)
//!
//! The only chain-client use is local unit conversion; no remote call is
//! made here.

use blockagent_domain::{Policy, ToolCall, ToolError};

use crate::ports::chain_client::ChainClient;
use crate::tools::{CONTRACT_CALL, SEND_NATIVE};

pub struct PolicyGate {
    policy: Policy,
}

impl PolicyGate {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    pub fn check(&self, call: &ToolCall, chain: &dyn ChainClient) -> Result<(), ToolError> {
        self.policy.check_tool(&call.tool_name)?;

        if call.tool_name == SEND_NATIVE && call.params.contains_key("amount") {
            let amount = call.get_decimal("amount").ok_or_else(|| {
                ToolError::validation("Parameter 'amount' must be a decimal string such as \"0.5\"")
            })?;
            let requested = chain.to_smallest_unit(&amount).map_err(|e| {
                ToolError::validation(format!("Invalid amount '{}': {}", amount, e.message()))
            })?;
            let ceiling = chain
                .to_smallest_unit(self.policy.max_amount())
                .map_err(|e| {
                    ToolError::validation(format!(
                        "Invalid policy maximum '{}': {}",
                        self.policy.max_amount(),
                        e.message()
                    ))
                })?;
            self.policy.check_amount(&amount, &requested, &ceiling)?;
        }

        if call.tool_name == CONTRACT_CALL
            && let Some(method) = call.get_string("method")
        {
            self.policy.check_method(method)?;
        }

        Ok(())
    }
}

impl Default for PolicyGate {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ADDR_B, MockChainClient};
    use blockagent_domain::policy::DEFAULT_ALLOWED_TOOLS;
    use serde_json::json;

    fn gate(blocked: &[&str]) -> PolicyGate {
        PolicyGate::new(Policy::new(
            DEFAULT_ALLOWED_TOOLS,
            "1.0",
            blocked.iter().copied(),
        ))
    }

    fn send(amount: &str) -> ToolCall {
        ToolCall::new(SEND_NATIVE)
            .with_param("to", ADDR_B)
            .with_param("amount", amount)
    }

    fn method(name: &str) -> ToolCall {
        ToolCall::new(CONTRACT_CALL).with_param("method", name)
    }

    #[test]
    fn test_tool_allowlist() {
        let gate = PolicyGate::new(Policy::new(["GET_BALANCE"], "1.0", Vec::<String>::new()));
        let chain = MockChainClient::new();

        assert!(gate.check(&ToolCall::new("GET_BALANCE"), &chain).is_ok());
        let err = gate.check(&send("0.1"), &chain).unwrap_err();
        assert_eq!(err, ToolError::ToolNotAllowed("SEND_NATIVE".into()));
    }

    #[test]
    fn test_amount_ceiling_is_inclusive() {
        let gate = gate(&[]);
        let chain = MockChainClient::new();

        assert!(gate.check(&send("1.0"), &chain).is_ok());
        assert!(gate.check(&send("1"), &chain).is_ok());

        let err = gate.check(&send("1.000001"), &chain).unwrap_err();
        assert_eq!(
            err,
            ToolError::AmountExceedsPolicy {
                requested: "1.000001".into(),
                maximum: "1.0".into(),
            }
        );
    }

    #[test]
    fn test_amount_smaller_than_float_precision_is_caught() {
        let gate = gate(&[]);
        let chain = MockChainClient::new();
        let err = gate.check(&send("1.000000000000000001"), &chain).unwrap_err();
        assert_eq!(err.code(), "AMOUNT_EXCEEDS_POLICY");
    }

    #[test]
    fn test_numeric_amount_is_checked() {
        let gate = gate(&[]);
        let chain = MockChainClient::new();
        let call = ToolCall::new(SEND_NATIVE).with_param("amount", 2);
        assert_eq!(gate.check(&call, &chain).unwrap_err().code(), "AMOUNT_EXCEEDS_POLICY");
    }

    #[test]
    fn test_fractional_json_amount_is_rejected() {
        let gate = gate(&[]);
        let chain = MockChainClient::new();
        let call = ToolCall::new(SEND_NATIVE).with_param("amount", json!(1.000000000000000009));

        let err = gate.check(&call, &chain).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(chain.calls().is_empty());
    }

    #[test]
    fn test_amount_past_eighteen_decimals_is_rejected() {
        let gate = gate(&[]);
        let chain = MockChainClient::new();
        let err = gate.check(&send("1.0000000000000000009"), &chain).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_malformed_amount_is_validation_error() {
        let gate = gate(&[]);
        let chain = MockChainClient::new();
        let err = gate.check(&send("one"), &chain).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_method_blocklist_matches_configured_substring() {
        let gate = gate(&["destroy"]);
        let chain = MockChainClient::new();

        let err = gate.check(&method("destroyAll"), &chain).unwrap_err();
        assert_eq!(
            err,
            ToolError::MethodBlocked {
                method: "destroyAll".into(),
                pattern: "destroy".into(),
            }
        );
        assert!(gate.check(&method("getValue"), &chain).is_ok());
        // "destroy" is not a substring of "selfdestructnow"
        assert!(gate.check(&method("selfDestructNow"), &chain).is_ok());
    }

    #[test]
    fn test_default_blocklist_catches_self_destruct() {
        let gate = PolicyGate::default();
        let chain = MockChainClient::new();
        let err = gate.check(&method("selfDestructNow"), &chain).unwrap_err();
        assert_eq!(err.code(), "METHOD_BLOCKED");
    }

    #[test]
    fn test_rules_scoped_to_their_tool() {
        let gate = gate(&["get"]);
        let chain = MockChainClient::new();

        // amount on a non-transfer tool is not a ceiling violation
        let call = ToolCall::new("DEPLOY_CONTRACT").with_param("amount", "50");
        assert!(gate.check(&call, &chain).is_ok());

        // method on a non-call tool is not checked
        let call = ToolCall::new("GET_BALANCE").with_param("method", "getValue");
        assert!(gate.check(&call, &chain).is_ok());
    }

    #[test]
    fn test_gate_makes_no_remote_calls() {
        let gate = gate(&[]);
        let chain = MockChainClient::new();
        gate.check(&send("0.5"), &chain).unwrap();
        assert!(chain.calls().is_empty());
    }
}
