//! `CONTRACT_CALL`: invoke a named contract method.
//!
//! The `write` flag decides the effective kind of a call. Reads return the
//! decoded value and need neither approval nor a signer; writes are gated
//! like any mutating tool.

use async_trait::async_trait;
use blockagent_domain::{ToolCall, ToolDefinition, ToolError, ToolKind, ToolParameter};
use serde_json::{Value, json};

use super::errors::{estimation_failed, read_failed, submission_failed};
use super::hydration::{TEMPLATE_PARAM, abi_param, apply_template, args_param};
use super::{BlockchainTool, ToolContext};
use crate::ports::chain_client::{ContractInvocation, TxSkeleton};

pub const CONTRACT_CALL: &str = "CONTRACT_CALL";

pub struct ContractCallTool {
    definition: ToolDefinition,
}

impl ContractCallTool {
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::new(
                CONTRACT_CALL,
                "Call a contract method; write=true sends a transaction",
                ToolKind::Mixed,
            )
            .with_parameter(ToolParameter::new("abi", "Contract ABI (JSON array)", true).with_type("json"))
            .with_parameter(
                ToolParameter::new("address", "Contract address", true).with_type("address"),
            )
            .with_parameter(ToolParameter::new("method", "Method name", true))
            .with_parameter(
                ToolParameter::new("args", "Method arguments", false).with_type("array"),
            )
            .with_parameter(
                ToolParameter::new("write", "true to send a transaction, false to read", true)
                    .with_type("bool"),
            )
            .with_parameter(ToolParameter::new(
                TEMPLATE_PARAM,
                "Built-in contract template supplying the abi",
                false,
            )),
        }
    }

    fn is_write(call: &ToolCall) -> bool {
        call.get_bool("write").unwrap_or(false)
    }
}

impl Default for ContractCallTool {
    fn default() -> Self {
        Self::new()
    }
}

fn invocation(ctx: &ToolContext<'_>) -> Result<ContractInvocation, ToolError> {
    Ok(ContractInvocation {
        abi: abi_param(ctx.call)?,
        address: ctx.require_string("address")?.to_string(),
        method: ctx.require_string("method")?.to_string(),
        args: args_param(ctx.call)?,
    })
}

fn require_write_flag(call: &ToolCall) -> Result<bool, ToolError> {
    match call.params.get("write") {
        None | Some(Value::Null) => Err(ToolError::validation("Missing required parameter: write")),
        Some(_) => call
            .get_bool("write")
            .ok_or_else(|| ToolError::validation("Parameter 'write' must be a boolean")),
    }
}

#[async_trait]
impl BlockchainTool for ContractCallTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    fn effective_kind(&self, call: &ToolCall) -> ToolKind {
        if Self::is_write(call) {
            ToolKind::Mutating
        } else {
            ToolKind::ReadOnly
        }
    }

    fn hydrate(&self, call: &mut ToolCall) -> Result<(), ToolError> {
        apply_template(call, false)
    }

    async fn simulate(&self, ctx: &ToolContext<'_>) -> Result<Option<Value>, ToolError> {
        if !require_write_flag(ctx.call)? {
            return Ok(Some(json!({
                "mode": "read",
                "note": "read-only call, nothing to simulate",
            })));
        }

        let from = ctx.require_signer()?.address.clone();
        let invocation = invocation(ctx)?;
        let gas = ctx
            .chain
            .estimate_gas(&TxSkeleton::ContractMethod { from, invocation })
            .await
            .map_err(estimation_failed)?;
        let chain_id = ctx.chain.get_chain_id().await.map_err(read_failed)?;

        Ok(Some(json!({
            "gas": gas.to_string(),
            "chainId": chain_id,
        })))
    }

    async fn execute(&self, ctx: &ToolContext<'_>) -> Result<Value, ToolError> {
        let write = require_write_flag(ctx.call)?;
        let invocation = invocation(ctx)?;

        if !write {
            return ctx
                .chain
                .call_contract_method(&invocation)
                .await
                .map_err(read_failed);
        }

        let from = ctx.require_signer()?.address.as_str();
        let gas = ctx
            .chain
            .estimate_gas(&TxSkeleton::ContractMethod {
                from: from.to_string(),
                invocation: invocation.clone(),
            })
            .await
            .map_err(estimation_failed)?;
        let receipt = ctx
            .chain
            .send_contract_method(&invocation, from, gas)
            .await
            .map_err(submission_failed)?;

        Ok(json!({ "txHash": receipt.transaction_hash }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::signer::SignerAccount;
    use crate::test_support::{ADDR_A, ADDR_B, MockChainClient};

    fn call(write: bool) -> ToolCall {
        ToolCall::new(CONTRACT_CALL)
            .with_param("template", "SimpleStorage")
            .with_param("address", ADDR_B)
            .with_param("method", if write { "set" } else { "get" })
            .with_param("args", if write { json!([42]) } else { json!([]) })
            .with_param("write", write)
    }

    #[test]
    fn test_effective_kind_follows_write_flag() {
        let tool = ContractCallTool::new();
        assert_eq!(tool.effective_kind(&call(true)), ToolKind::Mutating);
        assert_eq!(tool.effective_kind(&call(false)), ToolKind::ReadOnly);
        assert_eq!(
            tool.effective_kind(&call(false).with_param("write", "true")),
            ToolKind::Mutating
        );
    }

    #[tokio::test]
    async fn test_read_returns_value_without_signer() {
        let tool = ContractCallTool::new();
        let mut call = call(false);
        tool.hydrate(&mut call).unwrap();

        let chain = MockChainClient::new().with_call_result(json!("42"));
        let ctx = ToolContext::new(&chain, None, &call);

        let sim = tool.simulate(&ctx).await.unwrap().unwrap();
        assert_eq!(sim["mode"], "read");

        let result = tool.execute(&ctx).await.unwrap();
        assert_eq!(result, json!("42"));
        assert_eq!(chain.calls(), vec!["call_contract_method"]);
    }

    #[tokio::test]
    async fn test_write_estimates_and_sends() {
        let tool = ContractCallTool::new();
        let mut call = call(true);
        tool.hydrate(&mut call).unwrap();

        let chain = MockChainClient::new();
        let signer = SignerAccount {
            address: ADDR_A.to_string(),
        };
        let ctx = ToolContext::new(&chain, Some(&signer), &call);

        let sim = tool.simulate(&ctx).await.unwrap().unwrap();
        assert!(sim.get("gas").is_some());
        assert!(sim.get("chainId").is_some());

        let result = tool.execute(&ctx).await.unwrap();
        assert!(result["txHash"].is_string());
        assert!(chain.calls().contains(&"send_contract_method".to_string()));
    }

    #[tokio::test]
    async fn test_write_flag_is_required() {
        let mut call = call(false);
        call.params.remove("write");
        let chain = MockChainClient::new();
        let ctx = ToolContext::new(&chain, None, &call);

        let err = ContractCallTool::new().execute(&ctx).await.unwrap_err();
        assert_eq!(err, ToolError::Validation("Missing required parameter: write".into()));
    }

    #[tokio::test]
    async fn test_reverted_read_is_transaction_failed() {
        let tool = ContractCallTool::new();
        let mut call = call(false);
        tool.hydrate(&mut call).unwrap();

        let chain = MockChainClient::new().failing_call("execution reverted");
        let ctx = ToolContext::new(&chain, None, &call);

        let err = tool.execute(&ctx).await.unwrap_err();
        assert_eq!(err.code(), "TRANSACTION_FAILED");
    }
}
