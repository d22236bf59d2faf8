//! `DEPLOY_CONTRACT`: contract creation from the signer account.

use async_trait::async_trait;
use blockagent_domain::{ToolCall, ToolDefinition, ToolError, ToolKind, ToolParameter};
use serde_json::{Value, json};

use super::errors::{estimation_failed, read_failed, submission_failed};
use super::hydration::{TEMPLATE_PARAM, abi_param, apply_template, args_param};
use super::{BlockchainTool, ToolContext};
use crate::ports::chain_client::{ContractDeployment, TxSkeleton};

pub const DEPLOY_CONTRACT: &str = "DEPLOY_CONTRACT";

pub struct DeployContractTool {
    definition: ToolDefinition,
}

impl DeployContractTool {
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::new(
                DEPLOY_CONTRACT,
                "Deploy a contract from its ABI and bytecode",
                ToolKind::Mutating,
            )
            .with_parameter(ToolParameter::new("abi", "Contract ABI (JSON array)", true).with_type("json"))
            .with_parameter(
                ToolParameter::new("bytecode", "0x-prefixed creation bytecode", true)
                    .with_type("hex"),
            )
            .with_parameter(
                ToolParameter::new("args", "Constructor arguments", false).with_type("array"),
            )
            .with_parameter(ToolParameter::new(
                TEMPLATE_PARAM,
                "Built-in contract template supplying abi and bytecode",
                false,
            )),
        }
    }
}

impl Default for DeployContractTool {
    fn default() -> Self {
        Self::new()
    }
}

fn deployment(ctx: &ToolContext<'_>) -> Result<ContractDeployment, ToolError> {
    let bytecode = ctx.require_string("bytecode")?;
    Ok(ContractDeployment {
        abi: abi_param(ctx.call)?,
        bytecode: bytecode.to_string(),
        args: args_param(ctx.call)?,
    })
}

#[async_trait]
impl BlockchainTool for DeployContractTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    fn hydrate(&self, call: &mut ToolCall) -> Result<(), ToolError> {
        apply_template(call, true)
    }

    async fn simulate(&self, ctx: &ToolContext<'_>) -> Result<Option<Value>, ToolError> {
        let from = ctx.require_signer()?.address.clone();
        let deployment = deployment(ctx)?;
        let gas = ctx
            .chain
            .estimate_gas(&TxSkeleton::Deploy { from, deployment })
            .await
            .map_err(estimation_failed)?;
        let chain_id = ctx.chain.get_chain_id().await.map_err(read_failed)?;

        Ok(Some(json!({
            "gas": gas.to_string(),
            "chainId": chain_id,
        })))
    }

    async fn execute(&self, ctx: &ToolContext<'_>) -> Result<Value, ToolError> {
        let from = ctx.require_signer()?.address.as_str();
        let deployment = deployment(ctx)?;
        let gas = ctx
            .chain
            .estimate_gas(&TxSkeleton::Deploy {
                from: from.to_string(),
                deployment: deployment.clone(),
            })
            .await
            .map_err(estimation_failed)?;

        let receipt = ctx
            .chain
            .deploy_contract(&deployment, from, gas)
            .await
            .map_err(submission_failed)?;

        tracing::info!(address = %receipt.address, "Contract deployed");

        Ok(json!({
            "address": receipt.address,
            "txHash": receipt.transaction_hash,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::signer::SignerAccount;
    use crate::test_support::{ADDR_A, MockChainClient};

    fn signer() -> SignerAccount {
        SignerAccount {
            address: ADDR_A.to_string(),
        }
    }

    #[tokio::test]
    async fn test_template_hydration_then_deploy() {
        let tool = DeployContractTool::new();
        let mut call = ToolCall::new(DEPLOY_CONTRACT).with_param("template", "SimpleStorage");
        tool.hydrate(&mut call).unwrap();

        let chain = MockChainClient::new();
        let signer = signer();
        let ctx = ToolContext::new(&chain, Some(&signer), &call);

        let sim = tool.simulate(&ctx).await.unwrap().unwrap();
        assert!(sim["gas"].is_string());
        assert_eq!(sim["chainId"], 44787);

        let result = tool.execute(&ctx).await.unwrap();
        assert!(result["address"].as_str().unwrap().starts_with("0x"));
        assert!(chain.calls().contains(&"deploy_contract".to_string()));
    }

    #[tokio::test]
    async fn test_missing_bytecode() {
        let chain = MockChainClient::new();
        let signer = signer();
        let call = ToolCall::new(DEPLOY_CONTRACT).with_param("abi", json!([]));
        let ctx = ToolContext::new(&chain, Some(&signer), &call);

        let err = DeployContractTool::new().execute(&ctx).await.unwrap_err();
        assert_eq!(
            err,
            ToolError::Validation("Missing required parameter: bytecode".into())
        );
        assert!(chain.calls().is_empty());
    }

    #[tokio::test]
    async fn test_deploy_failure_passes_message_through() {
        let chain = MockChainClient::new().failing_send("contract creation code storage out of gas");
        let signer = signer();
        let call = ToolCall::new(DEPLOY_CONTRACT)
            .with_param("abi", json!([]))
            .with_param("bytecode", "0x6080");
        let ctx = ToolContext::new(&chain, Some(&signer), &call);

        let err = DeployContractTool::new().execute(&ctx).await.unwrap_err();
        assert_eq!(
            err,
            ToolError::TransactionFailed("contract creation code storage out of gas".into())
        );
    }
}
