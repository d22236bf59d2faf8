//! `SEND_NATIVE`: native token transfer from the signer account.
//!
//! Fees are chosen at execute time from the latest block, never reused from
//! the simulation, since fee conditions can move between the two calls.

use async_trait::async_trait;
use blockagent_domain::{ToolDefinition, ToolError, ToolKind, ToolParameter};
use serde_json::{Value, json};

use super::errors::{estimation_failed, read_failed, submission_failed};
use super::{BlockchainTool, ToolContext};
use crate::ports::chain_client::{FeeFields, LatestBlock, TransferRequest, TxSkeleton, U256};

pub const SEND_NATIVE: &str = "SEND_NATIVE";

/// Multiplier applied to the base fee when building a fee-market max fee.
const BASE_FEE_MULTIPLIER: u64 = 2;

/// Pick fee fields for a transfer.
///
/// With a base fee present: priority fee = `gas_price`,
/// max fee = 2 × base fee + priority fee. Otherwise a legacy gas price.
pub fn select_fees(block: &LatestBlock, gas_price: U256) -> FeeFields {
    match block.base_fee_per_gas {
        Some(base_fee) => FeeFields::FeeMarket {
            max_fee_per_gas: base_fee
                .saturating_mul(U256::from(BASE_FEE_MULTIPLIER))
                .saturating_add(gas_price),
            max_priority_fee_per_gas: gas_price,
        },
        None => FeeFields::Legacy { gas_price },
    }
}

pub struct SendNativeTool {
    definition: ToolDefinition,
}

impl SendNativeTool {
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::new(
                SEND_NATIVE,
                "Send native tokens from the server account",
                ToolKind::Mutating,
            )
            .with_parameter(
                ToolParameter::new("to", "Recipient address", true).with_type("address"),
            )
            .with_parameter(
                ToolParameter::new("amount", "Amount in whole native units, e.g. \"0.5\"", true)
                    .with_type("decimal"),
            ),
        }
    }
}

impl Default for SendNativeTool {
    fn default() -> Self {
        Self::new()
    }
}

struct Transfer<'a> {
    from: &'a str,
    to: &'a str,
    amount: String,
    value: U256,
}

fn transfer<'a>(ctx: &ToolContext<'a>) -> Result<Transfer<'a>, ToolError> {
    let from = ctx.require_signer()?.address.as_str();
    let to = ctx.require_string("to")?;
    let amount = ctx
        .call
        .get_decimal("amount")
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ToolError::validation("Missing required parameter: amount"))?;
    let value = ctx
        .chain
        .to_smallest_unit(&amount)
        .map_err(|e| {
            ToolError::validation(format!("Invalid amount '{}': {}", amount, e.message()))
        })?;

    Ok(Transfer {
        from,
        to,
        amount,
        value,
    })
}

fn skeleton(t: &Transfer<'_>) -> TxSkeleton {
    TxSkeleton::Transfer {
        from: t.from.to_string(),
        to: t.to.to_string(),
        value: t.value,
    }
}

#[async_trait]
impl BlockchainTool for SendNativeTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn simulate(&self, ctx: &ToolContext<'_>) -> Result<Option<Value>, ToolError> {
        let t = transfer(ctx)?;
        let gas = ctx
            .chain
            .estimate_gas(&skeleton(&t))
            .await
            .map_err(estimation_failed)?;
        let gas_price = ctx.chain.get_gas_price().await.map_err(estimation_failed)?;
        let chain_id = ctx.chain.get_chain_id().await.map_err(read_failed)?;

        Ok(Some(json!({
            "from": t.from,
            "to": t.to,
            "value": t.amount,
            "gas": gas.to_string(),
            "gasPrice": gas_price.to_string(),
            "chainId": chain_id,
        })))
    }

    async fn execute(&self, ctx: &ToolContext<'_>) -> Result<Value, ToolError> {
        let t = transfer(ctx)?;
        let block = ctx
            .chain
            .get_latest_block()
            .await
            .map_err(estimation_failed)?;
        let gas_price = ctx.chain.get_gas_price().await.map_err(estimation_failed)?;
        let gas = ctx
            .chain
            .estimate_gas(&skeleton(&t))
            .await
            .map_err(estimation_failed)?;
        let fees = select_fees(&block, gas_price);

        tracing::debug!(
            to = t.to,
            gas = %gas,
            fee_market = matches!(fees, FeeFields::FeeMarket { .. }),
            "Submitting native transfer"
        );

        let request = TransferRequest {
            from: t.from.to_string(),
            to: t.to.to_string(),
            value: t.value,
            gas,
            fees,
        };
        let receipt = ctx
            .chain
            .send_transaction(&request)
            .await
            .map_err(submission_failed)?;

        Ok(json!({
            "txHash": receipt.transaction_hash,
            "from": t.from,
            "to": t.to,
            "value": t.amount,
        }))
    }
}
