//! `GET_BALANCE`: native balance of an address.

use async_trait::async_trait;
use blockagent_domain::{ToolDefinition, ToolError, ToolKind, ToolParameter};
use serde_json::{Value, json};

use super::errors::read_failed;
use super::{BlockchainTool, ToolContext};

pub const GET_BALANCE: &str = "GET_BALANCE";

pub struct GetBalanceTool {
    definition: ToolDefinition,
}

impl GetBalanceTool {
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::new(
                GET_BALANCE,
                "Native token balance of an address, in whole native units",
                ToolKind::ReadOnly,
            )
            .with_parameter(
                ToolParameter::new("address", "0x-prefixed account address", true)
                    .with_type("address"),
            ),
        }
    }
}

impl Default for GetBalanceTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlockchainTool for GetBalanceTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, ctx: &ToolContext<'_>) -> Result<Value, ToolError> {
        let address = ctx.require_string("address")?;
        let wei = ctx.chain.get_balance(address).await.map_err(read_failed)?;

        Ok(json!({
            "address": address,
            "balance": ctx.chain.from_smallest_unit(wei),
        }))
    }
}
