//! `NEW_WALLET`: generate a fresh keypair.
//!
//! Nothing is sent to the chain. The private key is returned to the caller
//! once and is redacted from the audit trail.

use async_trait::async_trait;
use blockagent_domain::{ToolDefinition, ToolError, ToolKind};
use serde_json::{Value, json};

use super::{BlockchainTool, ToolContext};

pub const NEW_WALLET: &str = "NEW_WALLET";

const REDACTED: &str = "[redacted]";

pub struct NewWalletTool {
    definition: ToolDefinition,
}

impl NewWalletTool {
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::new(
                NEW_WALLET,
                "Generate a new account keypair (not persisted)",
                ToolKind::ReadOnly,
            ),
        }
    }
}

impl Default for NewWalletTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlockchainTool for NewWalletTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, ctx: &ToolContext<'_>) -> Result<Value, ToolError> {
        let account = ctx
            .chain
            .create_account()
            .map_err(|e| ToolError::TransactionFailed(e.message().to_string()))?;

        Ok(json!({
            "address": account.address,
            "privateKey": account.private_key,
        }))
    }

    fn audit_view(&self, result: &Value) -> Value {
        let mut view = result.clone();
        if let Some(key) = view.get_mut("privateKey") {
            *key = Value::String(REDACTED.to_string());
        }
        view
    }
}
