//! Blockchain tools and their registry
//!
//! Each tool is a concrete type implementing [`BlockchainTool`]: a static
//! [`ToolDefinition`], an optional side-effect-free `simulate`, and a
//! required `execute`. Tools only talk to the chain through the
//! [`ChainClient`] port handed to them in a [`ToolContext`].
//!
//! | Tool | Kind | Simulate | Execute |
//! |------|------|----------|---------|
//! | `GET_BALANCE` | ReadOnly | - | `{address, balance}` |
//! | `SEND_NATIVE` | Mutating | gas, gas price, chain id | tx hash |
//! | `DEPLOY_CONTRACT` | Mutating | gas, chain id | address + tx hash |
//! | `CONTRACT_CALL` | Mixed | gas + chain id when writing | tx hash or return value |
//! | `NEW_WALLET` | ReadOnly | - | fresh keypair |
//!
//! New tools are added by registering another implementation in the
//! [`ToolRegistry`]; the pipeline does not change.

pub mod contract_call;
pub mod deploy_contract;
pub mod errors;
pub mod get_balance;
pub mod hydration;
pub mod new_wallet;
pub mod registry;
pub mod send_native;

use async_trait::async_trait;
use blockagent_domain::{ToolCall, ToolDefinition, ToolError, ToolKind};
use serde_json::Value;

use crate::ports::chain_client::ChainClient;
use crate::ports::signer::SignerAccount;

pub use contract_call::{CONTRACT_CALL, ContractCallTool};
pub use deploy_contract::{DEPLOY_CONTRACT, DeployContractTool};
pub use get_balance::{GET_BALANCE, GetBalanceTool};
pub use new_wallet::{NEW_WALLET, NewWalletTool};
pub use registry::ToolRegistry;
pub use send_native::{SEND_NATIVE, SendNativeTool, select_fees};

/// Capability bundle passed to `simulate` and `execute`.
pub struct ToolContext<'a> {
    pub chain: &'a dyn ChainClient,
    /// Present only for calls that change state
    pub signer: Option<&'a SignerAccount>,
    /// Hydrated, validated, policy-checked call
    pub call: &'a ToolCall,
}

impl<'a> ToolContext<'a> {
    pub fn new(
        chain: &'a dyn ChainClient,
        signer: Option<&'a SignerAccount>,
        call: &'a ToolCall,
    ) -> Self {
        Self {
            chain,
            signer,
            call,
        }
    }

    pub fn require_signer(&self) -> Result<&'a SignerAccount, ToolError> {
        self.signer.ok_or_else(|| {
            ToolError::MissingCredential(format!(
                "tool '{}' needs a signer but none was resolved",
                self.call.tool_name
            ))
        })
    }

    /// Required string param, as a validation error when absent.
    pub fn require_string(&self, key: &str) -> Result<&'a str, ToolError> {
        self.call.require_string(key).map_err(ToolError::Validation)
    }
}

/// A named blockchain operation.
#[async_trait]
pub trait BlockchainTool: Send + Sync {
    /// Static schema of the tool
    fn definition(&self) -> &ToolDefinition;

    fn name(&self) -> &str {
        &self.definition().name
    }

    /// Kind of a concrete call. `Mixed` tools resolve to `ReadOnly` or
    /// `Mutating` here; anything left as `Mixed` is gated like a write.
    fn effective_kind(&self, _call: &ToolCall) -> ToolKind {
        self.definition().kind
    }

    /// Tool-specific convenience expansion, applied after overrides are
    /// merged and before validation.
    fn hydrate(&self, _call: &mut ToolCall) -> Result<(), ToolError> {
        Ok(())
    }

    /// Dry run. `Ok(None)` means the tool defines no simulation.
    async fn simulate(&self, _ctx: &ToolContext<'_>) -> Result<Option<Value>, ToolError> {
        Ok(None)
    }

    /// Perform the operation.
    async fn execute(&self, ctx: &ToolContext<'_>) -> Result<Value, ToolError>;

    /// Projection of `result` written to the audit trail.
    fn audit_view(&self, result: &Value) -> Value {
        result.clone()
    }
}
