//! Application layer for blockagent
//!
//! This crate contains the tool registry, the policy gate, the
//! simulate/approve/execute use case and the port definitions that
//! infrastructure adapters implement. It depends only on the domain layer.

pub mod policy_gate;
pub mod ports;
pub mod tools;
pub mod use_cases;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use policy_gate::PolicyGate;
pub use ports::{
    audit_log::{AuditRecord, AuditSink, NoAuditSink},
    chain_client::{
        ChainClient, ChainError, ContractDeployment, ContractInvocation, DeployReceipt, FeeFields,
        GeneratedAccount, LatestBlock, TransferRequest, TxReceipt, TxSkeleton, U256,
    },
    chain_resolver::ChainResolver,
    signer::{SignerAccount, SignerProvider},
};
pub use tools::{BlockchainTool, ToolContext, ToolRegistry};
pub use use_cases::execute_tool::{ExecuteToolInput, ExecuteToolUseCase};
