//! Chain client port
//!
//! Defines the capability the pipeline needs from a blockchain node:
//! balance reads, gas/fee estimation, transaction submission and contract
//! method invocation for one selected network.
//!
//! The core never encodes ABI data, signs, or speaks RPC itself. Adapters in
//! the infrastructure layer own those concerns, including dynamic binding of
//! a contract method name to its ABI signature.
//!
//! Amounts cross this boundary as [`U256`] in the chain's smallest unit so
//! that comparisons never go through floating point.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use ethers_core::types::U256;

/// Errors surfaced by chain client adapters.
///
/// Tools map these into the domain [`ToolError`](blockagent_domain::ToolError)
/// taxonomy; see `tools::errors`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// The node answered with a JSON-RPC error object
    #[error("RPC error (code {code}): {message}")]
    Rpc { code: i64, message: String },

    /// The remote call exceeded the client timeout
    #[error("request timed out after {0}")]
    Timeout(String),

    /// Connection or HTTP-level failure
    #[error("transport error: {0}")]
    Transport(String),

    /// The node answered with something we could not interpret
    #[error("decode error: {0}")]
    Decode(String),

    /// The request itself is malformed (bad ABI, bad address, bad amount)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No signing key is available for the requested sender
    #[error("no signing key: {0}")]
    MissingKey(String),
}

impl ChainError {
    /// Underlying message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            ChainError::Rpc { message, .. } => message,
            ChainError::Timeout(m)
            | ChainError::Transport(m)
            | ChainError::Decode(m)
            | ChainError::InvalidInput(m)
            | ChainError::MissingKey(m) => m,
        }
    }
}

/// Header fields of the latest block that matter for fee selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatestBlock {
    pub number: Option<u64>,
    /// Present on fee-market (EIP-1559) chains
    pub base_fee_per_gas: Option<U256>,
}

/// Pricing of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeFields {
    /// Base fee + priority fee pricing
    FeeMarket {
        max_fee_per_gas: U256,
        max_priority_fee_per_gas: U256,
    },
    /// Single gas price
    Legacy { gas_price: U256 },
}

/// A contract method addressed by ABI + name.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractInvocation {
    pub abi: Value,
    pub address: String,
    pub method: String,
    pub args: Vec<Value>,
}

/// A contract creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractDeployment {
    pub abi: Value,
    pub bytecode: String,
    pub args: Vec<Value>,
}

/// Transaction shape handed to gas estimation.
#[derive(Debug, Clone, PartialEq)]
pub enum TxSkeleton {
    Transfer { from: String, to: String, value: U256 },
    ContractMethod { from: String, invocation: ContractInvocation },
    Deploy { from: String, deployment: ContractDeployment },
}

/// Fully priced native transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub from: String,
    pub to: String,
    pub value: U256,
    pub gas: U256,
    pub fees: FeeFields,
}

/// Receipt of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub transaction_hash: String,
}

/// Receipt of a contract deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReceipt {
    pub address: String,
    pub transaction_hash: String,
}

/// Freshly generated keypair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAccount {
    pub address: String,
    pub private_key: String,
}

/// Port for talking to one blockchain network.
///
/// Each request gets its own handle from a
/// [`ChainResolver`](super::chain_resolver::ChainResolver); implementations
/// hold no state whose ordering matters across requests.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Name of the network this client is bound to (e.g. "celo")
    fn network(&self) -> &str;

    /// Balance of `address` in the smallest unit
    async fn get_balance(&self, address: &str) -> Result<U256, ChainError>;

    /// Gas units needed for `tx`
    async fn estimate_gas(&self, tx: &TxSkeleton) -> Result<U256, ChainError>;

    /// Current legacy gas price
    async fn get_gas_price(&self) -> Result<U256, ChainError>;

    async fn get_chain_id(&self) -> Result<u64, ChainError>;

    async fn get_latest_block(&self) -> Result<LatestBlock, ChainError>;

    /// Sign and submit a native transfer
    async fn send_transaction(&self, tx: &TransferRequest) -> Result<TxReceipt, ChainError>;

    /// Read-only method call; returns the decoded return value
    async fn call_contract_method(&self, call: &ContractInvocation) -> Result<Value, ChainError>;

    /// Sign and submit a state-changing method call
    async fn send_contract_method(
        &self,
        call: &ContractInvocation,
        from: &str,
        gas: U256,
    ) -> Result<TxReceipt, ChainError>;

    /// Sign and submit a contract creation
    async fn deploy_contract(
        &self,
        deployment: &ContractDeployment,
        from: &str,
        gas: U256,
    ) -> Result<DeployReceipt, ChainError>;

    /// Generate a new keypair. No chain access.
    fn create_account(&self) -> Result<GeneratedAccount, ChainError>;

    /// Parse a decimal amount in whole native units into the smallest unit
    fn to_smallest_unit(&self, amount: &str) -> Result<U256, ChainError>;

    /// Render a smallest-unit amount as a decimal string in whole native units
    fn from_smallest_unit(&self, amount: U256) -> String;
}
