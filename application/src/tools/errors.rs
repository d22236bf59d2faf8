//! Mapping of chain-client failures into the [`ToolError`] taxonomy.
//!
//! The pipeline never retries. It only specializes a few recognizable
//! failures (timeouts, missing keys, insufficient funds) and otherwise
//! passes the adapter's message through unchanged.

use blockagent_domain::ToolError;

use crate::ports::chain_client::ChainError;

/// Substring nodes put in send errors when balance < amount + fees.
const INSUFFICIENT_FUNDS_MARKER: &str = "insufficient funds";

/// Failure of a gas or fee query.
pub fn estimation_failed(error: ChainError) -> ToolError {
    match error {
        ChainError::Timeout(m) => ToolError::Timeout(m),
        ChainError::InvalidInput(m) => ToolError::Validation(m),
        other => ToolError::EstimationFailed(other.message().to_string()),
    }
}

/// Failure while submitting a transaction, method call or deployment.
pub fn submission_failed(error: ChainError) -> ToolError {
    match error {
        ChainError::Timeout(m) => ToolError::Timeout(m),
        ChainError::MissingKey(m) => ToolError::MissingCredential(m),
        ChainError::InvalidInput(m) => ToolError::Validation(m),
        other => {
            let message = other.message().to_string();
            if message.to_lowercase().contains(INSUFFICIENT_FUNDS_MARKER) {
                ToolError::InsufficientFunds(message)
            } else {
                ToolError::TransactionFailed(message)
            }
        }
    }
}

/// Failure of a plain read (balance, chain id, eth_call).
pub fn read_failed(error: ChainError) -> ToolError {
    match error {
        ChainError::Timeout(m) => ToolError::Timeout(m),
        ChainError::InvalidInput(m) => ToolError::Validation(m),
        other => ToolError::TransactionFailed(other.message().to_string()),
    }
}
