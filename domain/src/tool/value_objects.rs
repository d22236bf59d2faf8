//! Tool domain value objects: outcome and error types
//!
//! These types form the **output side** of the execution pipeline.
//! A call either produces a [`ToolOutcome`] or fails with a [`ToolError`].
//! No error is retried automatically; each carries a stable tag (see
//! [`ToolError::code`]) and a human-readable message.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::policy::PolicyViolation;

/// Note attached to an outcome whose mutating step was withheld.
pub const NOT_EXECUTED_NOTE: &str = "not executed";

/// Failure taxonomy for the execution pipeline.
///
/// | Code | Raised by |
/// |------|-----------|
/// | `VALIDATION_ERROR` | missing/malformed parameter |
/// | `UNKNOWN_TOOL` | registry lookup |
/// | `CHAIN_CONFIG_MISSING` | chain resolution |
/// | `MISSING_CREDENTIAL` | signer derivation |
/// | `TOOL_NOT_ALLOWED` / `AMOUNT_EXCEEDS_POLICY` / `METHOD_BLOCKED` | policy gate |
/// | `ESTIMATION_FAILED` | gas estimation |
/// | `INSUFFICIENT_FUNDS` | send rejected for balance |
/// | `TRANSACTION_FAILED` | any other send/call/deploy failure |
/// | `TIMEOUT` | remote call exceeded the client timeout |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("No RPC endpoint configured for chain '{0}'")]
    ChainConfigMissing(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Tool '{0}' is not allowed by policy")]
    ToolNotAllowed(String),

    #[error("Amount {requested} exceeds policy maximum {maximum}")]
    AmountExceedsPolicy { requested: String, maximum: String },

    #[error("Method '{method}' is blocked by policy (matched '{pattern}')")]
    MethodBlocked { method: String, pattern: String },

    #[error("Gas estimation failed: {0}")]
    EstimationFailed(String),

    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Remote call timed out: {0}")]
    Timeout(String),
}

impl ToolError {
    /// Stable tag for callers that branch on the failure class.
    pub fn code(&self) -> &'static str {
        match self {
            ToolError::Validation(_) => "VALIDATION_ERROR",
            ToolError::UnknownTool(_) => "UNKNOWN_TOOL",
            ToolError::ChainConfigMissing(_) => "CHAIN_CONFIG_MISSING",
            ToolError::MissingCredential(_) => "MISSING_CREDENTIAL",
            ToolError::ToolNotAllowed(_) => "TOOL_NOT_ALLOWED",
            ToolError::AmountExceedsPolicy { .. } => "AMOUNT_EXCEEDS_POLICY",
            ToolError::MethodBlocked { .. } => "METHOD_BLOCKED",
            ToolError::EstimationFailed(_) => "ESTIMATION_FAILED",
            ToolError::InsufficientFunds(_) => "INSUFFICIENT_FUNDS",
            ToolError::TransactionFailed(_) => "TRANSACTION_FAILED",
            ToolError::Timeout(_) => "TIMEOUT",
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ToolError::Validation(message.into())
    }

    /// Whether the failure came from the policy gate.
    pub fn is_policy_violation(&self) -> bool {
        matches!(
            self,
            ToolError::ToolNotAllowed(_)
                | ToolError::AmountExceedsPolicy { .. }
                | ToolError::MethodBlocked { .. }
        )
    }
}

impl From<PolicyViolation> for ToolError {
    fn from(violation: PolicyViolation) -> Self {
        match violation {
            PolicyViolation::ToolNotAllowed(name) => ToolError::ToolNotAllowed(name),
            PolicyViolation::AmountExceedsPolicy { requested, maximum } => {
                ToolError::AmountExceedsPolicy { requested, maximum }
            }
            PolicyViolation::MethodBlocked { method, pattern } => {
                ToolError::MethodBlocked { method, pattern }
            }
        }
    }
}

/// Serializable view of a failure: `{ "error": CODE, "message": text }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolErrorView {
    pub error: String,
    pub message: String,
}

impl From<&ToolError> for ToolErrorView {
    fn from(error: &ToolError) -> Self {
        Self {
            error: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

/// Response of a pipeline run: `{simulation?, result?, note?}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolOutcome {
    /// Dry-run projection; present whenever the tool defines `simulate`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation: Option<serde_json::Value>,
    /// Completed effect; absent when the approval gate withheld execution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Set to [`NOT_EXECUTED_NOTE`] when execution was withheld
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ToolOutcome {
    pub fn executed(simulation: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self {
            simulation,
            result: Some(result),
            note: None,
        }
    }

    pub fn withheld(simulation: Option<serde_json::Value>) -> Self {
        Self {
            simulation,
            result: None,
            note: Some(NOT_EXECUTED_NOTE.to_string()),
        }
    }

    pub fn was_executed(&self) -> bool {
        self.result.is_some()
    }
}
