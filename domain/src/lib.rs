//! Domain layer for blockagent
//!
//! This crate contains the core business rules, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tools
//!
//! A tool is a named blockchain operation (balance query, native transfer,
//! contract deployment, contract call) with a parameter schema and a
//! [`ToolKind`]. Read-only tools run immediately; mutating ones only run
//! after an explicit approval signal.
//!
//! ## Policy
//!
//! [`Policy`] is static configuration checked before any chain access:
//! tool allowlist, transfer ceiling, blocked contract method substrings.

pub mod config;
pub mod contract;
pub mod policy;
pub mod tool;

// Re-export commonly used types
pub use config::{ConfigIssue, Severity};
pub use contract::ContractTemplate;
pub use policy::{Policy, PolicyViolation};
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolKind, ToolParameter, ToolParams},
    traits::{DefaultToolValidator, ToolValidator, check_decimal_amount, is_evm_address},
    value_objects::{NOT_EXECUTED_NOTE, ToolError, ToolErrorView, ToolOutcome},
};
