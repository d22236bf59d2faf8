//! Tool domain module
//!
//! This module defines the core abstractions of the **Tool System**: named
//! blockchain operations with a declared parameter schema and a
//! [`ToolKind`](entities::ToolKind).
//!
//! # Overview
//!
//! ```text
//! ┌────────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolDefinition │───▶│ ToolCall     │───▶│ ToolOutcome  │
//! │ (registry)     │    │ (request)    │    │ or ToolError │
//! └────────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! # Kind-Based Execution
//!
//! | Kind | Examples | Approval gate |
//! |------|----------|---------------|
//! | **ReadOnly** | `GET_BALANCE`, `NEW_WALLET` | No (auto-execute) |
//! | **Mutating** | `SEND_NATIVE`, `DEPLOY_CONTRACT` | Yes |
//! | **Mixed** | `CONTRACT_CALL` | Only when `write = true` |
//!
//! # Architecture
//!
//! - **Domain** (this module): pure definitions and validation, no I/O
//! - **Application**: the `BlockchainTool` trait, registry and pipeline
//! - **Infrastructure**: the chain client adapter doing the actual RPC

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolKind, ToolParameter, ToolParams};
pub use traits::{DefaultToolValidator, ToolValidator, is_evm_address};
pub use value_objects::{NOT_EXECUTED_NOTE, ToolError, ToolErrorView, ToolOutcome};
