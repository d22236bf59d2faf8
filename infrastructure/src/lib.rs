//! Infrastructure layer for blockagent
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: configuration file loading, EVM JSON-RPC
//! chain access, local-key signing and the JSONL audit trail.

pub mod audit;
pub mod chain;
pub mod config;
pub mod signer;

// Re-export commonly used types
pub use audit::JsonlAuditSink;
pub use chain::{ConfiguredChainResolver, EvmChainClient, RpcTransport};
pub use config::{
    ConfigLoader, DEFAULT_CHAIN, DEFAULT_PRIVATE_KEY_ENV, FileAuditConfig, FileChainConfig,
    FileConfig, FilePolicyConfig, FileRpcConfig, FileSignerConfig,
};
pub use signer::{EnvKeySource, KeyError, KeySource, LocalKeySigner, load_wallet};
