//! EVM chain access over JSON-RPC
//!
//! - [`json_rpc`]: HTTP transport with timeout mapping
//! - [`abi_codec`]: binds method names and JSON arguments to ABI encodings
//! - [`EvmChainClient`]: the [`ChainClient`](blockagent_application::ChainClient) adapter
//! - [`ConfiguredChainResolver`]: picks a client per request from config

pub mod abi_codec;
mod evm_client;
pub mod json_rpc;
mod resolver;

pub use evm_client::{EvmChainClient, format_native_amount, parse_native_amount};
pub use json_rpc::RpcTransport;
pub use resolver::ConfiguredChainResolver;
