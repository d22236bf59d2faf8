//! Configuration file loading for blockagent
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `BLOCKAGENT_*` environment variables
//! 2. JSON policy file (`policy_file`), policy section only
//! 3. `--config <path>` specified file
//! 4. Project root: `./blockagent.toml` or `./.blockagent.toml`
//! 5. Global: `<config dir>/blockagent/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    DEFAULT_CHAIN, DEFAULT_PRIVATE_KEY_ENV, FileAuditConfig, FileChainConfig, FileConfig,
    FilePolicyConfig, FileRpcConfig, FileSignerConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
