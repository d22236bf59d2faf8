//! Signer settings from TOML (`[signer]` section)

use serde::{Deserialize, Serialize};

/// Environment variable holding the server key unless configured otherwise
pub const DEFAULT_PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSignerConfig {
    /// Name of the environment variable read when a signer is needed.
    /// The key itself never lives in a config file.
    pub private_key_env: String,
}

impl Default for FileSignerConfig {
    fn default() -> Self {
        Self {
            private_key_env: DEFAULT_PRIVATE_KEY_ENV.to_string(),
        }
    }
}
