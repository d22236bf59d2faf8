//! Where the server's private key comes from.

use ethers_signers::LocalWallet;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("{0} is not set")]
    Missing(String),

    #[error("{0} does not hold a valid secp256k1 private key")]
    Invalid(String),
}

/// Source of the signing key, consulted on every use.
pub trait KeySource: Send + Sync {
    /// The hex-encoded private key, if configured
    fn private_key(&self) -> Result<SecretString, KeyError>;
}

/// Reads the key from an environment variable each time it is asked.
#[derive(Debug, Clone)]
pub struct EnvKeySource {
    var: String,
}

impl EnvKeySource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl KeySource for EnvKeySource {
    fn private_key(&self) -> Result<SecretString, KeyError> {
        match std::env::var(&self.var) {
            Ok(value) if !value.trim().is_empty() => Ok(SecretString::new(value.trim().to_string())),
            _ => Err(KeyError::Missing(self.var.clone())),
        }
    }
}

/// Derive a wallet from the source. Nothing is cached.
pub fn load_wallet(source: &dyn KeySource, label: &str) -> Result<LocalWallet, KeyError> {
    let key = source.private_key()?;
    key.expose_secret()
        .parse::<LocalWallet>()
        .map_err(|_| KeyError::Invalid(label.to_string()))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Hardhat's first development key; never funded outside local chains.
    pub const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    pub const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    pub struct FixedKeySource(pub Option<&'static str>);

    impl KeySource for FixedKeySource {
        fn private_key(&self) -> Result<SecretString, KeyError> {
            self.0
                .map(|k| SecretString::new(k.to_string()))
                .ok_or_else(|| KeyError::Missing("TEST_KEY".into()))
        }
    }
}
