//! Signer provider port
//!
//! Derives the single server-controlled account that signs transactions.
//! Derivation is stateless and repeated per request; nothing about the
//! wallet is cached between calls.

use blockagent_domain::ToolError;

use super::chain_client::ChainClient;

/// Account able to sign on the given chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerAccount {
    /// `0x`-prefixed address
    pub address: String,
}

/// Port for obtaining the signing account.
pub trait SignerProvider: Send + Sync {
    /// Derive the signer for `chain`.
    ///
    /// Fails with [`ToolError::MissingCredential`] when no signing key is
    /// configured.
    fn signer(&self, chain: &dyn ChainClient) -> Result<SignerAccount, ToolError>;
}
