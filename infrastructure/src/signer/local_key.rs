//! Signer provider backed by a local private key.

use std::sync::Arc;

use blockagent_application::{ChainClient, SignerAccount, SignerProvider};
use blockagent_domain::ToolError;
use ethers_core::utils::to_checksum;
use ethers_signers::Signer;
use tracing::debug;

use super::key_source::{KeyError, KeySource, load_wallet};

/// Derives the server account from a [`KeySource`] on every request.
pub struct LocalKeySigner {
    source: Arc<dyn KeySource>,
    label: String,
}

impl LocalKeySigner {
    /// `label` names the key in error messages (e.g. the env variable).
    pub fn new(source: Arc<dyn KeySource>, label: impl Into<String>) -> Self {
        Self {
            source,
            label: label.into(),
        }
    }
}

impl SignerProvider for LocalKeySigner {
    fn signer(&self, chain: &dyn ChainClient) -> Result<SignerAccount, ToolError> {
        let wallet = load_wallet(self.source.as_ref(), &self.label).map_err(|e| match e {
            KeyError::Missing(_) => ToolError::MissingCredential(format!(
                "no signing key configured: {}",
                e
            )),
            KeyError::Invalid(_) => ToolError::MissingCredential(e.to_string()),
        })?;

        let address = to_checksum(&wallet.address(), None);
        debug!(chain = chain.network(), %address, "Derived signer");
        Ok(SignerAccount { address })
    }
}
