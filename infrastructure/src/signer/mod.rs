//! Signing key access and the signer provider adapter.

mod key_source;
mod local_key;

pub use key_source::{EnvKeySource, KeyError, KeySource, load_wallet};
pub use local_key::LocalKeySigner;

#[cfg(test)]
pub(crate) use key_source::testing;
