//! External Signer Provider
//!
//! Boundary to whatever holds the private key, typically a hardware device.
//! The engine never sees key material: it asks the provider for a public key
//! and for a signature over an opaque byte buffer, nothing else.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Length of a compressed secp256k1 public key
pub const COMPRESSED_PUBKEY_LEN: usize = 33;

/// Errors a signer provider may report
///
/// The message is passed to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignerError {
    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("user rejected: {0}")]
    UserRejected(String),

    #[error("device timed out: {0}")]
    DeviceTimeout(String),
}

impl SignerError {
    /// The provider-supplied message without the variant prefix
    pub fn reason(&self) -> &str {
        match self {
            SignerError::DeviceUnavailable(r)
            | SignerError::UserRejected(r)
            | SignerError::DeviceTimeout(r) => r,
        }
    }
}

/// How the signer derives the account key from the seed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DerivationPathStandard {
    /// m/44'/coin'/0'/0/index
    #[default]
    Bip44,
    /// m/44'/coin'/index'/0/0
    LedgerLive,
}

impl fmt::Display for DerivationPathStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DerivationPathStandard::Bip44 => write!(f, "bip-44"),
            DerivationPathStandard::LedgerLive => write!(f, "ledger-live"),
        }
    }
}

/// Asynchronous signer backing a wallet account
///
/// Both calls may block on user interaction, so they suspend the caller.
/// The engine invokes each at most once per signing call and never retries.
#[async_trait]
pub trait SignerProvider: Send + Sync {
    /// Fetch the account public key.
    ///
    /// Hardware devices answer with the 33-byte compressed key preceded by a
    /// single length byte (34 bytes total).
    async fn get_public_key(
        &self,
        address_index: u32,
        chain_name: &str,
        standard: DerivationPathStandard,
        compressed: bool,
    ) -> Result<Vec<u8>, SignerError>;

    /// Sign an arbitrary message; the device hashes it itself.
    async fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError>;
}

#[async_trait]
impl<S: SignerProvider + ?Sized> SignerProvider for std::sync::Arc<S> {
    async fn get_public_key(
        &self,
        address_index: u32,
        chain_name: &str,
        standard: DerivationPathStandard,
        compressed: bool,
    ) -> Result<Vec<u8>, SignerError> {
        (**self)
            .get_public_key(address_index, chain_name, standard, compressed)
            .await
    }

    async fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        (**self).sign(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signer_error_reason() {
        let err = SignerError::DeviceUnavailable("ledger locked".into());
        assert_eq!(err.reason(), "ledger locked");
        assert_eq!(err.to_string(), "device unavailable: ledger locked");
    }

    #[test]
    fn test_derivation_standard_serde() {
        let json = serde_json::to_string(&DerivationPathStandard::LedgerLive).unwrap();
        assert_eq!(json, "\"ledger-live\"");
        assert_eq!(DerivationPathStandard::Bip44.to_string(), "bip-44");
    }
}
