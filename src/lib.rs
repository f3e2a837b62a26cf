//! Cosmos Ledger Signer
//!
//! Transaction signing engine for a multi-chain wallet whose keys live on an
//! external signer (typically a hardware device).
//!
//! # Architecture
//!
//! This crate provides:
//! - **messages**: Unsigned transaction to protocol message mapping
//! - **fees**: Memo sanitization and fee descriptors
//! - **signing**: Native and legacy amino JSON sign docs, signature binding
//! - **provider**: The async boundary to the external signer
//! - **tx**: The engine tying it all together
//!
//! # Signing schemes
//!
//! Transactions for the wallet's home chain take the native path. Any other
//! Tendermint chain is signed over a legacy amino JSON document while the
//! broadcast bytes stay protobuf. Non-Tendermint assets are rejected.
//!
//! # Example
//!
//! ```rust,ignore
//! use cosmos_ledger_signer::{TransactionSigner, WalletConfig, DerivationPathStandard};
//!
//! let signer = TransactionSigner::new(WalletConfig::mainnet(), ledger, 0, DerivationPathStandard::Bip44)?;
//! let tx_hex = signer.sign(&unsigned_tx, "5000", 300_000).await?;
//! ```

pub mod config;
pub mod error;
pub mod fees;
pub mod messages;
pub mod provider;
pub mod signing;
pub mod tx;
pub mod types;
pub mod utils;

// Re-export key types for convenience
pub use config::{IbcDefaults, NetworkConfig, WalletConfig};
pub use error::{EngineError, EngineResult, ErrorCode, ErrorKind};
pub use provider::{DerivationPathStandard, SignerError, SignerProvider};
pub use signing::{SignMode, SignedTransactionEnvelope, SigningScheme};
pub use tx::{SignedTransaction, TransactionSigner};
pub use types::*;
