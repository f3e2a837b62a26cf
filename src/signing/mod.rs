//! Sign-doc assembly
//!
//! Two mutually incompatible schemes produce the bytes handed to the signer:
//! - **Native**: the wallet's home chain, built through [`native::RawTransaction`]
//! - **Legacy amino JSON**: any other Tendermint chain, built by [`legacy::LegacySignDoc`]
//!
//! The scheme is chosen once per call by [`ChainCapability::classify`]. Both
//! end in the same [`compiler::SignedTransactionEnvelope`].

pub mod amino;
pub mod auth_info;
pub mod compiler;
pub mod legacy;
pub mod native;

pub use amino::{canonical_json_bytes, StdSignDoc};
pub use auth_info::CompressedPublicKey;
pub use compiler::{compile_transaction, SignedTransactionEnvelope};
pub use legacy::LegacySignDoc;
pub use native::{RawTransaction, SignableTransaction, SignerEntry};

use crate::config::WalletConfig;
use crate::error::{EngineError, EngineResult};
use crate::fees::FeeDescriptor;
use crate::messages::{ProtocolMessage, Registry};
use crate::types::{Asset, NetworkKind};
use cosmos_sdk_proto::cosmos::tx::signing::v1beta1::SignMode as ProtoSignMode;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Sign Modes and Schemes
// =============================================================================

/// Sign mode recorded in `ModeInfo.Single`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignMode {
    /// SIGN_MODE_DIRECT
    Direct,
    /// SIGN_MODE_LEGACY_AMINO_JSON
    LegacyAminoJson,
}

impl SignMode {
    pub fn as_proto(self) -> i32 {
        match self {
            SignMode::Direct => ProtoSignMode::Direct as i32,
            SignMode::LegacyAminoJson => ProtoSignMode::LegacyAminoJson as i32,
        }
    }
}

/// How a transaction for a given chain is signed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SigningScheme {
    Native,
    LegacyAminoJson,
}

impl fmt::Display for SigningScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SigningScheme::Native => write!(f, "native"),
            SigningScheme::LegacyAminoJson => write!(f, "legacy-amino-json"),
        }
    }
}

// =============================================================================
// Chain Capability
// =============================================================================

/// Resolved target chain of one signing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainCapability {
    pub scheme: SigningScheme,
    /// Name passed to the signer to pick the device app
    pub chain_name: String,
    pub chain_id: String,
    pub base_denom: String,
}

impl ChainCapability {
    /// Decide the scheme from the asset's network configuration
    ///
    /// - No Tendermint network, or the home chain: native
    /// - Another Tendermint chain: legacy amino JSON
    /// - A non-Tendermint network: unsupported
    pub fn classify(asset: Option<&Asset>, config: &WalletConfig) -> EngineResult<Self> {
        let asset_config = asset.and_then(|a| a.config.as_ref());

        if let Some(cfg) = asset_config {
            if cfg.network_kind != NetworkKind::Tendermint {
                let symbol = asset.map(|a| a.symbol.as_str()).unwrap_or_default();
                return Err(EngineError::unsupported_scheme(format!(
                    "{} is on a {:?} network, which has no Tendermint signing scheme",
                    symbol, cfg.network_kind
                )));
            }

            if let Some(network) = &cfg.tendermint_network {
                if network.chain_name != config.network.chain_name {
                    let chain_id = network.chain_id.clone().unwrap_or_default();
                    if chain_id.trim().is_empty() {
                        return Err(EngineError::invalid_transaction(format!(
                            "network {} has no chain id",
                            network.chain_name
                        )));
                    }
                    if network.base_denom.trim().is_empty() {
                        return Err(EngineError::invalid_transaction(format!(
                            "network {} has no base denom",
                            network.chain_name
                        )));
                    }
                    return Ok(Self {
                        scheme: SigningScheme::LegacyAminoJson,
                        chain_name: network.chain_name.clone(),
                        chain_id,
                        base_denom: network.base_denom.clone(),
                    });
                }
            }
        }

        Ok(Self {
            scheme: SigningScheme::Native,
            chain_name: config.network.chain_name.clone(),
            chain_id: config.network.chain_id.clone(),
            base_denom: config.network.base_denom.clone(),
        })
    }
}

// =============================================================================
// Prepared Sign Docs
// =============================================================================

/// Inputs shared by both schemes
#[derive(Debug, Clone, Copy)]
pub struct SigningInput<'a> {
    pub registry: &'a Registry,
    pub messages: &'a [ProtocolMessage],
    pub fee: &'a FeeDescriptor,
    pub memo: &'a str,
    pub public_key: &'a CompressedPublicKey,
    pub account_number: u64,
    pub account_sequence: u64,
    pub chain_id: &'a str,
}

/// A sign doc ready for the signer, in one of the two schemes
#[derive(Debug, Clone)]
pub enum PreparedSignDoc {
    Native(SignableTransaction),
    LegacyAminoJson(LegacySignDoc),
}

impl SigningScheme {
    /// Build the sign doc for this scheme
    pub fn prepare(self, input: &SigningInput<'_>) -> EngineResult<PreparedSignDoc> {
        match self {
            SigningScheme::Native => {
                let signer = SignerEntry {
                    public_key: *input.public_key,
                    account_number: input.account_number,
                    account_sequence: input.account_sequence,
                    sign_mode: SignMode::LegacyAminoJson,
                };
                let mut raw = RawTransaction::new(input.registry, input.chain_id, input.fee.clone())
                    .set_memo(input.memo);
                for message in input.messages {
                    raw = raw.append_message(message.clone());
                }
                let signable = raw.add_signer(signer).to_signable()?;
                Ok(PreparedSignDoc::Native(signable))
            }
            SigningScheme::LegacyAminoJson => {
                Ok(PreparedSignDoc::LegacyAminoJson(LegacySignDoc::assemble(input)?))
            }
        }
    }
}

impl PreparedSignDoc {
    pub fn scheme(&self) -> SigningScheme {
        match self {
            PreparedSignDoc::Native(_) => SigningScheme::Native,
            PreparedSignDoc::LegacyAminoJson(_) => SigningScheme::LegacyAminoJson,
        }
    }

    /// Bytes to send to the signer
    pub fn sign_bytes(&self) -> EngineResult<Vec<u8>> {
        match self {
            PreparedSignDoc::Native(signable) => signable.to_sign_document(0),
            PreparedSignDoc::LegacyAminoJson(doc) => Ok(doc.sign_bytes.clone()),
        }
    }

    /// Attach the signature and produce the wire envelope
    pub fn bind(self, signature: Vec<u8>) -> EngineResult<SignedTransactionEnvelope> {
        match self {
            PreparedSignDoc::Native(signable) => signable.set_signature(0, signature)?.to_signed(),
            PreparedSignDoc::LegacyAminoJson(doc) => doc.bind(signature),
        }
    }
}
