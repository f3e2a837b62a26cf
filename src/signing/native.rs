//! Native transaction builder
//!
//! Home-chain transactions go through a small builder with three stages:
//!
//! ```text
//! RawTransaction --to_signable()--> SignableTransaction --to_signed()--> SignedTransactionEnvelope
//! ```
//!
//! Body and auth-info bytes are frozen when the raw transaction becomes
//! signable. Sign documents and signatures are then addressed by signer
//! index.

use super::amino::StdSignDoc;
use super::auth_info::{auth_info_and_bytes, signer_info, CompressedPublicKey};
use super::compiler::SignedTransactionEnvelope;
use super::SignMode;
use crate::error::{EngineError, EngineResult};
use crate::fees::FeeDescriptor;
use crate::messages::{ProtocolMessage, Registry};
use cosmos_sdk_proto::cosmos::tx::v1beta1::SignDoc;
use prost::Message;

/// One account signing the transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerEntry {
    pub public_key: CompressedPublicKey,
    pub account_number: u64,
    pub account_sequence: u64,
    pub sign_mode: SignMode,
}

/// Transaction under construction
#[derive(Debug, Clone)]
pub struct RawTransaction<'r> {
    registry: &'r Registry,
    chain_id: String,
    fee: FeeDescriptor,
    memo: String,
    messages: Vec<ProtocolMessage>,
    signers: Vec<SignerEntry>,
}

impl<'r> RawTransaction<'r> {
    pub fn new(registry: &'r Registry, chain_id: impl Into<String>, fee: FeeDescriptor) -> Self {
        Self {
            registry,
            chain_id: chain_id.into(),
            fee,
            memo: String::new(),
            messages: Vec::new(),
            signers: Vec::new(),
        }
    }

    pub fn set_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn append_message(mut self, message: ProtocolMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn add_signer(mut self, signer: SignerEntry) -> Self {
        self.signers.push(signer);
        self
    }

    /// Freeze body and auth info
    pub fn to_signable(self) -> EngineResult<SignableTransaction> {
        if self.messages.is_empty() {
            return Err(EngineError::invalid_transaction("transaction has no messages"));
        }
        if self.signers.is_empty() {
            return Err(EngineError::invalid_transaction("transaction has no signers"));
        }

        let body_bytes = self.registry.encode_tx_body(&self.messages, &self.memo)?;

        let signer_infos = self
            .signers
            .iter()
            .map(|s| signer_info(&s.public_key, s.account_sequence, s.sign_mode))
            .collect();
        let (_, auth_info_bytes) = auth_info_and_bytes(signer_infos, &self.fee)?;

        let signatures = vec![None; self.signers.len()];
        Ok(SignableTransaction {
            chain_id: self.chain_id,
            fee: self.fee,
            memo: self.memo,
            messages: self.messages,
            signers: self.signers,
            body_bytes,
            auth_info_bytes,
            signatures,
        })
    }
}

/// Transaction with frozen bytes, waiting for signatures
#[derive(Debug, Clone)]
pub struct SignableTransaction {
    chain_id: String,
    fee: FeeDescriptor,
    memo: String,
    messages: Vec<ProtocolMessage>,
    signers: Vec<SignerEntry>,
    body_bytes: Vec<u8>,
    auth_info_bytes: Vec<u8>,
    signatures: Vec<Option<Vec<u8>>>,
}

impl SignableTransaction {
    fn signer(&self, index: usize) -> EngineResult<&SignerEntry> {
        self.signers.get(index).ok_or_else(|| {
            EngineError::invalid_transaction(format!(
                "signer index {} out of range ({} signers)",
                index,
                self.signers.len()
            ))
        })
    }

    pub fn body_bytes(&self) -> &[u8] {
        &self.body_bytes
    }

    pub fn auth_info_bytes(&self) -> &[u8] {
        &self.auth_info_bytes
    }

    /// Bytes the signer at `index` must sign, per its sign mode
    pub fn to_sign_document(&self, index: usize) -> EngineResult<Vec<u8>> {
        let signer = self.signer(index)?;
        match signer.sign_mode {
            SignMode::LegacyAminoJson => StdSignDoc::new(
                &self.messages,
                &self.fee,
                &self.chain_id,
                &self.memo,
                signer.account_number,
                signer.account_sequence,
            )
            .serialize(),
            SignMode::Direct => {
                let sign_doc = SignDoc {
                    body_bytes: self.body_bytes.clone(),
                    auth_info_bytes: self.auth_info_bytes.clone(),
                    chain_id: self.chain_id.clone(),
                    account_number: signer.account_number,
                };
                Ok(sign_doc.encode_to_vec())
            }
        }
    }

    pub fn set_signature(mut self, index: usize, signature: Vec<u8>) -> EngineResult<Self> {
        self.signer(index)?;
        if signature.is_empty() {
            return Err(EngineError::encoding("signer returned an empty signature"));
        }
        self.signatures[index] = Some(signature);
        Ok(self)
    }

    /// Final envelope; every signer must have signed
    pub fn to_signed(self) -> EngineResult<SignedTransactionEnvelope> {
        let signatures = self
            .signatures
            .into_iter()
            .enumerate()
            .map(|(i, sig)| {
                sig.ok_or_else(|| {
                    EngineError::invalid_transaction(format!("signature {} is missing", i))
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(SignedTransactionEnvelope {
            body_bytes: self.body_bytes,
            auth_info_bytes: self.auth_info_bytes,
            signatures,
        })
    }
}
