//! Transaction Compiler
//!
//! Binds an external signature to the exact body and auth-info bytes it was
//! produced for, yielding the broadcast-ready `TxRaw`.

use crate::error::{EngineError, EngineResult};
use cosmos_sdk_proto::cosmos::tx::v1beta1::{AuthInfo, TxBody, TxRaw};
use prost::Message;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Signed transaction, as carried on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransactionEnvelope {
    pub body_bytes: Vec<u8>,
    pub auth_info_bytes: Vec<u8>,
    pub signatures: Vec<Vec<u8>>,
}

impl SignedTransactionEnvelope {
    pub fn to_tx_raw(&self) -> TxRaw {
        TxRaw {
            body_bytes: self.body_bytes.clone(),
            auth_info_bytes: self.auth_info_bytes.clone(),
            signatures: self.signatures.clone(),
        }
    }

    /// Protobuf encoding of the `TxRaw`
    pub fn encode(&self) -> EngineResult<Vec<u8>> {
        let tx_raw = self.to_tx_raw();
        let mut tx_bytes = Vec::with_capacity(tx_raw.encoded_len());
        tx_raw
            .encode(&mut tx_bytes)
            .map_err(|e| EngineError::encoding(format!("TxRaw: {}", e)))?;
        Ok(tx_bytes)
    }

    /// Lowercase hex of the encoded `TxRaw`, ready for broadcast
    pub fn hex_encoded(&self) -> EngineResult<String> {
        Ok(hex::encode(self.encode()?))
    }

    /// Transaction hash as reported by Tendermint nodes (uppercase SHA-256)
    pub fn tx_hash(&self) -> EngineResult<String> {
        let digest = Sha256::digest(self.encode()?);
        Ok(hex::encode_upper(digest))
    }

    pub fn decode(bytes: &[u8]) -> EngineResult<Self> {
        let tx_raw = TxRaw::decode(bytes)?;
        Ok(Self {
            body_bytes: tx_raw.body_bytes,
            auth_info_bytes: tx_raw.auth_info_bytes,
            signatures: tx_raw.signatures,
        })
    }

    pub fn from_hex(hex_str: &str) -> EngineResult<Self> {
        Self::decode(&hex::decode(hex_str.trim())?)
    }

    pub fn body(&self) -> EngineResult<TxBody> {
        Ok(TxBody::decode(self.body_bytes.as_slice())?)
    }

    pub fn auth_info(&self) -> EngineResult<AuthInfo> {
        Ok(AuthInfo::decode(self.auth_info_bytes.as_slice())?)
    }
}

/// Combine body bytes, auth-info bytes and one signature
pub fn compile_transaction(
    body_bytes: Vec<u8>,
    auth_info_bytes: Vec<u8>,
    signature: Vec<u8>,
) -> EngineResult<SignedTransactionEnvelope> {
    if signature.is_empty() {
        return Err(EngineError::encoding("signer returned an empty signature"));
    }
    Ok(SignedTransactionEnvelope {
        body_bytes,
        auth_info_bytes,
        signatures: vec![signature],
    })
}
