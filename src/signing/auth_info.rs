//! Signer public keys and `AuthInfo` encoding.

use super::SignMode;
use crate::error::{EngineError, EngineResult};
use crate::fees::FeeDescriptor;
use crate::provider::COMPRESSED_PUBKEY_LEN;
use cosmos_sdk_proto::cosmos::crypto::secp256k1::PubKey;
use cosmos_sdk_proto::cosmos::tx::v1beta1::mode_info::{Single, Sum};
use cosmos_sdk_proto::cosmos::tx::v1beta1::{AuthInfo, ModeInfo, SignerInfo};
use prost::Message;
use prost_types::Any;

pub const SECP256K1_PUBKEY_TYPE_URL: &str = "/cosmos.crypto.secp256k1.PubKey";

/// Compressed secp256k1 public key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressedPublicKey([u8; COMPRESSED_PUBKEY_LEN]);

impl CompressedPublicKey {
    /// Parse a bare 33-byte compressed key
    pub fn from_slice(bytes: &[u8]) -> EngineResult<Self> {
        let key: [u8; COMPRESSED_PUBKEY_LEN] = bytes.try_into().map_err(|_| {
            EngineError::invalid_public_key(format!(
                "expected {} byte compressed key, got {} bytes",
                COMPRESSED_PUBKEY_LEN,
                bytes.len()
            ))
        })?;
        if key[0] != 0x02 && key[0] != 0x03 {
            return Err(EngineError::invalid_public_key(format!(
                "compressed key must start with 0x02 or 0x03, got {:#04x}",
                key[0]
            )));
        }
        Ok(Self(key))
    }

    /// Parse the device answer: one length byte followed by the key
    pub fn from_device_bytes(bytes: &[u8]) -> EngineResult<Self> {
        match bytes.split_first() {
            Some((_, key)) if bytes.len() == COMPRESSED_PUBKEY_LEN + 1 => Self::from_slice(key),
            _ => Err(EngineError::invalid_public_key(format!(
                "device returned {} bytes, expected {}",
                bytes.len(),
                COMPRESSED_PUBKEY_LEN + 1
            ))),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// `/cosmos.crypto.secp256k1.PubKey` wrapped in `Any`
    pub fn to_any(&self) -> Any {
        Any {
            type_url: SECP256K1_PUBKEY_TYPE_URL.to_string(),
            value: PubKey { key: self.0.to_vec() }.encode_to_vec(),
        }
    }
}

/// Signer entry of `AuthInfo` with a single sign mode
pub fn signer_info(public_key: &CompressedPublicKey, sequence: u64, mode: SignMode) -> SignerInfo {
    let single = Single { mode: mode.as_proto() };
    SignerInfo {
        public_key: Some(public_key.to_any()),
        mode_info: Some(ModeInfo {
            sum: Some(Sum::Single(single)),
        }),
        sequence,
    }
}

/// Build and encode `AuthInfo`
pub fn auth_info_and_bytes(
    signer_infos: Vec<SignerInfo>,
    fee: &FeeDescriptor,
) -> EngineResult<(AuthInfo, Vec<u8>)> {
    let auth_info = AuthInfo {
        signer_infos,
        fee: Some(fee.to_proto()),
        ..Default::default()
    };

    let mut auth_buf = Vec::with_capacity(auth_info.encoded_len());
    auth_info
        .encode(&mut auth_buf)
        .map_err(|e| EngineError::encoding(format!("AuthInfo: {}", e)))?;

    Ok((auth_info, auth_buf))
}
