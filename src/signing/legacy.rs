//! Legacy amino JSON signing
//!
//! For Tendermint chains whose apps only verify `SIGN_MODE_LEGACY_AMINO_JSON`.
//! Two renderings of the same transaction are produced side by side:
//! - protobuf `TxBody` and `AuthInfo` bytes, which go on the wire
//! - the canonical `StdSignDoc` JSON, which is what the signer signs
//!
//! Neither is derived from the other; both come from the same messages and
//! fee descriptor.

use super::amino::StdSignDoc;
use super::auth_info::{auth_info_and_bytes, signer_info};
use super::compiler::{compile_transaction, SignedTransactionEnvelope};
use super::{SignMode, SigningInput};
use crate::error::EngineResult;

/// Everything needed to request and bind a legacy signature
#[derive(Debug, Clone, PartialEq)]
pub struct LegacySignDoc {
    pub body_bytes: Vec<u8>,
    pub auth_info_bytes: Vec<u8>,
    pub sign_doc: StdSignDoc,
    /// Canonical JSON of `sign_doc`
    pub sign_bytes: Vec<u8>,
}

impl LegacySignDoc {
    /// Assemble body, auth info and the amino document
    pub fn assemble(input: &SigningInput<'_>) -> EngineResult<Self> {
        let signer = signer_info(
            input.public_key,
            input.account_sequence,
            SignMode::LegacyAminoJson,
        );
        let (_, auth_info_bytes) = auth_info_and_bytes(vec![signer], input.fee)?;

        let body_bytes = input.registry.encode_tx_body(input.messages, input.memo)?;

        let sign_doc = StdSignDoc::new(
            input.messages,
            input.fee,
            input.chain_id,
            input.memo,
            input.account_number,
            input.account_sequence,
        );
        let sign_bytes = sign_doc.serialize()?;

        Ok(Self {
            body_bytes,
            auth_info_bytes,
            sign_doc,
            sign_bytes,
        })
    }

    /// Attach the signature to the binary body and auth info
    pub fn bind(self, signature: Vec<u8>) -> EngineResult<SignedTransactionEnvelope> {
        compile_transaction(self.body_bytes, self.auth_info_bytes, signature)
    }
}
