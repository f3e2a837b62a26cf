//! Binary message registry
//!
//! Set of message type URLs the engine may place in a `TxBody`. It is built
//! once when the engine is created and only read afterwards.

use super::{MessageType, ProtocolMessage, MSG_TRANSFER, NFT_MESSAGE_TYPES, SDK_MESSAGE_TYPES};
use crate::error::{EngineError, EngineResult};
use cosmos_sdk_proto::cosmos::tx::v1beta1::TxBody;
use prost::Message;
use prost_types::Any;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: BTreeMap<&'static str, MessageType>,
}

impl Registry {
    /// Registry with no types at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Cosmos SDK bank, staking, distribution and gov messages
    pub fn with_sdk_defaults() -> Self {
        let mut registry = Self::empty();
        for ty in SDK_MESSAGE_TYPES {
            registry = registry.register(ty);
        }
        registry
    }

    /// SDK defaults plus IBC transfer and the chain-main NFT module
    pub fn wallet_default() -> Self {
        let mut registry = Self::with_sdk_defaults().register(MSG_TRANSFER);
        for ty in NFT_MESSAGE_TYPES {
            registry = registry.register(ty);
        }
        registry
    }

    pub fn register(mut self, ty: MessageType) -> Self {
        self.types.insert(ty.type_url, ty);
        self
    }

    pub fn is_registered(&self, type_url: &str) -> bool {
        self.types.contains_key(type_url)
    }

    /// Encode one message, refusing unregistered types
    pub fn encode_any(&self, msg: &ProtocolMessage) -> EngineResult<Any> {
        if !self.is_registered(msg.type_url()) {
            return Err(EngineError::unregistered_type(msg.type_url()));
        }
        Ok(msg.to_any())
    }

    /// Build the `TxBody` for `messages` and `memo`
    pub fn tx_body(&self, messages: &[ProtocolMessage], memo: &str) -> EngineResult<TxBody> {
        let messages = messages
            .iter()
            .map(|m| self.encode_any(m))
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(TxBody {
            messages,
            memo: memo.to_string(),
            ..Default::default()
        })
    }

    /// Encode the `TxBody` for `messages` and `memo`
    pub fn encode_tx_body(&self, messages: &[ProtocolMessage], memo: &str) -> EngineResult<Vec<u8>> {
        let body = self.tx_body(messages, memo)?;
        let mut bytes = Vec::with_capacity(body.encoded_len());
        body.encode(&mut bytes)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::messages::proto::MsgTransfer;
    use cosmos_sdk_proto::cosmos::bank::v1beta1::MsgSend;

    fn transfer() -> ProtocolMessage {
        ProtocolMessage::IbcTransfer(MsgTransfer {
            source_port: "transfer".into(),
            source_channel: "channel-3".into(),
            sender: "cro1s".into(),
            receiver: "osmo1r".into(),
            ..Default::default()
        })
    }

    #[test]
    fn test_wallet_default_contents() {
        let registry = Registry::wallet_default();
        for ty in SDK_MESSAGE_TYPES.iter().chain(&NFT_MESSAGE_TYPES) {
            assert!(registry.is_registered(ty.type_url), "{} missing", ty.type_url);
        }
        assert!(registry.is_registered("/ibc.applications.transfer.v1.MsgTransfer"));
        assert!(!Registry::empty().is_registered("/cosmos.bank.v1beta1.MsgSend"));
    }

    #[test]
    fn test_unregistered_type_is_encoding_error() {
        let registry = Registry::with_sdk_defaults();
        let err = registry.encode_tx_body(&[transfer()], "").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnregisteredMessageType);
        assert!(err.message.contains("MsgTransfer"));
    }

    #[test]
    fn test_encode_tx_body_round_trip() {
        let registry = Registry::wallet_default();
        let send = ProtocolMessage::Send(MsgSend {
            from_address: "cro1a".into(),
            to_address: "cro1b".into(),
            amount: vec![],
        });

        let bytes = registry.encode_tx_body(&[send, transfer()], "memo").unwrap();
        let body = TxBody::decode(bytes.as_slice()).unwrap();
        assert_eq!(body.memo, "memo");
        assert_eq!(body.messages.len(), 2);
        assert_eq!(body.messages[0].type_url, "/cosmos.bank.v1beta1.MsgSend");
        assert_eq!(body.messages[1].type_url, "/ibc.applications.transfer.v1.MsgTransfer");
    }
}
