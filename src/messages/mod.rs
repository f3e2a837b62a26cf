//! Protocol Messages
//!
//! The closed set of Cosmos messages the wallet can sign. Each message is
//! held as its protobuf struct and renders from that single value into both
//! wire forms:
//! - `Any` for the protobuf `TxBody`
//! - amino JSON for legacy sign docs
//!
//! Type URLs and amino names live in one table ([`MessageType`]).

pub mod builder;
pub mod ibc;
pub mod proto;
pub mod registry;

pub use builder::{build_messages, BuildContext};
pub use registry::Registry;

use cosmos_sdk_proto::cosmos::bank::v1beta1::MsgSend;
use cosmos_sdk_proto::cosmos::base::v1beta1::Coin;
use cosmos_sdk_proto::cosmos::distribution::v1beta1::MsgWithdrawDelegatorReward;
use cosmos_sdk_proto::cosmos::gov::v1beta1::{MsgDeposit, MsgSubmitProposal, MsgVote, TextProposal};
use cosmos_sdk_proto::cosmos::staking::v1beta1::{MsgBeginRedelegate, MsgDelegate, MsgUndelegate};
use prost::Message;
use prost_types::Any;
use serde_json::{json, Value};

use proto::{Height, IbcCoin, MsgIssueDenom, MsgMintNft, MsgTransfer, MsgTransferNft};

// =============================================================================
// Message Type Table
// =============================================================================

/// Protobuf type URL and amino name of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageType {
    pub type_url: &'static str,
    pub amino_type: &'static str,
}

pub const MSG_SEND: MessageType = MessageType {
    type_url: "/cosmos.bank.v1beta1.MsgSend",
    amino_type: "cosmos-sdk/MsgSend",
};

pub const MSG_DELEGATE: MessageType = MessageType {
    type_url: "/cosmos.staking.v1beta1.MsgDelegate",
    amino_type: "cosmos-sdk/MsgDelegate",
};

pub const MSG_UNDELEGATE: MessageType = MessageType {
    type_url: "/cosmos.staking.v1beta1.MsgUndelegate",
    amino_type: "cosmos-sdk/MsgUndelegate",
};

pub const MSG_BEGIN_REDELEGATE: MessageType = MessageType {
    type_url: "/cosmos.staking.v1beta1.MsgBeginRedelegate",
    amino_type: "cosmos-sdk/MsgBeginRedelegate",
};

pub const MSG_WITHDRAW_DELEGATOR_REWARD: MessageType = MessageType {
    type_url: "/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward",
    amino_type: "cosmos-sdk/MsgWithdrawDelegationReward",
};

pub const MSG_VOTE: MessageType = MessageType {
    type_url: "/cosmos.gov.v1beta1.MsgVote",
    amino_type: "cosmos-sdk/MsgVote",
};

pub const MSG_DEPOSIT: MessageType = MessageType {
    type_url: "/cosmos.gov.v1beta1.MsgDeposit",
    amino_type: "cosmos-sdk/MsgDeposit",
};

pub const MSG_SUBMIT_PROPOSAL: MessageType = MessageType {
    type_url: "/cosmos.gov.v1beta1.MsgSubmitProposal",
    amino_type: "cosmos-sdk/MsgSubmitProposal",
};

/// Proposal content, nested inside [`MSG_SUBMIT_PROPOSAL`]
pub const TEXT_PROPOSAL: MessageType = MessageType {
    type_url: "/cosmos.gov.v1beta1.TextProposal",
    amino_type: "cosmos-sdk/TextProposal",
};

pub const MSG_TRANSFER: MessageType = MessageType {
    type_url: "/ibc.applications.transfer.v1.MsgTransfer",
    amino_type: "cosmos-sdk/MsgTransfer",
};

pub const MSG_TRANSFER_NFT: MessageType = MessageType {
    type_url: "/chainmain.nft.v1.MsgTransferNFT",
    amino_type: "chainmain/nft/MsgTransferNFT",
};

pub const MSG_MINT_NFT: MessageType = MessageType {
    type_url: "/chainmain.nft.v1.MsgMintNFT",
    amino_type: "chainmain/nft/MsgMintNFT",
};

pub const MSG_ISSUE_DENOM: MessageType = MessageType {
    type_url: "/chainmain.nft.v1.MsgIssueDenom",
    amino_type: "chainmain/nft/MsgIssueDenom",
};

/// Messages every Cosmos SDK chain understands
pub const SDK_MESSAGE_TYPES: [MessageType; 8] = [
    MSG_SEND,
    MSG_DELEGATE,
    MSG_UNDELEGATE,
    MSG_BEGIN_REDELEGATE,
    MSG_WITHDRAW_DELEGATOR_REWARD,
    MSG_VOTE,
    MSG_DEPOSIT,
    MSG_SUBMIT_PROPOSAL,
];

/// chain-main NFT module messages
pub const NFT_MESSAGE_TYPES: [MessageType; 3] = [MSG_TRANSFER_NFT, MSG_MINT_NFT, MSG_ISSUE_DENOM];

// =============================================================================
// Protocol Message
// =============================================================================

/// One message of a transaction body
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolMessage {
    Send(MsgSend),
    Delegate(MsgDelegate),
    Undelegate(MsgUndelegate),
    BeginRedelegate(MsgBeginRedelegate),
    WithdrawDelegatorReward(MsgWithdrawDelegatorReward),
    Vote(MsgVote),
    Deposit(MsgDeposit),
    SubmitTextProposal {
        content: TextProposal,
        initial_deposit: Vec<Coin>,
        proposer: String,
    },
    IbcTransfer(MsgTransfer),
    TransferNft(MsgTransferNft),
    MintNft(MsgMintNft),
    IssueDenom(MsgIssueDenom),
}

impl ProtocolMessage {
    pub fn message_type(&self) -> &'static MessageType {
        match self {
            ProtocolMessage::Send(_) => &MSG_SEND,
            ProtocolMessage::Delegate(_) => &MSG_DELEGATE,
            ProtocolMessage::Undelegate(_) => &MSG_UNDELEGATE,
            ProtocolMessage::BeginRedelegate(_) => &MSG_BEGIN_REDELEGATE,
            ProtocolMessage::WithdrawDelegatorReward(_) => &MSG_WITHDRAW_DELEGATOR_REWARD,
            ProtocolMessage::Vote(_) => &MSG_VOTE,
            ProtocolMessage::Deposit(_) => &MSG_DEPOSIT,
            ProtocolMessage::SubmitTextProposal { .. } => &MSG_SUBMIT_PROPOSAL,
            ProtocolMessage::IbcTransfer(_) => &MSG_TRANSFER,
            ProtocolMessage::TransferNft(_) => &MSG_TRANSFER_NFT,
            ProtocolMessage::MintNft(_) => &MSG_MINT_NFT,
            ProtocolMessage::IssueDenom(_) => &MSG_ISSUE_DENOM,
        }
    }

    pub fn type_url(&self) -> &'static str {
        self.message_type().type_url
    }

    /// Protobuf encoding of the message body
    pub fn encode_value(&self) -> Vec<u8> {
        match self {
            ProtocolMessage::Send(m) => m.encode_to_vec(),
            ProtocolMessage::Delegate(m) => m.encode_to_vec(),
            ProtocolMessage::Undelegate(m) => m.encode_to_vec(),
            ProtocolMessage::BeginRedelegate(m) => m.encode_to_vec(),
            ProtocolMessage::WithdrawDelegatorReward(m) => m.encode_to_vec(),
            ProtocolMessage::Vote(m) => m.encode_to_vec(),
            ProtocolMessage::Deposit(m) => m.encode_to_vec(),
            ProtocolMessage::SubmitTextProposal {
                content,
                initial_deposit,
                proposer,
            } => MsgSubmitProposal {
                content: Some(Any {
                    type_url: TEXT_PROPOSAL.type_url.to_string(),
                    value: content.encode_to_vec(),
                }),
                initial_deposit: initial_deposit.clone(),
                proposer: proposer.clone(),
            }
            .encode_to_vec(),
            ProtocolMessage::IbcTransfer(m) => m.encode_to_vec(),
            ProtocolMessage::TransferNft(m) => m.encode_to_vec(),
            ProtocolMessage::MintNft(m) => m.encode_to_vec(),
            ProtocolMessage::IssueDenom(m) => m.encode_to_vec(),
        }
    }

    /// Wrap as a protobuf `Any`
    pub fn to_any(&self) -> Any {
        Any {
            type_url: self.type_url().to_string(),
            value: self.encode_value(),
        }
    }

    /// Amino JSON form: `{"type": <amino name>, "value": {...}}`
    pub fn to_amino(&self) -> Value {
        json!({
            "type": self.message_type().amino_type,
            "value": self.amino_value(),
        })
    }

    fn amino_value(&self) -> Value {
        match self {
            ProtocolMessage::Send(m) => json!({
                "amount": amino_coins(&m.amount),
                "from_address": m.from_address,
                "to_address": m.to_address,
            }),
            ProtocolMessage::Delegate(m) => json!({
                "amount": amino_coin(m.amount.as_ref()),
                "delegator_address": m.delegator_address,
                "validator_address": m.validator_address,
            }),
            ProtocolMessage::Undelegate(m) => json!({
                "amount": amino_coin(m.amount.as_ref()),
                "delegator_address": m.delegator_address,
                "validator_address": m.validator_address,
            }),
            ProtocolMessage::BeginRedelegate(m) => json!({
                "amount": amino_coin(m.amount.as_ref()),
                "delegator_address": m.delegator_address,
                "validator_dst_address": m.validator_dst_address,
                "validator_src_address": m.validator_src_address,
            }),
            ProtocolMessage::WithdrawDelegatorReward(m) => json!({
                "delegator_address": m.delegator_address,
                "validator_address": m.validator_address,
            }),
            ProtocolMessage::Vote(m) => json!({
                "option": m.option,
                "proposal_id": m.proposal_id.to_string(),
                "voter": m.voter,
            }),
            ProtocolMessage::Deposit(m) => json!({
                "amount": amino_coins(&m.amount),
                "depositor": m.depositor,
                "proposal_id": m.proposal_id.to_string(),
            }),
            ProtocolMessage::SubmitTextProposal {
                content,
                initial_deposit,
                proposer,
            } => json!({
                "content": {
                    "type": TEXT_PROPOSAL.amino_type,
                    "value": {
                        "description": content.description,
                        "title": content.title,
                    },
                },
                "initial_deposit": amino_coins(initial_deposit),
                "proposer": proposer,
            }),
            ProtocolMessage::IbcTransfer(m) => {
                let mut value = json!({
                    "receiver": m.receiver,
                    "sender": m.sender,
                    "source_channel": m.source_channel,
                    "source_port": m.source_port,
                    "timeout_height": amino_height(m.timeout_height.as_ref()),
                    "token": amino_ibc_coin(m.token.as_ref()),
                });
                // Zero timestamps are omitted, as the SDK's amino codec does
                if m.timeout_timestamp != 0 {
                    value["timeout_timestamp"] = Value::String(m.timeout_timestamp.to_string());
                }
                if !m.memo.is_empty() {
                    value["memo"] = Value::String(m.memo.clone());
                }
                value
            }
            ProtocolMessage::TransferNft(m) => json!({
                "denom_id": m.denom_id,
                "id": m.id,
                "recipient": m.recipient,
                "sender": m.sender,
            }),
            ProtocolMessage::MintNft(m) => json!({
                "data": m.data,
                "denom_id": m.denom_id,
                "id": m.id,
                "name": m.name,
                "recipient": m.recipient,
                "sender": m.sender,
                "uri": m.uri,
            }),
            ProtocolMessage::IssueDenom(m) => json!({
                "id": m.id,
                "name": m.name,
                "schema": m.schema,
                "sender": m.sender,
            }),
        }
    }
}

fn amino_coin(coin: Option<&Coin>) -> Value {
    match coin {
        Some(c) => json!({ "amount": c.amount, "denom": c.denom }),
        None => Value::Null,
    }
}

fn amino_coins(coins: &[Coin]) -> Value {
    Value::Array(coins.iter().map(|c| amino_coin(Some(c))).collect())
}

fn amino_ibc_coin(coin: Option<&IbcCoin>) -> Value {
    match coin {
        Some(c) => json!({ "amount": c.amount, "denom": c.denom }),
        None => Value::Null,
    }
}

fn amino_height(height: Option<&Height>) -> Value {
    let mut out = serde_json::Map::new();
    if let Some(h) = height {
        if h.revision_height != 0 {
            out.insert("revision_height".into(), Value::String(h.revision_height.to_string()));
        }
        if h.revision_number != 0 {
            out.insert("revision_number".into(), Value::String(h.revision_number.to_string()));
        }
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(amount: &str) -> Coin {
        Coin {
            denom: "basecro".into(),
            amount: amount.into(),
        }
    }

    #[test]
    fn test_send_renderings() {
        let msg = ProtocolMessage::Send(MsgSend {
            from_address: "cro1from".into(),
            to_address: "cro1to".into(),
            amount: vec![coin("100")],
        });

        let any = msg.to_any();
        assert_eq!(any.type_url, "/cosmos.bank.v1beta1.MsgSend");
        let decoded = MsgSend::decode(any.value.as_slice()).unwrap();
        assert_eq!(decoded.amount[0].amount, "100");

        let amino = msg.to_amino();
        assert_eq!(amino["type"], "cosmos-sdk/MsgSend");
        assert_eq!(amino["value"]["amount"][0]["amount"], "100");
        assert_eq!(amino["value"]["from_address"], "cro1from");
    }

    #[test]
    fn test_withdraw_amino_name() {
        let msg = ProtocolMessage::WithdrawDelegatorReward(MsgWithdrawDelegatorReward {
            delegator_address: "cro1d".into(),
            validator_address: "crocncl1v".into(),
        });
        assert_eq!(msg.to_amino()["type"], "cosmos-sdk/MsgWithdrawDelegationReward");
        assert_eq!(
            msg.type_url(),
            "/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward"
        );
    }

    #[test]
    fn test_vote_amino_uses_string_id_and_numeric_option() {
        let msg = ProtocolMessage::Vote(MsgVote {
            proposal_id: 12,
            voter: "cro1voter".into(),
            option: 1,
        });
        let amino = msg.to_amino();
        assert_eq!(amino["value"]["proposal_id"], "12");
        assert_eq!(amino["value"]["option"], 1);
    }

    #[test]
    fn test_text_proposal_nests_content() {
        let msg = ProtocolMessage::SubmitTextProposal {
            content: TextProposal {
                title: "Title".into(),
                description: "Body".into(),
            },
            initial_deposit: vec![coin("10")],
            proposer: "cro1p".into(),
        };

        let decoded = MsgSubmitProposal::decode(msg.to_any().value.as_slice()).unwrap();
        let content = decoded.content.unwrap();
        assert_eq!(content.type_url, "/cosmos.gov.v1beta1.TextProposal");
        assert_eq!(TextProposal::decode(content.value.as_slice()).unwrap().title, "Title");

        let amino = msg.to_amino();
        assert_eq!(amino["value"]["content"]["type"], "cosmos-sdk/TextProposal");
        assert_eq!(amino["value"]["initial_deposit"][0]["amount"], "10");
    }

    #[test]
    fn test_ibc_transfer_amino_height_and_timestamp() {
        let msg = ProtocolMessage::IbcTransfer(MsgTransfer {
            source_port: "transfer".into(),
            source_channel: "channel-0".into(),
            token: Some(IbcCoin {
                denom: "basecro".into(),
                amount: "5".into(),
            }),
            sender: "cro1s".into(),
            receiver: "cosmos1r".into(),
            timeout_height: Some(Height {
                revision_number: 4,
                revision_height: 1250,
            }),
            timeout_timestamp: 1_700_000_000_000_000_000,
            ..Default::default()
        });

        let amino = msg.to_amino();
        assert_eq!(amino["type"], "cosmos-sdk/MsgTransfer");
        assert_eq!(amino["value"]["timeout_height"]["revision_number"], "4");
        assert_eq!(amino["value"]["timeout_height"]["revision_height"], "1250");
        assert_eq!(amino["value"]["timeout_timestamp"], "1700000000000000000");

        let decoded = MsgTransfer::decode(msg.to_any().value.as_slice()).unwrap();
        assert_eq!(decoded.timeout_height.unwrap().revision_height, 1250);
    }

    #[test]
    fn test_ibc_transfer_amino_omits_defaults() {
        let msg = ProtocolMessage::IbcTransfer(MsgTransfer {
            source_port: "transfer".into(),
            source_channel: "channel-0".into(),
            token: Some(IbcCoin {
                denom: "basecro".into(),
                amount: "5".into(),
            }),
            sender: "cro1s".into(),
            receiver: "cosmos1r".into(),
            timeout_height: None,
            timeout_timestamp: 0,
            ..Default::default()
        });
        let amino = msg.to_amino();
        assert_eq!(amino["value"]["timeout_height"], json!({}));
        assert!(amino["value"].get("timeout_timestamp").is_none());
    }

    #[test]
    fn test_nft_messages() {
        let mint = ProtocolMessage::MintNft(MsgMintNft {
            id: "token1".into(),
            denom_id: "denom1".into(),
            name: "Name".into(),
            uri: "https://x".into(),
            data: "{}".into(),
            sender: "cro1s".into(),
            recipient: "cro1r".into(),
        });
        assert_eq!(mint.type_url(), "/chainmain.nft.v1.MsgMintNFT");
        assert_eq!(mint.to_amino()["type"], "chainmain/nft/MsgMintNFT");
        let decoded = MsgMintNft::decode(mint.to_any().value.as_slice()).unwrap();
        assert_eq!(decoded.recipient, "cro1r");

        let issue = ProtocolMessage::IssueDenom(MsgIssueDenom {
            id: "denom1".into(),
            name: "Denom".into(),
            schema: "".into(),
            sender: "cro1s".into(),
        });
        assert_eq!(issue.to_amino()["value"]["schema"], "");
    }
}
