//! Protobuf definitions for messages outside the Cosmos SDK core set.
//!
//! IBC transfer types come from `ibc-proto`. The chain-main NFT messages
//! follow `chainmain/nft/v1/tx.proto` and are declared here.

pub use ibc_proto::cosmos::base::v1beta1::Coin as IbcCoin;
pub use ibc_proto::ibc::applications::transfer::v1::MsgTransfer;
pub use ibc_proto::ibc::core::client::v1::Height;

/// MsgIssueDenom defines an SDK message for creating a new denom.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgIssueDenom {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub schema: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub sender: ::prost::alloc::string::String,
}

/// MsgTransferNFT defines an SDK message for transferring an NFT to recipient.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgTransferNft {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub denom_id: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub sender: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub recipient: ::prost::alloc::string::String,
}

/// MsgMintNFT defines an SDK message for creating a new NFT.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgMintNft {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub denom_id: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub uri: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub data: ::prost::alloc::string::String,
    #[prost(string, tag = "6")]
    pub sender: ::prost::alloc::string::String,
    #[prost(string, tag = "7")]
    pub recipient: ::prost::alloc::string::String,
}
