//! Message Builder
//!
//! Maps an unsigned transaction to the protocol messages of its body. The
//! mapping only renames and repackages fields: amounts stay base-unit
//! integer strings tagged with the chain's denomination.

use super::ibc::compute_timeout;
use super::proto::{IbcCoin, MsgIssueDenom, MsgMintNft, MsgTransfer, MsgTransferNft};
use super::ProtocolMessage;
use crate::config::IbcDefaults;
use crate::error::{EngineError, EngineResult};
use crate::types::{Coin, TransactionKind};
use crate::utils::sanitize::{parse_proposal_id, validate_base_amount};
use chrono::{DateTime, Utc};
use cosmos_sdk_proto::cosmos::bank::v1beta1::MsgSend;
use cosmos_sdk_proto::cosmos::base::v1beta1::Coin as ProtoCoin;
use cosmos_sdk_proto::cosmos::distribution::v1beta1::MsgWithdrawDelegatorReward;
use cosmos_sdk_proto::cosmos::gov::v1beta1::{MsgDeposit, MsgVote, TextProposal};
use cosmos_sdk_proto::cosmos::staking::v1beta1::{MsgBeginRedelegate, MsgDelegate, MsgUndelegate};

/// Chain facts the builder needs
#[derive(Debug, Clone)]
pub struct BuildContext<'a> {
    /// Base denomination of the signing chain
    pub denom: &'a str,
    /// Chain id of the signing chain, source of the IBC revision number
    pub chain_id: &'a str,
    pub ibc: &'a IbcDefaults,
    pub now: DateTime<Utc>,
}

impl BuildContext<'_> {
    fn coin(&self, amount: &str, what: &str) -> EngineResult<ProtoCoin> {
        Ok(ProtoCoin {
            denom: self.denom.to_string(),
            amount: validate_base_amount(amount, what)?,
        })
    }
}

fn coins(list: &[Coin], what: &str) -> EngineResult<Vec<ProtoCoin>> {
    list.iter()
        .map(|c| {
            if c.denom.trim().is_empty() {
                return Err(EngineError::invalid_amount(format!("{} has an empty denom", what)));
            }
            Ok(ProtoCoin {
                denom: c.denom.clone(),
                amount: validate_base_amount(&c.amount, what)?,
            })
        })
        .collect()
}

fn withdraw(delegator: &str, validator: &str) -> ProtocolMessage {
    ProtocolMessage::WithdrawDelegatorReward(MsgWithdrawDelegatorReward {
        delegator_address: delegator.to_string(),
        validator_address: validator.to_string(),
    })
}

fn delegate(delegator: &str, validator: &str, amount: ProtoCoin) -> ProtocolMessage {
    ProtocolMessage::Delegate(MsgDelegate {
        delegator_address: delegator.to_string(),
        validator_address: validator.to_string(),
        amount: Some(amount),
    })
}

/// Build the body messages for `kind`, in order
///
/// All inputs are validated before the first message is produced. A
/// transaction that would carry no messages is rejected.
pub fn build_messages(kind: &TransactionKind, ctx: &BuildContext<'_>) -> EngineResult<Vec<ProtocolMessage>> {
    let messages = match kind {
        TransactionKind::Transfer {
            from_address,
            to_address,
            amount,
        } => vec![ProtocolMessage::Send(MsgSend {
            from_address: from_address.clone(),
            to_address: to_address.clone(),
            amount: vec![ctx.coin(amount, "transfer amount")?],
        })],

        TransactionKind::Delegate {
            delegator_address,
            validator_address,
            amount,
        } => vec![delegate(
            delegator_address,
            validator_address,
            ctx.coin(amount, "delegation amount")?,
        )],

        TransactionKind::Undelegate {
            delegator_address,
            validator_address,
            amount,
        } => vec![ProtocolMessage::Undelegate(MsgUndelegate {
            delegator_address: delegator_address.clone(),
            validator_address: validator_address.clone(),
            amount: Some(ctx.coin(amount, "undelegation amount")?),
        })],

        TransactionKind::Redelegate {
            delegator_address,
            source_validator_address,
            destination_validator_address,
            amount,
        } => vec![ProtocolMessage::BeginRedelegate(MsgBeginRedelegate {
            delegator_address: delegator_address.clone(),
            validator_src_address: source_validator_address.clone(),
            validator_dst_address: destination_validator_address.clone(),
            amount: Some(ctx.coin(amount, "redelegation amount")?),
        })],

        TransactionKind::RestakeReward {
            delegator_address,
            validator_address,
            amount,
        } => {
            let amount = ctx.coin(amount, "restake amount")?;
            vec![
                withdraw(delegator_address, validator_address),
                delegate(delegator_address, validator_address, amount),
            ]
        }

        TransactionKind::RestakeAllRewards {
            delegator_address,
            validator_addresses,
            amounts,
        } => {
            if validator_addresses.len() != amounts.len() {
                return Err(EngineError::invalid_transaction(format!(
                    "{} validators but {} restake amounts",
                    validator_addresses.len(),
                    amounts.len()
                )));
            }
            let amounts = amounts
                .iter()
                .map(|a| ctx.coin(a, "restake amount"))
                .collect::<EngineResult<Vec<_>>>()?;

            // All withdrawals first, then all delegations, both in input order
            let withdrawals = validator_addresses
                .iter()
                .map(|v| withdraw(delegator_address, v));
            let delegations = validator_addresses
                .iter()
                .zip(amounts)
                .map(|(v, amount)| delegate(delegator_address, v, amount));
            withdrawals.chain(delegations).collect()
        }

        TransactionKind::WithdrawReward {
            delegator_address,
            validator_address,
        } => vec![withdraw(delegator_address, validator_address)],

        TransactionKind::WithdrawAllRewards {
            delegator_address,
            validator_addresses,
        } => validator_addresses
            .iter()
            .map(|v| withdraw(delegator_address, v))
            .collect(),

        TransactionKind::Vote {
            voter,
            proposal_id,
            option,
        } => vec![ProtocolMessage::Vote(MsgVote {
            proposal_id: parse_proposal_id(proposal_id)?,
            voter: voter.clone(),
            option: option.as_i32(),
        })],

        TransactionKind::Deposit {
            depositor,
            proposal_id,
            amount,
        } => vec![ProtocolMessage::Deposit(MsgDeposit {
            proposal_id: parse_proposal_id(proposal_id)?,
            depositor: depositor.clone(),
            amount: coins(amount, "deposit amount")?,
        })],

        TransactionKind::TextProposal {
            proposer,
            initial_deposit,
            params,
        } => vec![ProtocolMessage::SubmitTextProposal {
            content: TextProposal {
                title: params.title.clone(),
                description: params.description.clone(),
            },
            initial_deposit: coins(initial_deposit, "initial deposit")?,
            proposer: proposer.clone(),
        }],

        TransactionKind::NftTransfer {
            token_id,
            denom_id,
            sender,
            recipient,
        } => vec![ProtocolMessage::TransferNft(MsgTransferNft {
            id: token_id.clone(),
            denom_id: denom_id.clone(),
            sender: sender.clone(),
            recipient: recipient.clone(),
        })],

        TransactionKind::NftMint {
            token_id,
            denom_id,
            name,
            uri,
            data,
            sender,
            recipient,
        } => vec![ProtocolMessage::MintNft(MsgMintNft {
            id: token_id.clone(),
            denom_id: denom_id.clone(),
            name: name.clone(),
            uri: uri.clone(),
            data: data.clone(),
            sender: sender.clone(),
            recipient: recipient.clone(),
        })],

        TransactionKind::NftDenomIssue {
            denom_id,
            name,
            schema,
            sender,
        } => vec![ProtocolMessage::IssueDenom(MsgIssueDenom {
            id: denom_id.clone(),
            name: name.clone(),
            schema: schema.clone(),
            sender: sender.clone(),
        })],

        TransactionKind::IbcTransfer {
            from_address,
            to_address,
            amount,
            port,
            channel,
            latest_block_height,
        } => {
            let token = ctx.coin(amount, "transfer amount")?;
            let timeout = compute_timeout(ctx.chain_id, *latest_block_height, ctx.ibc, ctx.now)?;
            vec![ProtocolMessage::IbcTransfer(MsgTransfer {
                source_port: port.clone().unwrap_or_default(),
                source_channel: channel.clone().unwrap_or_default(),
                token: Some(IbcCoin {
                    denom: token.denom,
                    amount: token.amount,
                }),
                sender: from_address.clone(),
                receiver: to_address.clone(),
                timeout_height: Some(timeout.height),
                timeout_timestamp: timeout.timestamp_nanos,
                memo: String::new(),
            })]
        }
    };

    if messages.is_empty() {
        return Err(EngineError::invalid_transaction(format!(
            "{} transaction has no messages",
            kind.name()
        )));
    }

    Ok(messages)
}
