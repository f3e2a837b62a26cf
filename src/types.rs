//! Shared types for the signing engine
//!
//! The unsigned transaction description handed in by the wallet, and the
//! asset/network descriptors it references. Everything here is plain data
//! with serde support so callers can pass transactions in as JSON.

use serde::{Deserialize, Serialize};

// =============================================================================
// Network Descriptors
// =============================================================================

/// Family of the network an asset lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NetworkKind {
    #[default]
    Tendermint,
    Evm,
}

/// Tendermint chain metadata carried by foreign assets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TendermintNetwork {
    /// Human readable chain name, also the signer's app selector
    pub chain_name: String,
    pub chain_id: Option<String>,
    /// Smallest unit, e.g. "uatom"
    pub base_denom: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AssetConfig {
    #[serde(default)]
    pub network_kind: NetworkKind,
    pub chain_id: Option<String>,
    pub tendermint_network: Option<TendermintNetwork>,
}

/// Asset a transaction moves, with its network configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub symbol: String,
    pub config: Option<AssetConfig>,
}

impl Asset {
    /// Asset on a foreign Tendermint chain
    pub fn tendermint(
        symbol: impl Into<String>,
        chain_name: impl Into<String>,
        chain_id: impl Into<String>,
        base_denom: impl Into<String>,
    ) -> Self {
        let chain_id = chain_id.into();
        Self {
            symbol: symbol.into(),
            config: Some(AssetConfig {
                network_kind: NetworkKind::Tendermint,
                chain_id: Some(chain_id.clone()),
                tendermint_network: Some(TendermintNetwork {
                    chain_name: chain_name.into(),
                    chain_id: Some(chain_id),
                    base_denom: base_denom.into(),
                }),
            }),
        }
    }

    /// Asset on an EVM network
    pub fn evm(symbol: impl Into<String>, chain_id: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            config: Some(AssetConfig {
                network_kind: NetworkKind::Evm,
                chain_id: Some(chain_id.into()),
                tendermint_network: None,
            }),
        }
    }
}

// =============================================================================
// Transaction Payloads
// =============================================================================

/// Amount in a given denomination, as a base-unit integer string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    pub fn new(amount: impl Into<String>, denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

/// Governance vote choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteOption {
    Yes,
    Abstain,
    No,
    NoWithVeto,
}

impl VoteOption {
    /// Numeric value on the wire
    pub fn as_i32(&self) -> i32 {
        match self {
            VoteOption::Yes => 1,
            VoteOption::Abstain => 2,
            VoteOption::No => 3,
            VoteOption::NoWithVeto => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextProposalParams {
    pub title: String,
    pub description: String,
}

/// Variant-specific part of an unsigned transaction, one per user intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionKind {
    Transfer {
        from_address: String,
        to_address: String,
        amount: String,
    },
    Delegate {
        delegator_address: String,
        validator_address: String,
        amount: String,
    },
    Undelegate {
        delegator_address: String,
        validator_address: String,
        amount: String,
    },
    Redelegate {
        delegator_address: String,
        source_validator_address: String,
        destination_validator_address: String,
        amount: String,
    },
    RestakeReward {
        delegator_address: String,
        validator_address: String,
        amount: String,
    },
    RestakeAllRewards {
        delegator_address: String,
        validator_addresses: Vec<String>,
        amounts: Vec<String>,
    },
    WithdrawReward {
        delegator_address: String,
        validator_address: String,
    },
    WithdrawAllRewards {
        delegator_address: String,
        validator_addresses: Vec<String>,
    },
    Vote {
        voter: String,
        proposal_id: String,
        option: VoteOption,
    },
    Deposit {
        depositor: String,
        proposal_id: String,
        amount: Vec<Coin>,
    },
    TextProposal {
        proposer: String,
        initial_deposit: Vec<Coin>,
        params: TextProposalParams,
    },
    NftTransfer {
        token_id: String,
        denom_id: String,
        sender: String,
        recipient: String,
    },
    NftMint {
        token_id: String,
        denom_id: String,
        name: String,
        uri: String,
        data: String,
        sender: String,
        recipient: String,
    },
    NftDenomIssue {
        denom_id: String,
        name: String,
        schema: String,
        sender: String,
    },
    IbcTransfer {
        from_address: String,
        to_address: String,
        amount: String,
        port: Option<String>,
        channel: Option<String>,
        latest_block_height: Option<u64>,
    },
}

impl TransactionKind {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            TransactionKind::Transfer { .. } => "transfer",
            TransactionKind::Delegate { .. } => "delegate",
            TransactionKind::Undelegate { .. } => "undelegate",
            TransactionKind::Redelegate { .. } => "redelegate",
            TransactionKind::RestakeReward { .. } => "restake_reward",
            TransactionKind::RestakeAllRewards { .. } => "restake_all_rewards",
            TransactionKind::WithdrawReward { .. } => "withdraw_reward",
            TransactionKind::WithdrawAllRewards { .. } => "withdraw_all_rewards",
            TransactionKind::Vote { .. } => "vote",
            TransactionKind::Deposit { .. } => "deposit",
            TransactionKind::TextProposal { .. } => "text_proposal",
            TransactionKind::NftTransfer { .. } => "nft_transfer",
            TransactionKind::NftMint { .. } => "nft_mint",
            TransactionKind::NftDenomIssue { .. } => "nft_denom_issue",
            TransactionKind::IbcTransfer { .. } => "ibc_transfer",
        }
    }
}

/// A transaction the user wants signed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedTransaction {
    #[serde(default)]
    pub memo: String,
    pub account_number: u64,
    pub account_sequence: u64,
    /// Network the transaction targets; `None` means the home chain
    #[serde(default)]
    pub asset: Option<Asset>,
    pub kind: TransactionKind,
}

impl UnsignedTransaction {
    pub fn new(kind: TransactionKind, account_number: u64, account_sequence: u64) -> Self {
        Self {
            memo: String::new(),
            account_number,
            account_sequence,
            asset: None,
            kind,
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn with_asset(mut self, asset: Asset) -> Self {
        self.asset = Some(asset);
        self
    }
}
