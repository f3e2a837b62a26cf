//! Fee and Memo Normalization
//!
//! Produces the memo and fee descriptor shared by both signing schemes, so
//! the binary auth info and the amino sign doc are rendered from one value.

use crate::error::EngineResult;
use crate::utils::sanitize::{
    sanitize_memo, validate_gas_fee, validate_gas_limit, validate_memo_length,
};
use crate::log_debug;
use cosmos_sdk_proto::cosmos::base::v1beta1::Coin as ProtoCoin;
use cosmos_sdk_proto::cosmos::tx::v1beta1::Fee;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Fee paid in a single denomination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeDescriptor {
    pub denom: String,
    /// Base-unit integer string
    pub amount: String,
    pub gas_limit: u64,
}

impl FeeDescriptor {
    pub fn coins(&self) -> Vec<ProtoCoin> {
        vec![ProtoCoin {
            denom: self.denom.clone(),
            amount: self.amount.clone(),
        }]
    }

    /// Protobuf form, as carried in `AuthInfo`
    pub fn to_proto(&self) -> Fee {
        Fee {
            amount: self.coins(),
            gas_limit: self.gas_limit,
            ..Default::default()
        }
    }

    /// Amino form; gas travels as a string
    pub fn to_amino(&self) -> Value {
        json!({
            "amount": [{ "amount": self.amount, "denom": self.denom }],
            "gas": self.gas_limit.to_string(),
        })
    }
}

/// Memo and fee after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFee {
    pub memo: String,
    pub fee: FeeDescriptor,
}

/// Sanitize the memo and assemble the fee descriptor
///
/// Fails with a validation error on a non-integer gas fee, a zero gas limit
/// or an over-long memo.
pub fn normalize(
    memo: &str,
    gas_fee: &str,
    gas_limit: u64,
    denom: &str,
    max_memo_length: usize,
) -> EngineResult<NormalizedFee> {
    let amount = validate_gas_fee(gas_fee)?;
    let gas_limit = validate_gas_limit(gas_limit)?;

    let sanitized = sanitize_memo(memo);
    if sanitized.was_modified {
        log_debug!(
            "fees",
            "Memo sanitized",
            changes = sanitized.modifications.join(", ")
        );
    }
    validate_memo_length(&sanitized.value, max_memo_length)?;

    Ok(NormalizedFee {
        memo: sanitized.value,
        fee: FeeDescriptor {
            denom: denom.to_string(),
            amount,
            gas_limit,
        },
    })
}
