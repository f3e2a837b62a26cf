//! Input Sanitization
//!
//! Checks applied to user-supplied values before any message is built:
//! - Memo character replacement and length limits
//! - Base-unit integer amounts
//! - Numeric identifiers (proposal ids)

use crate::error::{EngineError, EngineResult};

/// Characters that the amino JSON canonicalizer escapes
const MEMO_REPLACED_CHARS: [char; 3] = ['&', '<', '>'];

/// Replacement for [`MEMO_REPLACED_CHARS`]
const MEMO_REPLACEMENT: char = '_';

/// Sanitization result
#[derive(Debug, Clone)]
pub struct SanitizeResult<T> {
    pub value: T,
    pub was_modified: bool,
    pub modifications: Vec<String>,
}

impl<T> SanitizeResult<T> {
    pub fn unchanged(value: T) -> Self {
        Self {
            value,
            was_modified: false,
            modifications: Vec::new(),
        }
    }

    pub fn modified(value: T, modifications: Vec<String>) -> Self {
        Self {
            value,
            was_modified: true,
            modifications,
        }
    }
}

/// Replace every `&`, `<` and `>` in a memo with `_`
///
/// Applying it twice gives the same result as applying it once.
pub fn sanitize_memo(memo: &str) -> SanitizeResult<String> {
    let replaced = memo.chars().filter(|c| MEMO_REPLACED_CHARS.contains(c)).count();
    if replaced == 0 {
        return SanitizeResult::unchanged(memo.to_string());
    }

    let cleaned: String = memo
        .chars()
        .map(|c| if MEMO_REPLACED_CHARS.contains(&c) { MEMO_REPLACEMENT } else { c })
        .collect();

    SanitizeResult::modified(cleaned, vec![format!("Replaced {} reserved characters", replaced)])
}

/// Enforce the chain's memo length limit (in bytes)
pub fn validate_memo_length(memo: &str, max: usize) -> EngineResult<()> {
    if memo.len() > max {
        return Err(EngineError::memo_too_long(memo.len(), max));
    }
    Ok(())
}

fn is_unsigned_integer(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Decimal digits with no leading zero, or exactly "0"; the spelling a node
/// gives `Coin.amount` when it re-renders the amino sign doc
fn is_canonical_integer(value: &str) -> bool {
    is_unsigned_integer(value) && (value == "0" || !value.starts_with('0'))
}

/// Validate a base-unit amount (canonical decimal integer)
pub fn validate_base_amount(amount: &str, what: &str) -> EngineResult<String> {
    let trimmed = amount.trim();
    if !is_canonical_integer(trimmed) {
        return Err(EngineError::invalid_amount(format!(
            "{} must be a base-unit integer",
            what
        ))
        .with_details(format!("got {:?}", amount)));
    }
    Ok(trimmed.to_string())
}

/// Validate the gas fee string
pub fn validate_gas_fee(gas_fee: &str) -> EngineResult<String> {
    let trimmed = gas_fee.trim();
    if !is_canonical_integer(trimmed) {
        return Err(EngineError::invalid_gas_fee("gas fee must be a base-unit integer")
            .with_details(format!("got {:?}", gas_fee)));
    }
    Ok(trimmed.to_string())
}

/// Validate the gas limit
pub fn validate_gas_limit(gas_limit: u64) -> EngineResult<u64> {
    if gas_limit == 0 {
        return Err(EngineError::invalid_gas_limit("gas limit must be positive"));
    }
    Ok(gas_limit)
}

/// Parse a governance proposal id
pub fn parse_proposal_id(proposal_id: &str) -> EngineResult<u64> {
    let trimmed = proposal_id.trim();
    if !is_unsigned_integer(trimmed) {
        return Err(EngineError::invalid_proposal_id("proposal id must be an unsigned integer")
            .with_details(format!("got {:?}", proposal_id)));
    }
    trimmed
        .parse::<u64>()
        .map_err(|e| EngineError::invalid_proposal_id(format!("proposal id out of range: {}", e)))
}
