//! IBC transfer timeouts
//!
//! A transfer carries both a timestamp and a height timeout. The timestamp is
//! `now + window` in nanoseconds (millisecond precision). The height takes
//! the revision number from the chain id suffix and adds a margin to the
//! latest known block height.

use super::proto::Height;
use crate::config::IbcDefaults;
use crate::error::{EngineError, EngineResult};
use chrono::{DateTime, Utc};
use std::time::Duration;

const NANOS_PER_MILLI: u64 = 1_000_000;

/// Both timeout fields of a `MsgTransfer`
#[derive(Debug, Clone, PartialEq)]
pub struct IbcTimeout {
    pub timestamp_nanos: u64,
    pub height: Height,
}

/// Absolute timeout timestamp in nanoseconds since the unix epoch
pub fn timeout_timestamp_nanos(now: DateTime<Utc>, window: Duration) -> EngineResult<u64> {
    let now_ms = u64::try_from(now.timestamp_millis())
        .map_err(|_| EngineError::invalid_transaction("clock is before the unix epoch"))?;
    let window_ms = u64::try_from(window.as_millis())
        .map_err(|_| EngineError::invalid_config("IBC timeout window out of range"))?;

    now_ms
        .checked_add(window_ms)
        .and_then(|ms| ms.checked_mul(NANOS_PER_MILLI))
        .ok_or_else(|| EngineError::invalid_config("IBC timeout timestamp overflows"))
}

/// Revision number encoded as the last `-` separated part of a chain id
///
/// `testnet-croeseid-4` gives 4; ids without a numeric suffix give `default`.
pub fn revision_number_from_chain_id(chain_id: &str, default: u64) -> u64 {
    chain_id
        .rsplit('-')
        .next()
        .filter(|suffix| !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|suffix| suffix.parse().ok())
        .unwrap_or(default)
}

/// Timeout height on the counterparty: latest height plus `margin`
///
/// An unknown (or zero) latest height yields `default` as is.
pub fn revision_height(latest_block_height: Option<u64>, margin: u64, default: u64) -> u64 {
    match latest_block_height {
        Some(height) if height > 0 => height.saturating_add(margin),
        _ => default,
    }
}

/// Compute the full timeout for a transfer leaving `chain_id`
pub fn compute_timeout(
    chain_id: &str,
    latest_block_height: Option<u64>,
    defaults: &IbcDefaults,
    now: DateTime<Utc>,
) -> EngineResult<IbcTimeout> {
    Ok(IbcTimeout {
        timestamp_nanos: timeout_timestamp_nanos(now, defaults.timeout_window())?,
        height: Height {
            revision_number: revision_number_from_chain_id(
                chain_id,
                defaults.default_revision_number,
            ),
            revision_height: revision_height(
                latest_block_height,
                defaults.height_margin,
                defaults.default_revision_height,
            ),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_millis(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn test_timeout_is_exactly_one_window_later() {
        let start = at_millis(1_700_000_000_123);
        let window = Duration::from_millis(3_600_000);
        let timeout = timeout_timestamp_nanos(start, window).unwrap();

        let start_ns = 1_700_000_000_123u64 * 1_000_000;
        assert!(timeout > start_ns);
        assert_eq!(timeout - start_ns, 3_600_000 * 1_000_000);
    }

    #[test]
    fn test_timeout_rejects_pre_epoch_clock() {
        assert!(timeout_timestamp_nanos(at_millis(-1), Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_revision_number() {
        assert_eq!(revision_number_from_chain_id("testnet-croeseid-4", 122), 4);
        assert_eq!(revision_number_from_chain_id("cosmoshub-4", 122), 4);
        assert_eq!(revision_number_from_chain_id("osmosis-1", 122), 1);
        assert_eq!(revision_number_from_chain_id("localnet", 122), 122);
        assert_eq!(revision_number_from_chain_id("chain-x", 122), 122);
        assert_eq!(revision_number_from_chain_id("chain-", 122), 122);
        assert_eq!(revision_number_from_chain_id("", 122), 122);
    }

    #[test]
    fn test_revision_height() {
        assert_eq!(revision_height(Some(1000), 250, 120_000_250), 1250);
        assert_eq!(revision_height(None, 250, 120_000_250), 120_000_250);
        assert_eq!(revision_height(Some(0), 250, 120_000_250), 120_000_250);
        assert_eq!(revision_height(Some(u64::MAX), 250, 1), u64::MAX);
    }

    #[test]
    fn test_compute_timeout() {
        let defaults = IbcDefaults::default();
        let timeout =
            compute_timeout("testnet-croeseid-4", Some(1000), &defaults, at_millis(0)).unwrap();

        assert_eq!(timeout.height.revision_number, 4);
        assert_eq!(timeout.height.revision_height, 1250);
        assert_eq!(timeout.timestamp_nanos, 3_600_000 * 1_000_000);
    }
}
