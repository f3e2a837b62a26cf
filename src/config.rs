//! Engine Configuration
//!
//! Static settings for a signing engine instance:
//! - Home-chain network descriptor (chain name, chain id, base denom)
//! - IBC timeout defaults, global and per chain
//! - Memo length limit
//! - Optional device timeout
//!
//! Presets cover Crypto.org mainnet and the Croeseid testnet; anything else
//! can be loaded from JSON and checked with [`WalletConfig::validate`].

use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Chain name of the wallet's home network
pub const NATIVE_CHAIN_NAME: &str = "Crypto.org Chain";

/// Default IBC transfer timeout window (one hour)
pub const DEFAULT_IBC_TIMEOUT_MS: u64 = 3_600_000;

/// Revision number used when a chain id carries no numeric suffix
pub const DEFAULT_REVISION_NUMBER: u64 = 122;

/// Revision height used when no latest block height is known
pub const DEFAULT_REVISION_HEIGHT: u64 = 120_000_250;

/// Blocks added on top of the latest height for the timeout height
pub const DEFAULT_HEIGHT_MARGIN: u64 = 250;

/// Cosmos SDK default for MaxMemoCharacters
pub const DEFAULT_MAX_MEMO_LENGTH: usize = 256;

/// Home-chain network descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub chain_name: String,
    pub chain_id: String,
    pub base_denom: String,
}

/// Fallbacks for IBC transfer timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbcDefaults {
    pub default_revision_number: u64,
    pub default_revision_height: u64,
    pub height_margin: u64,
    pub timeout_window_ms: u64,
}

impl Default for IbcDefaults {
    fn default() -> Self {
        Self {
            default_revision_number: DEFAULT_REVISION_NUMBER,
            default_revision_height: DEFAULT_REVISION_HEIGHT,
            height_margin: DEFAULT_HEIGHT_MARGIN,
            timeout_window_ms: DEFAULT_IBC_TIMEOUT_MS,
        }
    }
}

impl IbcDefaults {
    pub fn timeout_window(&self) -> Duration {
        Duration::from_millis(self.timeout_window_ms)
    }
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    pub network: NetworkConfig,
    #[serde(default)]
    pub ibc: IbcDefaults,
    /// IBC defaults keyed by chain name
    #[serde(default)]
    pub ibc_overrides: HashMap<String, IbcDefaults>,
    #[serde(default = "default_max_memo_length")]
    pub max_memo_length: usize,
    /// Upper bound on each signer round trip; `None` waits indefinitely
    #[serde(default)]
    pub device_timeout_ms: Option<u64>,
}

fn default_max_memo_length() -> usize {
    DEFAULT_MAX_MEMO_LENGTH
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl WalletConfig {
    /// Crypto.org Chain mainnet preset
    pub fn mainnet() -> Self {
        Self {
            network: NetworkConfig {
                chain_name: NATIVE_CHAIN_NAME.to_string(),
                chain_id: "crypto-org-chain-mainnet-1".to_string(),
                base_denom: "basecro".to_string(),
            },
            ibc: IbcDefaults::default(),
            ibc_overrides: HashMap::new(),
            max_memo_length: DEFAULT_MAX_MEMO_LENGTH,
            device_timeout_ms: None,
        }
    }

    /// Croeseid testnet preset
    pub fn testnet() -> Self {
        Self {
            network: NetworkConfig {
                chain_name: NATIVE_CHAIN_NAME.to_string(),
                chain_id: "testnet-croeseid-4".to_string(),
                base_denom: "basetcro".to_string(),
            },
            ..Self::mainnet()
        }
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| EngineError::invalid_config(format!("malformed config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_ibc_override(mut self, chain_name: impl Into<String>, defaults: IbcDefaults) -> Self {
        self.ibc_overrides.insert(chain_name.into(), defaults);
        self
    }

    pub fn with_device_timeout(mut self, timeout: Duration) -> Self {
        self.device_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// IBC defaults for a chain, falling back to the global ones
    pub fn ibc_defaults_for(&self, chain_name: &str) -> &IbcDefaults {
        self.ibc_overrides.get(chain_name).unwrap_or(&self.ibc)
    }

    pub fn device_timeout(&self) -> Option<Duration> {
        self.device_timeout_ms.map(Duration::from_millis)
    }

    /// Reject settings that could only produce invalid transactions
    pub fn validate(&self) -> EngineResult<()> {
        if self.network.chain_name.trim().is_empty() {
            return Err(EngineError::invalid_config("network chain name is empty"));
        }
        if self.network.chain_id.trim().is_empty() {
            return Err(EngineError::invalid_config("network chain id is empty"));
        }
        if self.network.base_denom.trim().is_empty() {
            return Err(EngineError::invalid_config("network base denom is empty"));
        }
        if self.max_memo_length == 0 {
            return Err(EngineError::invalid_config("max memo length must be positive"));
        }
        if self.device_timeout_ms == Some(0) {
            return Err(EngineError::invalid_config("device timeout must be positive"));
        }

        for (name, ibc) in std::iter::once(("default", &self.ibc))
            .chain(self.ibc_overrides.iter().map(|(k, v)| (k.as_str(), v)))
        {
            if ibc.timeout_window_ms == 0 {
                return Err(EngineError::invalid_config(format!(
                    "IBC timeout window for {} must be positive",
                    name
                )));
            }
        }

        Ok(())
    }
}
