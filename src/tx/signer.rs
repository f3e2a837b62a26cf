//! Transaction Signer
//!
//! Drives one signing call end to end:
//! 1. Classify the target chain and pick the signing scheme
//! 2. Normalize memo and fee, build the protocol messages
//! 3. Fetch the public key and assemble the sign doc
//! 4. Request the signature and bind it into the final `TxRaw`
//!
//! Validation happens before the signer is touched. The signer is asked for
//! at most one public key and one signature per call.

use crate::config::WalletConfig;
use crate::error::{EngineError, EngineResult};
use crate::fees::normalize;
use crate::messages::{build_messages, BuildContext, Registry};
use crate::provider::{DerivationPathStandard, SignerError, SignerProvider};
use crate::signing::{
    ChainCapability, CompressedPublicKey, SignedTransactionEnvelope, SigningInput, SigningScheme,
};
use crate::types::UnsignedTransaction;
use crate::{log_debug, log_error, log_info, log_warn};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Result of a signing call with its metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// Lowercase hex of the encoded `TxRaw`
    pub tx_hex: String,
    /// Uppercase SHA-256 of the encoded `TxRaw`
    pub tx_hash: String,
    pub scheme: SigningScheme,
    pub chain_id: String,
    pub envelope: SignedTransactionEnvelope,
}

/// Signing engine bound to one signer account
pub struct TransactionSigner<P> {
    config: WalletConfig,
    provider: P,
    address_index: u32,
    derivation_standard: DerivationPathStandard,
    registry: Registry,
}

impl<P: SignerProvider> TransactionSigner<P> {
    /// Create an engine; fails on an invalid configuration
    pub fn new(
        config: WalletConfig,
        provider: P,
        address_index: u32,
        derivation_standard: DerivationPathStandard,
    ) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            provider,
            address_index,
            derivation_standard,
            registry: Registry::wallet_default(),
        })
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Sign and return the hex-encoded transaction
    pub async fn sign(
        &self,
        tx: &UnsignedTransaction,
        gas_fee: &str,
        gas_limit: u64,
    ) -> EngineResult<String> {
        Ok(self.sign_at(tx, gas_fee, gas_limit, Utc::now()).await?.tx_hex)
    }

    /// Sign with an explicit clock, used for IBC timeouts
    pub async fn sign_at(
        &self,
        tx: &UnsignedTransaction,
        gas_fee: &str,
        gas_limit: u64,
        now: DateTime<Utc>,
    ) -> EngineResult<SignedTransaction> {
        let capability = ChainCapability::classify(tx.asset.as_ref(), &self.config)?;

        let normalized = normalize(
            &tx.memo,
            gas_fee,
            gas_limit,
            &capability.base_denom,
            self.config.max_memo_length,
        )?;

        let ibc = self.config.ibc_defaults_for(&capability.chain_name);
        let ctx = BuildContext {
            denom: &capability.base_denom,
            chain_id: &capability.chain_id,
            ibc,
            now,
        };
        let messages = build_messages(&tx.kind, &ctx)?;

        log_info!(
            "tx",
            "Signing transaction",
            kind = tx.kind.name(),
            scheme = capability.scheme,
            chain = capability.chain_name,
            messages = messages.len(),
        );

        let public_key = self.fetch_public_key(&capability.chain_name).await?;

        let input = SigningInput {
            registry: &self.registry,
            messages: &messages,
            fee: &normalized.fee,
            memo: &normalized.memo,
            public_key: &public_key,
            account_number: tx.account_number,
            account_sequence: tx.account_sequence,
            chain_id: &capability.chain_id,
        };
        let prepared = capability
            .scheme
            .prepare(&input)
            .map_err(assembly_failed("prepare"))?;
        let sign_bytes = prepared.sign_bytes().map_err(assembly_failed("sign_bytes"))?;

        log_debug!(
            "tx",
            "Requesting signature",
            scheme = prepared.scheme(),
            sign_bytes = sign_bytes.len(),
        );

        let signature = self.request_signature(&sign_bytes).await?;
        let envelope = prepared.bind(signature).map_err(assembly_failed("bind"))?;

        let tx_hex = envelope.hex_encoded().map_err(assembly_failed("encode"))?;
        let tx_hash = envelope.tx_hash().map_err(assembly_failed("hash"))?;

        log_info!("tx", "Transaction signed", tx_hash = tx_hash, size = tx_hex.len() / 2);

        Ok(SignedTransaction {
            tx_hex,
            tx_hash,
            scheme: capability.scheme,
            chain_id: capability.chain_id,
            envelope,
        })
    }

    async fn fetch_public_key(&self, chain_name: &str) -> EngineResult<CompressedPublicKey> {
        // Devices answer with the length-prefixed compressed key either way
        let bytes = self
            .call_device(
                "get_public_key",
                self.provider.get_public_key(
                    self.address_index,
                    chain_name,
                    self.derivation_standard,
                    false,
                ),
            )
            .await?;

        CompressedPublicKey::from_device_bytes(&bytes)
    }

    async fn request_signature(&self, sign_bytes: &[u8]) -> EngineResult<Vec<u8>> {
        self.call_device("sign", self.provider.sign(sign_bytes)).await
    }

    /// Await a provider call, bounded by the configured device timeout
    async fn call_device<T, F>(&self, operation: &'static str, call: F) -> EngineResult<T>
    where
        F: Future<Output = Result<T, SignerError>>,
    {
        let result = match self.config.device_timeout() {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(SignerError::DeviceTimeout(format!(
                    "{} did not complete within {} ms",
                    operation,
                    limit.as_millis()
                ))),
            },
            None => call.await,
        };

        result.map_err(|e| {
            log_warn!("tx", "Signer call failed", operation = operation, error = e);
            EngineError::from(e)
        })
    }
}

/// Log and pass through a failure raised after the messages were built
fn assembly_failed(stage: &'static str) -> impl FnOnce(EngineError) -> EngineError {
    move |e| {
        log_error!("tx", "Transaction assembly failed", stage = stage, error = e);
        e
    }
}
