#![allow(dead_code)]

use async_trait::async_trait;
use cosmos_ledger_signer::{DerivationPathStandard, SignerError, SignerProvider};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Compressed key the stub device hands out (after the length byte)
pub const STUB_PUBKEY: [u8; 33] = [
    0x02, 0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac, 0x55, 0xa0, 0x62, 0x95, 0xce, 0x87,
    0x0b, 0x07, 0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9, 0x59, 0xf2, 0x81, 0x5b, 0x16,
    0xf8, 0x17, 0x98,
];

pub fn stub_signature() -> Vec<u8> {
    (0u8..64).collect()
}

/// Deterministic signer that records every request
pub struct StubSigner {
    pub device_pubkey: Vec<u8>,
    pub signature: Vec<u8>,
    pub sign_error: Option<SignerError>,
    pub delay: Option<Duration>,
    pub pubkey_calls: AtomicUsize,
    pub sign_calls: AtomicUsize,
    pub requested_chains: Mutex<Vec<String>>,
    pub signed_messages: Mutex<Vec<Vec<u8>>>,
}

impl StubSigner {
    pub fn new() -> Self {
        let mut device_pubkey = vec![33u8];
        device_pubkey.extend_from_slice(&STUB_PUBKEY);
        Self {
            device_pubkey,
            signature: stub_signature(),
            sign_error: None,
            delay: None,
            pubkey_calls: AtomicUsize::new(0),
            sign_calls: AtomicUsize::new(0),
            requested_chains: Mutex::new(Vec::new()),
            signed_messages: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting(reason: &str) -> Self {
        Self {
            sign_error: Some(SignerError::UserRejected(reason.to_string())),
            ..Self::new()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    pub fn with_device_pubkey(bytes: Vec<u8>) -> Self {
        Self {
            device_pubkey: bytes,
            ..Self::new()
        }
    }

    pub fn pubkey_calls(&self) -> usize {
        self.pubkey_calls.load(Ordering::SeqCst)
    }

    pub fn sign_calls(&self) -> usize {
        self.sign_calls.load(Ordering::SeqCst)
    }

    pub fn last_signed_json(&self) -> serde_json::Value {
        let messages = self.signed_messages.lock().unwrap();
        serde_json::from_slice(messages.last().expect("nothing was signed")).unwrap()
    }
}

#[async_trait]
impl SignerProvider for StubSigner {
    async fn get_public_key(
        &self,
        _address_index: u32,
        chain_name: &str,
        _standard: DerivationPathStandard,
        _compressed: bool,
    ) -> Result<Vec<u8>, SignerError> {
        self.pubkey_calls.fetch_add(1, Ordering::SeqCst);
        self.requested_chains.lock().unwrap().push(chain_name.to_string());
        Ok(self.device_pubkey.clone())
    }

    async fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.signed_messages.lock().unwrap().push(message.to_vec());
        match &self.sign_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.signature.clone()),
        }
    }
}
