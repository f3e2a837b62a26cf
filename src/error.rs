//! Unified error types for the signing engine
//!
//! Every failure of a signing call flows through [`EngineError`]. The
//! fine-grained [`ErrorCode`] is kept for callers that want to show a precise
//! message, while [`ErrorKind`] gives the four-way split callers branch on.

use crate::provider::SignerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for all signing operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl EngineError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Coarse category of this error
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    // Convenience constructors
    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidAmount, msg)
    }

    pub fn invalid_proposal_id(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidProposalId, msg)
    }

    pub fn invalid_gas_limit(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidGasLimit, msg)
    }

    pub fn invalid_gas_fee(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidGasFee, msg)
    }

    pub fn memo_too_long(length: usize, max: usize) -> Self {
        Self::new(
            ErrorCode::MemoTooLong,
            format!("memo is {} bytes, limit is {}", length, max),
        )
    }

    pub fn invalid_transaction(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidTransaction, msg)
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfig, msg)
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::EncodingFailed, msg)
    }

    pub fn invalid_public_key(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidPublicKey, msg)
    }

    pub fn unregistered_type(type_url: &str) -> Self {
        Self::new(
            ErrorCode::UnregisteredMessageType,
            format!("message type {} is not registered", type_url),
        )
    }

    pub fn unsupported_scheme(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnsupportedScheme, msg)
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for EngineError {}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Validation errors (raised before any device I/O)
    InvalidAmount,
    InvalidProposalId,
    InvalidGasLimit,
    InvalidGasFee,
    MemoTooLong,
    InvalidTransaction,
    InvalidConfig,

    // Encoding errors
    EncodingFailed,
    InvalidPublicKey,
    UnregisteredMessageType,

    // Signer errors
    DeviceUnavailable,
    UserRejected,
    DeviceTimeout,

    UnsupportedScheme,
}

impl ErrorCode {
    pub fn kind(self) -> ErrorKind {
        match self {
            ErrorCode::InvalidAmount
            | ErrorCode::InvalidProposalId
            | ErrorCode::InvalidGasLimit
            | ErrorCode::InvalidGasFee
            | ErrorCode::MemoTooLong
            | ErrorCode::InvalidTransaction
            | ErrorCode::InvalidConfig => ErrorKind::Validation,
            ErrorCode::EncodingFailed
            | ErrorCode::InvalidPublicKey
            | ErrorCode::UnregisteredMessageType => ErrorKind::Encoding,
            ErrorCode::DeviceUnavailable | ErrorCode::UserRejected | ErrorCode::DeviceTimeout => {
                ErrorKind::Signer
            }
            ErrorCode::UnsupportedScheme => ErrorKind::UnsupportedScheme,
        }
    }
}

/// The four failure families of a signing call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Encoding,
    Signer,
    UnsupportedScheme,
}

/// Result type alias for signing operations
pub type EngineResult<T> = Result<T, EngineError>;

// Conversions from common error types

impl From<SignerError> for EngineError {
    fn from(e: SignerError) -> Self {
        let code = match e {
            SignerError::DeviceUnavailable(_) => ErrorCode::DeviceUnavailable,
            SignerError::UserRejected(_) => ErrorCode::UserRejected,
            SignerError::DeviceTimeout(_) => ErrorCode::DeviceTimeout,
        };
        EngineError::new(code, e.reason())
    }
}

impl From<prost::EncodeError> for EngineError {
    fn from(e: prost::EncodeError) -> Self {
        EngineError::new(ErrorCode::EncodingFailed, format!("protobuf encode: {}", e))
    }
}

impl From<prost::DecodeError> for EngineError {
    fn from(e: prost::DecodeError) -> Self {
        EngineError::new(ErrorCode::EncodingFailed, format!("protobuf decode: {}", e))
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::new(ErrorCode::EncodingFailed, format!("json: {}", e))
    }
}

impl From<hex::FromHexError> for EngineError {
    fn from(e: hex::FromHexError) -> Self {
        EngineError::new(ErrorCode::EncodingFailed, format!("hex: {}", e))
    }
}
