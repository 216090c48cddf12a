//! Paste service error types.

use clip_crypto::CryptoError;
use clip_store::StoreError;
use thiserror::Error;

/// Result type for paste service operations.
pub type PasteResult<T> = Result<T, PasteError>;

/// Errors returned by the paste service.
#[derive(Debug, Error)]
pub enum PasteError {
    /// No record exists for the id. A valid outcome, not a fault.
    #[error("paste not found: {0}")]
    NotFound(String),

    /// Wrong key or corrupted envelope. Carries no further detail.
    #[error("failed to decrypt - invalid key or corrupted data")]
    Decryption,

    /// The store backend failed. Callers may retry with backoff.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("invalid stored record: {0}")]
    InvalidRecord(String),

    /// The OS random source failed; the operation is aborted.
    #[error("entropy source unavailable: {0}")]
    EntropySource(String),

    #[error("crypto error: {0}")]
    Crypto(CryptoError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("background task failed: {0}")]
    Task(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<StoreError> for PasteError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => PasteError::StoreUnavailable(msg),
            StoreError::InvalidRecord(msg) => PasteError::InvalidRecord(msg),
            StoreError::Config(msg) => PasteError::Config(msg),
        }
    }
}

impl From<CryptoError> for PasteError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::Decryption => PasteError::Decryption,
            CryptoError::EntropySource(msg) => PasteError::EntropySource(msg),
            other => PasteError::Crypto(other),
        }
    }
}

impl From<tokio::task::JoinError> for PasteError {
    fn from(err: tokio::task::JoinError) -> Self {
        PasteError::Task(err.to_string())
    }
}
