//! Crypto error types.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur during key generation, key derivation, or encryption.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Wrong key, tampered ciphertext, or malformed envelope.
    ///
    /// Deliberately carries no detail: callers must not be able to tell
    /// these cases apart.
    #[error("failed to decrypt - invalid key or corrupted data")]
    Decryption,

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// The OS random source failed. Never retried with a weaker source.
    #[error("entropy source unavailable: {0}")]
    EntropySource(String),

    #[error("invalid length: {0} (must be positive)")]
    InvalidLength(usize),

    #[error("invalid alphabet of {0} symbols (must be 1..=256 ASCII symbols)")]
    InvalidAlphabet(usize),
}
