//! Store error types.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a paste store backend.
///
/// "Not found" is not an error: `get` returns `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend unreachable, timed out, or refused the request. Retryable.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored value could not be read back as a record.
    #[error("invalid stored record: {0}")]
    InvalidRecord(String),

    #[error("invalid store configuration: {0}")]
    Config(String),
}
