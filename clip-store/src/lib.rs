//! Ciphertext storage for clip.
//!
//! A paste store maps an opaque paste id to a serialized record. The store
//! never sees plaintext or keys, only the JSON-encoded envelope.
//!
//! # Backends
//!
//! - [`MemoryStore`]: process-local map, lost on restart. Single instance
//!   deployments and tests.
//! - [`RedisStore`]: string keys `paste:<id>` in Redis or Valkey.
//! - [`S3Store`]: objects in an S3-compatible bucket under `paste:<id>`.
//!
//! The backend is chosen once at startup from [`StoreConfig`] and handed to
//! the service as an `Arc<dyn PasteStore>`.

use async_trait::async_trait;

pub mod config;
mod error;
pub mod memory;
pub mod redis;
pub mod s3;

pub use config::{RedisSettings, S3Settings, StoreConfig, open_store};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use crate::redis::RedisStore;
pub use s3::S3Store;

/// Namespace prefix for paste records in shared key-value backends.
pub const KEY_PREFIX: &str = "paste:";

/// Returns the namespaced backend key for a paste id.
pub fn paste_key(id: &str) -> String {
    format!("{KEY_PREFIX}{id}")
}

// ============================================================================
// PasteStore
// ============================================================================

/// Durable mapping from paste id to serialized record.
#[async_trait]
pub trait PasteStore: Send + Sync {
    /// Returns the record stored under `id`, or `None` if there is none.
    async fn get(&self, id: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `id`, overwriting any previous value.
    ///
    /// The write is durable when this returns.
    async fn set(&self, id: &str, value: String) -> StoreResult<()>;

    /// Stores `value` under `id` only if nothing is stored there yet.
    /// Returns `false` if `id` was already taken.
    ///
    /// The default is a probe followed by a write. It is not atomic: two
    /// writers racing on the same id can both observe it free and the later
    /// write wins. Backends with a conditional write override this.
    async fn set_if_absent(&self, id: &str, value: String) -> StoreResult<bool> {
        if self.get(id).await?.is_some() {
            return Ok(false);
        }
        self.set(id, value).await?;
        Ok(true)
    }
}
