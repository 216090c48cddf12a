//! Paste orchestration.
//!
//! The service allocates ids, writes records, and reads them back. It never
//! sees a paste key except on the raw-download path, where the client sends
//! the key along with the id so the server can return plaintext directly.
//! That path trades the end-to-end guarantee for convenience and is only
//! reached when the caller asks for it explicitly.

use crate::config::ServiceConfig;
use crate::error::{PasteError, PasteResult};
use crate::locator::Locator;
use crate::record::StoredPaste;
use clip_crypto::{DEFAULT_ID_LENGTH, DEFAULT_KEY_LENGTH, Envelope, generate_id, generate_key};
use clip_store::{PasteStore, open_store};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Result of a submission: the new paste id and the key it was encrypted with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub id: String,
    pub key: String,
}

impl Submission {
    pub fn locator(&self) -> Locator {
        Locator::new(self.id.clone(), self.key.clone())
    }
}

/// Creates and retrieves pastes on top of a [`PasteStore`].
#[derive(Clone)]
pub struct PasteService {
    store: Arc<dyn PasteStore>,
}

impl PasteService {
    pub fn new(store: Arc<dyn PasteStore>) -> Self {
        Self { store }
    }

    /// Opens the configured store and wraps it. Called once at startup.
    pub async fn from_config(config: &ServiceConfig) -> PasteResult<Self> {
        let store = open_store(&config.store).await?;
        Ok(Self::new(store))
    }

    /// Stores an envelope under a fresh id and returns the id.
    ///
    /// Candidate ids are drawn until the store accepts one it has not seen.
    /// Exclusivity is only as strong as the store's `set_if_absent`: both
    /// bundled stores make it atomic, the trait default is best-effort.
    pub async fn create(&self, envelope: &Envelope) -> PasteResult<String> {
        let record = StoredPaste::encode(envelope)?;

        loop {
            let id = generate_id(DEFAULT_ID_LENGTH)?;
            if self.store.set_if_absent(&id, record.clone()).await? {
                debug!("stored paste {id} ({} bytes)", record.len());
                return Ok(id);
            }
            debug!("paste id {id} already taken, drawing another");
        }
    }

    /// Returns the serialized record for `id`.
    pub async fn retrieve(&self, id: &str) -> PasteResult<String> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| PasteError::NotFound(id.to_string()))
    }

    /// Returns the envelope for `id` without decrypting it.
    pub async fn retrieve_envelope(&self, id: &str) -> PasteResult<Envelope> {
        let record = self.retrieve(id).await?;
        let paste = StoredPaste::parse(&record)
            .map_err(|e| PasteError::InvalidRecord(format!("{id}: {e}")))?;
        Ok(paste.encrypted)
    }

    /// Returns the stored `encrypted` member of `id` as-is.
    ///
    /// This is what the view path hands to the browser: fields are neither
    /// decoded nor re-encoded, so records from other writers are served
    /// byte-for-byte.
    pub async fn retrieve_encrypted(&self, id: &str) -> PasteResult<Value> {
        let record = self.retrieve(id).await?;
        match StoredPaste::parse_untyped(&record) {
            Ok(Value::Null) => Err(PasteError::InvalidRecord(format!("{id}: null envelope"))),
            Ok(encrypted) => Ok(encrypted),
            Err(e) => Err(PasteError::InvalidRecord(format!("{id}: {e}"))),
        }
    }

    /// Decrypts `id` server-side with a client-supplied key.
    ///
    /// A record that cannot be parsed into an envelope is reported as
    /// [`PasteError::Decryption`], same as a wrong key.
    pub async fn retrieve_raw(&self, id: &str, key: &str) -> PasteResult<Vec<u8>> {
        let record = self.retrieve(id).await?;
        let paste = StoredPaste::parse(&record).map_err(|_| PasteError::Decryption)?;

        let key = key.to_string();
        let plaintext =
            tokio::task::spawn_blocking(move || clip_crypto::decrypt(&paste.encrypted, &key))
                .await??;
        Ok(plaintext)
    }

    /// Encrypts `plaintext` under a fresh key and stores it.
    ///
    /// In-process form of the browser's submit flow; the returned key must
    /// go to the user and nowhere else.
    pub async fn submit(&self, plaintext: &[u8]) -> PasteResult<Submission> {
        let key = generate_key(DEFAULT_KEY_LENGTH)?;

        let plaintext = plaintext.to_vec();
        let encrypt_key = key.clone();
        let envelope =
            tokio::task::spawn_blocking(move || clip_crypto::encrypt(&plaintext, &encrypt_key))
                .await??;

        let id = self.create(&envelope).await?;
        Ok(Submission { id, key })
    }
}
