//! Redis-backed paste store.
//!
//! Each paste is one string key `paste:<id>` holding the JSON record, so a
//! Redis shared with other clip deployments reads the same keys. Commands go
//! through a multiplexed [`ConnectionManager`] that reconnects on its own.

use crate::config::RedisSettings;
use crate::error::{StoreError, StoreResult};
use crate::{PasteStore, paste_key};
use async_trait::async_trait;
use ::redis::aio::ConnectionManager;
use ::redis::{AsyncCommands, ErrorKind, ExistenceCheck, RedisError, SetOptions};
use tracing::debug;

/// Paste store backed by a Redis (or Valkey) server.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Opens a managed connection to `settings.url`.
    ///
    /// A malformed URL is a configuration error; a server that cannot be
    /// reached is reported as unavailable.
    pub async fn connect(settings: &RedisSettings) -> StoreResult<Self> {
        let client = ::redis::Client::open(settings.url.as_str())
            .map_err(|e| StoreError::Config(format!("invalid Redis URL: {e}")))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Unavailable(format!("Redis connect failed: {e}")))?;
        Ok(Self { conn })
    }
}

fn store_error(key: &str, op: &str, err: RedisError) -> StoreError {
    match err.kind() {
        ErrorKind::TypeError => StoreError::InvalidRecord(format!("{key} is not a UTF-8 string: {err}")),
        _ => StoreError::Unavailable(format!("{op} failed for {key}: {err}")),
    }
}

#[async_trait]
impl PasteStore for RedisStore {
    async fn get(&self, id: &str) -> StoreResult<Option<String>> {
        let key = paste_key(id);
        let mut conn = self.conn.clone();

        let value: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| store_error(&key, "GET", e))?;
        debug!("GET {key}: {}", if value.is_some() { "hit" } else { "miss" });
        Ok(value)
    }

    async fn set(&self, id: &str, value: String) -> StoreResult<()> {
        let key = paste_key(id);
        let size = value.len();
        let mut conn = self.conn.clone();

        let () = conn
            .set(&key, value)
            .await
            .map_err(|e| store_error(&key, "SET", e))?;
        debug!("SET {key} ({size} bytes)");
        Ok(())
    }

    /// `SET key value NX`; atomic on the server.
    async fn set_if_absent(&self, id: &str, value: String) -> StoreResult<bool> {
        let key = paste_key(id);
        let size = value.len();
        let mut conn = self.conn.clone();

        let options = SetOptions::default().conditional_set(ExistenceCheck::NX);
        let reply: Option<String> = conn
            .set_options(&key, value, options)
            .await
            .map_err(|e| store_error(&key, "SET NX", e))?;

        if reply.is_some() {
            debug!("SET NX {key} ({size} bytes)");
            Ok(true)
        } else {
            debug!("{key} already exists");
            Ok(false)
        }
    }
}
