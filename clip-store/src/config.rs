//! Store selection.
//!
//! The backend is picked once at process start from the environment.
//! `CLIP_STORE_URL` wins when set: `redis://...` (or `rediss://`) means Redis,
//! `s3://bucket[/prefix]` means S3. Otherwise a `REDIS_URL` selects Redis,
//! and with neither set the store is in-memory.

use crate::error::{StoreError, StoreResult};
use crate::{MemoryStore, PasteStore, RedisStore, S3Store};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Selects the external backend by URL scheme.
pub const STORE_URL_VAR: &str = "CLIP_STORE_URL";

/// Redis connection string, used when `CLIP_STORE_URL` is not set.
pub const REDIS_URL_VAR: &str = "REDIS_URL";

/// AWS region for the S3 backend.
pub const S3_REGION_VAR: &str = "CLIP_S3_REGION";

/// Endpoint override for S3-compatible services (e.g. MinIO).
pub const S3_ENDPOINT_VAR: &str = "CLIP_S3_ENDPOINT";

const DEFAULT_REGION: &str = "us-east-1";

/// Connection settings for the S3 backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Settings {
    /// Bucket holding paste objects.
    pub bucket: String,

    /// Key prefix inside the bucket, empty or ending in `/`.
    pub prefix: String,

    /// AWS region.
    pub region: String,

    /// Optional endpoint override (path-style addressing is forced).
    pub endpoint_override: Option<String>,
}

impl S3Settings {
    /// Settings for a local MinIO (docker-compose.test.yml).
    #[cfg(test)]
    pub fn test() -> Self {
        Self {
            bucket: "clip-pastes".to_string(),
            prefix: String::new(),
            region: DEFAULT_REGION.to_string(),
            endpoint_override: Some("http://localhost:9000".to_string()),
        }
    }
}

/// Connection settings for the Redis backend.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedisSettings {
    /// `redis://[user:password@]host[:port][/db]` or `rediss://...`.
    pub url: String,
}

impl RedisSettings {
    /// The URL with any credentials masked, for logs.
    pub fn redacted_url(&self) -> String {
        match (self.url.split_once("://"), self.url.rfind('@')) {
            (Some((scheme, _)), Some(at)) => format!("{scheme}://***{}", &self.url[at..]),
            _ => self.url.clone(),
        }
    }
}

impl fmt::Debug for RedisSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisSettings")
            .field("url", &self.redacted_url())
            .finish()
    }
}

/// Which paste store backend to use.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreConfig {
    #[default]
    Memory,
    Redis(RedisSettings),
    S3(S3Settings),
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl StoreConfig {
    /// Reads the store configuration from process environment variables.
    pub fn from_env() -> StoreResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the store configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> StoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = non_empty(lookup(STORE_URL_VAR)) {
            return Self::parse_url(&url, &lookup);
        }
        if let Some(url) = non_empty(lookup(REDIS_URL_VAR)) {
            return Ok(Self::Redis(RedisSettings { url }));
        }
        Ok(Self::Memory)
    }

    /// Dispatches a store URL on its scheme. S3 options are read through
    /// `lookup`.
    pub fn parse_url<F>(url: &str, lookup: F) -> StoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let scheme = url.split_once("://").map(|(scheme, _)| scheme);
        match scheme {
            Some("redis" | "rediss") => Ok(Self::Redis(RedisSettings {
                url: url.to_string(),
            })),
            Some("s3") => {
                let region = non_empty(lookup(S3_REGION_VAR))
                    .unwrap_or_else(|| DEFAULT_REGION.to_string());
                let endpoint_override = non_empty(lookup(S3_ENDPOINT_VAR));
                Self::parse_s3_url(url, region, endpoint_override)
            }
            _ => Err(StoreError::Config(format!(
                "unsupported store URL {url:?} (expected redis://host or s3://bucket)"
            ))),
        }
    }

    /// Parses an `s3://bucket[/prefix]` store URL.
    pub fn parse_s3_url(
        url: &str,
        region: String,
        endpoint_override: Option<String>,
    ) -> StoreResult<Self> {
        let rest = url.strip_prefix("s3://").ok_or_else(|| {
            StoreError::Config(format!("unsupported store URL {url:?} (expected s3://bucket)"))
        })?;

        let (bucket, prefix) = rest.split_once('/').unwrap_or((rest, ""));
        if bucket.is_empty() {
            return Err(StoreError::Config(format!("missing bucket in {url:?}")));
        }

        let prefix = prefix.trim_matches('/');
        let prefix = if prefix.is_empty() {
            String::new()
        } else {
            format!("{prefix}/")
        };

        Ok(Self::S3(S3Settings {
            bucket: bucket.to_string(),
            prefix,
            region,
            endpoint_override,
        }))
    }
}

/// Opens the configured store. Called once at startup.
pub async fn open_store(config: &StoreConfig) -> StoreResult<Arc<dyn PasteStore>> {
    match config {
        StoreConfig::Memory => {
            info!("using in-memory paste store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreConfig::Redis(settings) => {
            info!("using Redis paste store at {}", settings.redacted_url());
            Ok(Arc::new(RedisStore::connect(settings).await?))
        }
        StoreConfig::S3(settings) => {
            info!(
                "using S3 paste store at s3://{}/{}",
                settings.bucket, settings.prefix
            );
            Ok(Arc::new(S3Store::connect(settings).await?))
        }
    }
}
