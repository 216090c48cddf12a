//! Service configuration.

use crate::error::PasteResult;
use clip_store::StoreConfig;
use serde::{Deserialize, Serialize};

/// Public origin used when composing share links.
pub const ORIGIN_VAR: &str = "CLIP_ORIGIN";

/// Configuration for the paste service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Public origin for share links (e.g., "https://clip.example").
    pub origin: String,

    /// Store backend.
    pub store: StoreConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:3000".to_string(),
            store: StoreConfig::Memory,
        }
    }
}

impl ServiceConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> PasteResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> PasteResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let origin = lookup(ORIGIN_VAR)
            .filter(|o| !o.trim().is_empty())
            .unwrap_or_else(|| Self::default().origin);
        let store = StoreConfig::from_lookup(&lookup)?;
        Ok(Self { origin, store })
    }
}
