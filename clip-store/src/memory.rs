//! Process-local paste store.

use crate::PasteStore;
use crate::error::StoreResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory paste store. Contents are lost when the process exits.
#[derive(Clone)]
pub struct MemoryStore {
    records: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns true if no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasteStore for MemoryStore {
    async fn get(&self, id: &str) -> StoreResult<Option<String>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn set(&self, id: &str, value: String) -> StoreResult<()> {
        self.records.write().await.insert(id.to_string(), value);
        Ok(())
    }

    /// Atomic: the check and the insert happen under one write lock.
    async fn set_if_absent(&self, id: &str, value: String) -> StoreResult<bool> {
        match self.records.write().await.entry(id.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(true)
            }
        }
    }
}
