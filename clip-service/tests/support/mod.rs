//! Shared test helpers: instrumented stores and logging setup.

#![allow(dead_code)]

use async_trait::async_trait;
use clip_service::PasteService;
use clip_store::{MemoryStore, PasteStore, StoreError, StoreResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Routes service logs to the test output. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("clip_service=debug,clip_store=debug"))
        .with_test_writer()
        .try_init();
}

/// Service over a fresh in-memory store, plus a handle to that store.
pub fn memory_service() -> (PasteService, MemoryStore) {
    let store = MemoryStore::new();
    (PasteService::new(Arc::new(store.clone())), store)
}

/// Store whose backend is always down.
pub struct UnreachableStore;

#[async_trait]
impl PasteStore for UnreachableStore {
    async fn get(&self, _id: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn set(&self, _id: &str, _value: String) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

/// In-memory store that reports the first `collisions` candidate ids as
/// taken, forcing the service to draw again.
pub struct CollidingStore {
    inner: MemoryStore,
    collisions: usize,
    attempts: AtomicUsize,
}

impl CollidingStore {
    pub fn new(collisions: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            collisions,
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

#[async_trait]
impl PasteStore for CollidingStore {
    async fn get(&self, id: &str) -> StoreResult<Option<String>> {
        self.inner.get(id).await
    }

    async fn set(&self, id: &str, value: String) -> StoreResult<()> {
        self.inner.set(id, value).await
    }

    async fn set_if_absent(&self, id: &str, value: String) -> StoreResult<bool> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.collisions {
            return Ok(false);
        }
        self.inner.set_if_absent(id, value).await
    }
}

/// Store that only implements `get`/`set`, exercising the default
/// probe-then-set uniqueness check.
#[derive(Default)]
pub struct ProbeOnlyStore {
    inner: MemoryStore,
    pub probes: AtomicUsize,
}

#[async_trait]
impl PasteStore for ProbeOnlyStore {
    async fn get(&self, id: &str) -> StoreResult<Option<String>> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.inner.get(id).await
    }

    async fn set(&self, id: &str, value: String) -> StoreResult<()> {
        self.inner.set(id, value).await
    }
}
