//! Integration tests for RedisStore against a real Redis.
//!
//! Requires: `docker compose -f docker-compose.test.yml up -d`
//! Run with: `cargo test -p clip-store --test redis_integration -- --ignored`

use clip_store::{PasteStore, RedisSettings, RedisStore, StoreError};
use pretty_assertions::assert_eq;
use serial_test::serial;
use uuid::Uuid;

const REDIS_URL: &str = "redis://localhost:6379";

async fn test_store() -> RedisStore {
    RedisStore::connect(&RedisSettings {
        url: REDIS_URL.into(),
    })
    .await
    .unwrap()
}

/// Per-test unique id so reruns never see stale keys.
fn unique_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[tokio::test]
#[serial]
#[ignore = "requires local Redis"]
async fn set_get_roundtrip() {
    let store = test_store().await;
    let id = unique_id();
    store.set(&id, r#"{"encrypted":{}}"#.into()).await.unwrap();
    assert_eq!(
        store.get(&id).await.unwrap().as_deref(),
        Some(r#"{"encrypted":{}}"#)
    );
}

#[tokio::test]
#[serial]
#[ignore = "requires local Redis"]
async fn missing_key_is_none() {
    let store = test_store().await;
    assert_eq!(store.get(&unique_id()).await.unwrap(), None);
}

#[tokio::test]
#[serial]
#[ignore = "requires local Redis"]
async fn set_nx_refuses_existing_key() {
    let store = test_store().await;
    let id = unique_id();
    assert!(store.set_if_absent(&id, "first".into()).await.unwrap());
    assert!(!store.set_if_absent(&id, "second".into()).await.unwrap());
    assert_eq!(store.get(&id).await.unwrap().as_deref(), Some("first"));
}

#[tokio::test]
#[serial]
#[ignore = "requires local Redis"]
async fn records_live_under_paste_namespace() {
    let store = test_store().await;
    let id = unique_id();
    store.set(&id, "namespaced".into()).await.unwrap();

    let client = redis::Client::open(REDIS_URL).unwrap();
    let mut conn = client.get_multiplexed_async_connection().await.unwrap();
    let raw: Option<String> = redis::cmd("GET")
        .arg(format!("paste:{id}"))
        .query_async(&mut conn)
        .await
        .unwrap();
    assert_eq!(raw.as_deref(), Some("namespaced"));
}

#[tokio::test]
async fn malformed_url_is_config_error() {
    let err = RedisStore::connect(&RedisSettings {
        url: "redis://cache:notaport".into(),
    })
    .await
    .err()
    .unwrap();
    assert!(matches!(err, StoreError::Config(_)), "got {err:?}");
}
