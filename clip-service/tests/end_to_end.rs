//! The full submit / view / raw-download flow across all three crates.

mod support;

use clip_crypto::{DEFAULT_KEY_LENGTH, Envelope, decrypt_string, encrypt_string, generate_key};
use clip_service::{ApiRequest, Locator, PasteService, ServiceConfig, handle};
use pretty_assertions::assert_eq;
use serde_json::json;
use support::init_tracing;

#[tokio::test]
async fn hello_world_scenario() {
    init_tracing();
    let config = ServiceConfig::default();
    let service = PasteService::from_config(&config).await.unwrap();

    // Client: generate key, encrypt, submit.
    let key = generate_key(DEFAULT_KEY_LENGTH).unwrap();
    assert_eq!(key.len(), 22);
    let envelope = encrypt_string("hello world", &key).unwrap();
    let response = handle(
        &service,
        ApiRequest::Create {
            body: json!({ "encrypted": envelope }).to_string(),
        },
    )
    .await;
    assert_eq!(response.status, 200);
    let id = response.json_body().unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(id.len(), 8);

    // Share link: key only in the fragment.
    let url = Locator::new(&id, &key).to_url(&config.origin);
    assert_eq!(url, format!("http://localhost:3000/{id}#{key}"));
    let locator = Locator::from_url(&url).unwrap();

    // Viewer: fetch by id only, decrypt locally.
    let response = handle(
        &service,
        ApiRequest::Fetch {
            id: Some(locator.id.clone()),
            key: None,
            raw: false,
        },
    )
    .await;
    assert_eq!(response.status, 200);
    let fetched: Envelope = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(decrypt_string(&fetched, &locator.key).unwrap(), "hello world");

    // Raw download: id and key together.
    let response = handle(
        &service,
        ApiRequest::Fetch {
            id: Some(id.clone()),
            key: Some(key.clone()),
            raw: true,
        },
    )
    .await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body, b"hello world");

    // Raw download with a different random key.
    let other_key = generate_key(DEFAULT_KEY_LENGTH).unwrap();
    let response = handle(
        &service,
        ApiRequest::Fetch {
            id: Some(id.clone()),
            key: Some(other_key),
            raw: true,
        },
    )
    .await;
    assert_eq!(response.status, 400);

    // Unknown id.
    let response = handle(
        &service,
        ApiRequest::Fetch {
            id: Some("zzzzzzzz".to_string()),
            key: None,
            raw: false,
        },
    )
    .await;
    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn legacy_link_still_opens_paste() {
    let service = PasteService::from_config(&ServiceConfig::default()).await.unwrap();
    let submission = service.submit("from an old link".as_bytes()).await.unwrap();

    let fragment = submission.locator().to_legacy_fragment();
    let locator = Locator::decode(&fragment).unwrap();

    let envelope = service.retrieve_envelope(&locator.id).await.unwrap();
    assert_eq!(
        decrypt_string(&envelope, &locator.key).unwrap(),
        "from an old link"
    );
}
