//! Request/response contract for the HTTP layer.
//!
//! The web front end owns routing and rendering; it turns each request into
//! an [`ApiRequest`], calls [`handle`], and writes the [`ApiResponse`] back
//! verbatim. Status codes and bodies match the public paste API:
//!
//! | Request                      | Outcome                    | Status |
//! |------------------------------|----------------------------|--------|
//! | `Create` with envelope       | `{"success":true,"id":..}` | 200    |
//! | `Create` without `encrypted` | error                      | 400    |
//! | `Create` body not JSON       | error                      | 500    |
//! | `Fetch` without id           | error                      | 400    |
//! | `Fetch` unknown id           | error                      | 404    |
//! | `Fetch` id                   | stored envelope, verbatim  | 200    |
//! | `Fetch` id + key + raw       | plaintext                  | 200    |
//! | `Fetch` id + wrong key + raw | error                      | 400    |
//! | store failure                | error                      | 500    |

use crate::error::PasteError;
use crate::service::PasteService;
use clip_crypto::Envelope;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::warn;

const CONTENT_TYPE_JSON: &str = "application/json";
const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// An API call, already extracted from the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiRequest {
    /// Store a paste. `body` is the raw JSON request body.
    Create { body: String },
    /// Fetch a paste; with `raw` and `key` set, fetch decrypted plaintext.
    Fetch {
        id: Option<String>,
        key: Option<String>,
        raw: bool,
    },
}

/// A transport-independent response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        // Serializing a `Value` or a derive-only type cannot fail.
        let body = serde_json::to_vec(value).unwrap_or_default();
        Self {
            status,
            content_type: CONTENT_TYPE_JSON,
            headers: Vec::new(),
            body,
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self::json(status, &json!({ "error": message }))
    }

    /// Parses the body as JSON; `None` for non-JSON responses.
    pub fn json_body(&self) -> Option<Value> {
        if self.content_type != CONTENT_TYPE_JSON {
            return None;
        }
        serde_json::from_slice(&self.body).ok()
    }
}

/// Dispatches one request against the service.
pub async fn handle(service: &PasteService, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::Create { body } => create(service, &body).await,
        ApiRequest::Fetch { id, key, raw } => {
            let id = id.filter(|id| !id.is_empty());
            let key = key.filter(|key| !key.is_empty());
            match (id, key) {
                (None, _) => ApiResponse::error(400, "Missing paste ID"),
                (Some(id), Some(key)) if raw => fetch_raw(service, &id, &key).await,
                (Some(id), _) => fetch(service, &id).await,
            }
        }
    }
}

async fn create(service: &PasteService, body: &str) -> ApiResponse {
    let mut payload: Value = match serde_json::from_str(body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("failed to store paste: unreadable request body: {e}");
            return ApiResponse::error(500, "Failed to store paste");
        }
    };

    // Absent, null, or not an envelope: all reported as missing.
    let envelope = payload
        .get_mut("encrypted")
        .map(Value::take)
        .and_then(|encrypted| serde_json::from_value::<Envelope>(encrypted).ok());
    let Some(envelope) = envelope else {
        return ApiResponse::error(400, "Missing encrypted content");
    };

    match service.create(&envelope).await {
        Ok(id) => ApiResponse::json(200, &json!({ "success": true, "id": id })),
        Err(e) => {
            warn!("failed to store paste: {e}");
            ApiResponse::error(500, "Failed to store paste")
        }
    }
}

async fn fetch(service: &PasteService, id: &str) -> ApiResponse {
    match service.retrieve_encrypted(id).await {
        Ok(encrypted) => ApiResponse::json(200, &encrypted),
        Err(PasteError::NotFound(_)) => ApiResponse::error(404, "Paste not found"),
        Err(e) => {
            warn!("failed to retrieve paste {id}: {e}");
            ApiResponse::error(500, "Failed to retrieve paste")
        }
    }
}

async fn fetch_raw(service: &PasteService, id: &str, key: &str) -> ApiResponse {
    match service.retrieve_raw(id, key).await {
        Ok(plaintext) => ApiResponse {
            status: 200,
            content_type: CONTENT_TYPE_TEXT,
            headers: vec![(
                "Content-Disposition".to_string(),
                format!("inline; filename=\"{}.txt\"", attachment_name(id)),
            )],
            body: plaintext,
        },
        Err(PasteError::NotFound(_)) => ApiResponse::error(404, "Paste not found"),
        Err(PasteError::Decryption) => ApiResponse::error(400, "Decryption failed - invalid key"),
        Err(e) => {
            warn!("failed to retrieve paste {id}: {e}");
            ApiResponse::error(500, "Failed to retrieve paste")
        }
    }
}

/// Keeps only characters safe inside a quoted header parameter.
fn attachment_name(id: &str) -> String {
    id.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        .collect()
}
