//! Persisted record format.
//!
//! Every backend stores the same UTF-8 JSON document:
//! `{"encrypted": {"iv": "<b64>", "ciphertext": "<b64>", "salt": "<b64>"}}`

use clip_crypto::Envelope;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored paste: the encrypted envelope and nothing else.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPaste {
    pub encrypted: Envelope,
}

#[derive(Serialize)]
struct StoredPasteRef<'a> {
    encrypted: &'a Envelope,
}

#[derive(Deserialize)]
struct UntypedPaste {
    encrypted: Value,
}

impl StoredPaste {
    /// Serializes an envelope as a record without cloning it.
    pub fn encode(envelope: &Envelope) -> serde_json::Result<String> {
        serde_json::to_string(&StoredPasteRef {
            encrypted: envelope,
        })
    }

    pub fn parse(record: &str) -> serde_json::Result<Self> {
        serde_json::from_str(record)
    }

    /// Extracts the `encrypted` member exactly as stored, without decoding
    /// the envelope fields.
    pub fn parse_untyped(record: &str) -> serde_json::Result<Value> {
        serde_json::from_str::<UntypedPaste>(record).map(|paste| paste.encrypted)
    }
}
