//! The encrypted paste envelope.
//!
//! An envelope bundles everything needed to decrypt a paste except the key:
//! the PBKDF2 salt, the AES-GCM iv, and the ciphertext with its tag appended.
//! On the wire each field is a standard (padded) base64 string, matching what
//! the browser client produces with `btoa`. Like `atob`, decoding also
//! accepts fields with the padding left off.

use serde::{Deserialize, Serialize};

/// Salt, iv and ciphertext (+ tag) of a single encryption.
///
/// Holding an envelope without the paste key reveals nothing about the
/// plaintext beyond its length.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(with = "b64")]
    pub iv: Vec<u8>,
    #[serde(with = "b64")]
    pub ciphertext: Vec<u8>,
    #[serde(with = "b64")]
    pub salt: Vec<u8>,
}

mod b64 {
    use base64::Engine;
    use base64::alphabet;
    use base64::engine::DecodePaddingMode;
    use base64::engine::general_purpose::{GeneralPurpose, PAD, STANDARD};
    use serde::{Deserialize, Deserializer, Serializer};

    const LENIENT: GeneralPurpose = GeneralPurpose::new(
        &alphabet::STANDARD,
        PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
    );

    pub fn serialize<S, T>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: AsRef<[u8]>,
    {
        serializer.serialize_str(&STANDARD.encode(bytes.as_ref()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        LENIENT
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
