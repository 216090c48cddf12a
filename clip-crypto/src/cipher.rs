//! AES-256-GCM content encryption under a PBKDF2-derived key.
//!
//! Every call draws a fresh salt and iv, even for the same key, so
//! encrypting the same plaintext twice never produces the same envelope.

use crate::envelope::Envelope;
use crate::error::{CryptoError, CryptoResult};
use crate::key::{KdfParams, Salt, derive_key};
use crate::keygen::fill_random;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};

/// AES-GCM iv size in bytes.
pub const NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// Encrypts `plaintext` under a key derived from the paste key `key`.
pub fn encrypt(plaintext: &[u8], key: &str) -> CryptoResult<Envelope> {
    let salt = Salt::random()?;
    let mut iv = [0u8; NONCE_SIZE];
    fill_random(&mut iv)?;

    let derived = derive_key(key, salt.as_bytes(), &KdfParams::default())?;
    let cipher = Aes256Gcm::new_from_slice(derived.as_bytes())
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext)
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;

    Ok(Envelope {
        iv: iv.to_vec(),
        ciphertext,
        salt: salt.as_bytes().to_vec(),
    })
}

/// Decrypts an envelope with the paste key it was encrypted under.
///
/// Returns [`CryptoError::Decryption`] for a wrong key, a tampered or
/// truncated ciphertext, or a malformed iv. No partial plaintext is ever
/// returned.
pub fn decrypt(envelope: &Envelope, key: &str) -> CryptoResult<Vec<u8>> {
    if envelope.iv.len() != NONCE_SIZE || envelope.ciphertext.len() < TAG_SIZE {
        return Err(CryptoError::Decryption);
    }

    let derived =
        derive_key(key, &envelope.salt, &KdfParams::default()).map_err(|_| CryptoError::Decryption)?;
    let cipher =
        Aes256Gcm::new_from_slice(derived.as_bytes()).map_err(|_| CryptoError::Decryption)?;

    cipher
        .decrypt(Nonce::from_slice(&envelope.iv), envelope.ciphertext.as_ref())
        .map_err(|_| CryptoError::Decryption)
}

/// Encrypts UTF-8 text.
pub fn encrypt_string(plaintext: &str, key: &str) -> CryptoResult<Envelope> {
    encrypt(plaintext.as_bytes(), key)
}

/// Decrypts an envelope whose plaintext is UTF-8 text.
pub fn decrypt_string(envelope: &Envelope, key: &str) -> CryptoResult<String> {
    let bytes = decrypt(envelope, key)?;
    String::from_utf8(bytes).map_err(|_| CryptoError::Decryption)
}
