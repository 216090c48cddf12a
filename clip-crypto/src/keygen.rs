//! Random key and paste id generation.
//!
//! Each random byte is mapped onto the alphabet modulo its size. A plain
//! modulo is biased whenever the alphabet size does not divide 256 (the
//! 62-symbol id alphabet would favour its first 8 symbols), so bytes at or
//! above the largest multiple of the alphabet size are rejected and redrawn.
//! The 64-symbol key alphabet divides 256 evenly and never rejects.

use crate::error::{CryptoError, CryptoResult};
use rand::RngCore;
use rand::rngs::OsRng;

/// URL-safe alphabet for paste keys (64 symbols).
pub const KEY_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Alphanumeric alphabet for paste ids (62 symbols). Ids are not secrets.
pub const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Default paste key length (22 symbols, 132 bits).
pub const DEFAULT_KEY_LENGTH: usize = 22;

/// Default paste id length.
pub const DEFAULT_ID_LENGTH: usize = 8;

/// Fills `dest` from the operating system CSPRNG.
pub(crate) fn fill_random(dest: &mut [u8]) -> CryptoResult<()> {
    OsRng
        .try_fill_bytes(dest)
        .map_err(|e| CryptoError::EntropySource(e.to_string()))
}

/// Generates a uniformly random string of `length` symbols from `alphabet`.
pub fn random_string(alphabet: &[u8], length: usize) -> CryptoResult<String> {
    if length == 0 {
        return Err(CryptoError::InvalidLength(length));
    }
    let n = alphabet.len();
    if n == 0 || n > 256 || !alphabet.is_ascii() {
        return Err(CryptoError::InvalidAlphabet(n));
    }

    // Largest multiple of n that fits in a byte's range.
    let limit = 256 - (256 % n);
    let mut out = String::with_capacity(length);
    let mut buf = [0u8; 64];

    while out.len() < length {
        fill_random(&mut buf)?;
        for &byte in buf.iter() {
            let byte = byte as usize;
            if byte >= limit {
                continue;
            }
            out.push(alphabet[byte % n] as char);
            if out.len() == length {
                break;
            }
        }
    }

    Ok(out)
}

/// Generates a paste key: the password fed to key derivation.
pub fn generate_key(length: usize) -> CryptoResult<String> {
    random_string(KEY_ALPHABET, length)
}

/// Generates a paste id candidate. Uniqueness is checked by the caller.
pub fn generate_id(length: usize) -> CryptoResult<String> {
    random_string(ID_ALPHABET, length)
}
