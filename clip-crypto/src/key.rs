//! Password-based key derivation (PBKDF2-HMAC-SHA256).

use crate::error::{CryptoError, CryptoResult};
use crate::keygen::fill_random;
use sha2::Sha256;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of a derived AES-256 key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of a freshly generated salt in bytes.
pub const SALT_SIZE: usize = 16;

/// PBKDF2 iteration count shared with the browser client.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// A 256-bit symmetric key derived from a paste key. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_SIZE],
}

impl DerivedKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Per-encryption random salt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Salt([u8; SALT_SIZE]);

impl Salt {
    /// Draws a new salt from the OS random source.
    pub fn random() -> CryptoResult<Self> {
        let mut bytes = [0u8; SALT_SIZE];
        fill_random(&mut bytes)?;
        Ok(Self(bytes))
    }

    pub fn from_bytes(bytes: [u8; SALT_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_SIZE] {
        &self.0
    }
}

/// Key derivation parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KdfParams {
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: PBKDF2_ITERATIONS,
        }
    }
}

/// Derives a 256-bit key from `password` and `salt`.
///
/// Deterministic: the same password, salt and parameters always yield the
/// same key. Stored salts of any length are accepted.
pub fn derive_key(password: &str, salt: &[u8], params: &KdfParams) -> CryptoResult<DerivedKey> {
    if params.iterations == 0 {
        return Err(CryptoError::KeyDerivation(
            "iteration count must be positive".to_string(),
        ));
    }

    let mut key = DerivedKey {
        bytes: [0u8; KEY_SIZE],
    };
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, params.iterations, &mut key.bytes);
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let salt = Salt::from_bytes([7u8; SALT_SIZE]);
        let a = derive_key("paste-key", salt.as_bytes(), &KdfParams::default()).unwrap();
        let b = derive_key("paste-key", salt.as_bytes(), &KdfParams::default()).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn different_salt_different_key() {
        let params = KdfParams { iterations: 1_000 };
        let a = derive_key("paste-key", &[1u8; SALT_SIZE], &params).unwrap();
        let b = derive_key("paste-key", &[2u8; SALT_SIZE], &params).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn matches_rfc7914_pbkdf2_sha256_vector() {
        // RFC 7914 section 11: P="passwd", S="salt", c=1, dkLen=64 (first 32 bytes).
        let key = derive_key("passwd", b"salt", &KdfParams { iterations: 1 }).unwrap();
        let expected: [u8; 32] = [
            0x55, 0xac, 0x04, 0x6e, 0x56, 0xe3, 0x08, 0x9f, 0xec, 0x16, 0x91, 0xc2, 0x25, 0x44,
            0xb6, 0x05, 0xf9, 0x41, 0x85, 0x21, 0x6d, 0xde, 0x04, 0x65, 0xe6, 0x8b, 0x9d, 0x57,
            0xc2, 0x0d, 0xac, 0xbc,
        ];
        assert_eq!(key.as_bytes(), &expected);
    }

    #[test]
    fn zero_iterations_rejected() {
        let err = derive_key("k", b"salt", &KdfParams { iterations: 0 }).unwrap_err();
        assert!(matches!(err, CryptoError::KeyDerivation(_)));
    }

    #[test]
    fn random_salts_differ() {
        assert_ne!(Salt::random().unwrap(), Salt::random().unwrap());
    }

    #[test]
    fn debug_does_not_leak_key() {
        let key = DerivedKey::from_bytes([0xAB; KEY_SIZE]);
        assert_eq!(format!("{key:?}"), "DerivedKey([REDACTED])");
    }
}
