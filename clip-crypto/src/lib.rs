//! Encryption layer for clip.
//!
//! Pastes are encrypted on the client before they reach the server:
//! - PBKDF2-HMAC-SHA256 (100 000 iterations) stretches the paste key
//! - AES-256-GCM provides authenticated encryption
//! - A fresh random salt and iv are drawn for every encryption
//!
//! # Architecture
//!
//! The paste key is a random 22-symbol string that lives only in the URL
//! fragment of a share link. It is never stored. The server keeps only the
//! [`Envelope`] (salt, iv, ciphertext), which is useless without the key.
//!
//! The primitives here match the browser's WebCrypto client byte for byte,
//! so envelopes produced on either side decrypt on the other.

mod cipher;
pub mod envelope;
mod error;
mod key;
pub mod keygen;

pub use cipher::{NONCE_SIZE, TAG_SIZE, decrypt, decrypt_string, encrypt, encrypt_string};
pub use envelope::Envelope;
pub use error::{CryptoError, CryptoResult};
pub use key::{
    DerivedKey, KEY_SIZE, KdfParams, PBKDF2_ITERATIONS, SALT_SIZE, Salt, derive_key,
};
pub use keygen::{
    DEFAULT_ID_LENGTH, DEFAULT_KEY_LENGTH, ID_ALPHABET, KEY_ALPHABET, generate_id, generate_key,
};
