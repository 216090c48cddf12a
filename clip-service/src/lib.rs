//! Paste service for clip.
//!
//! Ties the crypto and store layers together:
//! - Unique id allocation and record persistence
//! - Envelope retrieval for client-side decryption
//! - Optional server-side decryption for raw downloads
//! - Share link encoding/decoding
//! - A transport-agnostic request/response contract for the web layer

pub mod api;
pub mod config;
pub mod error;
pub mod locator;
pub mod record;
pub mod service;

pub use api::{ApiRequest, ApiResponse, handle};
pub use config::ServiceConfig;
pub use error::{PasteError, PasteResult};
pub use locator::Locator;
pub use record::StoredPaste;
pub use service::{PasteService, Submission};
