//! Share links.
//!
//! A share link carries the paste id in the path and the key in the URL
//! fragment, which browsers never send to the server:
//! `https://clip.example/AbC12xyz#Xk92...`
//!
//! Fragments are decoded by trying each known format in order:
//! 1. `#id#key`
//! 2. legacy `#` + base64(`id:key`)

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, PAD};
use base64::engine::{DecodePaddingMode, general_purpose::STANDARD};

/// Legacy links were produced by `btoa`; accept them with or without padding.
const LEGACY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A fragment parser. `None` means "not this format".
type FragmentParser = fn(&str) -> Option<Locator>;

const PARSERS: &[FragmentParser] = &[parse_fragment_pair, parse_legacy_base64];

/// The `(id, key)` pair a share link resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locator {
    pub id: String,
    pub key: String,
}

impl Locator {
    pub fn new(id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            key: key.into(),
        }
    }

    /// `{origin}/{id}#{key}`.
    pub fn to_url(&self, origin: &str) -> String {
        format!("{}/{}#{}", origin.trim_end_matches('/'), self.id, self.key)
    }

    /// `#{id}#{key}`.
    pub fn to_fragment(&self) -> String {
        format!("#{}#{}", self.id, self.key)
    }

    /// Legacy `#` + base64(`id:key`) form, still accepted by [`Locator::decode`].
    pub fn to_legacy_fragment(&self) -> String {
        format!("#{}", STANDARD.encode(format!("{}:{}", self.id, self.key)))
    }

    /// Decodes a URL fragment (including the leading `#`).
    ///
    /// Returns `None` when no format matches; callers treat that as "no key
    /// present".
    pub fn decode(fragment: &str) -> Option<Self> {
        let body = fragment.strip_prefix('#')?;
        PARSERS.iter().find_map(|parse| parse(body))
    }

    /// Resolves a full share link as produced by [`Locator::to_url`].
    pub fn from_url(url: &str) -> Option<Self> {
        let (base, key) = url.split_once('#')?;
        let path = base.split('?').next().unwrap_or(base);
        let id = path.trim_end_matches('/').rsplit('/').next()?;
        if id.is_empty() || key.is_empty() || id.contains(':') {
            return None;
        }
        Some(Self::new(id, key))
    }
}

fn parse_fragment_pair(body: &str) -> Option<Locator> {
    let mut parts = body.split('#');
    let (id, key) = (parts.next()?, parts.next()?);
    if parts.next().is_some() || id.is_empty() || key.is_empty() {
        return None;
    }
    Some(Locator::new(id, key))
}

fn parse_legacy_base64(body: &str) -> Option<Locator> {
    let decoded = LEGACY_ENGINE.decode(body).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    if decoded.contains('\n') {
        return None;
    }
    // Split at the last colon so the id keeps any earlier ones.
    let (id, key) = decoded.rsplit_once(':')?;
    if id.is_empty() || key.is_empty() {
        return None;
    }
    Some(Locator::new(id, key))
}
