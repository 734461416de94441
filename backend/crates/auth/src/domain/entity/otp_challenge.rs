//! OTP Challenge
//!
//! The opaque hash handed to the client has the shape `"{mac}.{expires}"`
//! where `mac` is lowercase hex HMAC-SHA256 over
//! `"{identifier}.{code}.{expires}"` and `expires` is Unix milliseconds.
//! Nothing is stored server side; the hash is the whole challenge state.

/// A freshly issued challenge.
///
/// `code` goes to the user out of band, `opaque_hash` goes back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpChallenge {
    pub code: u32,
    pub opaque_hash: String,
    pub expires_at_ms: i64,
}

/// Borrowed view of an opaque hash split at its first `.`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpaqueHash<'a> {
    pub mac: &'a str,
    /// Expiry exactly as the client sent it; it is part of the MAC input
    pub expires_text: &'a str,
    pub expires_at_ms: i64,
}

impl<'a> OpaqueHash<'a> {
    /// `None` when there is no separator or the expiry is not a plain
    /// decimal number
    pub fn parse(raw: &'a str) -> Option<Self> {
        let (mac, expires_text) = raw.split_once('.')?;
        if mac.is_empty()
            || expires_text.is_empty()
            || !expires_text.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let expires_at_ms = expires_text.parse().ok()?;
        Some(Self {
            mac,
            expires_text,
            expires_at_ms,
        })
    }
}

/// MAC input binding identifier, code and expiry
pub fn challenge_payload(identifier: &str, code: &str, expires_text: &str) -> String {
    format!("{identifier}.{code}.{expires_text}")
}
