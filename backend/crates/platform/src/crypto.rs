//! Cryptographic Utilities

use std::ops::RangeInclusive;

use hmac::{Hmac, Mac};
use rand::{Rng, RngCore, rngs::OsRng};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Error)]
pub enum CryptoError {
    #[error("Invalid HMAC key length")]
    InvalidKeyLength,
}

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Draw a one-time code uniformly from `range` using the OS RNG
pub fn random_numeric_code(range: RangeInclusive<u32>) -> u32 {
    OsRng.gen_range(range)
}

fn keyed_mac(key: &[u8], data: &[u8]) -> Result<HmacSha256, CryptoError> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyLength)?;
    mac.update(data);
    Ok(mac)
}

/// Compute HMAC-SHA256 and return it as lowercase hex
pub fn hmac_sha256_hex(key: &[u8], data: &[u8]) -> Result<String, CryptoError> {
    let mac = keyed_mac(key, data)?;
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Compare two byte strings without short-circuiting on the first mismatch
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Verify a lowercase hex HMAC-SHA256 in constant time.
///
/// The comparison is on the hex text itself, so a change of letter case is
/// a mismatch just like any other altered character.
pub fn verify_hmac_sha256_hex(
    key: &[u8],
    data: &[u8],
    expected_hex: &str,
) -> Result<bool, CryptoError> {
    let actual = hmac_sha256_hex(key, data)?;
    Ok(constant_time_eq(actual.as_bytes(), expected_hex.as_bytes()))
}
