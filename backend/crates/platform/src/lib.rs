//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the gateway:
//! - Keyed hashing (HMAC-SHA256, hex) and random one-time codes
//! - Password hashing (Argon2id)
//! - Cookie building and parsing
//! - An injectable clock so expiry logic can be tested deterministically

pub mod clock;
pub mod cookie;
pub mod crypto;
pub mod password;
