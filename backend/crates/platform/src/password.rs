//! Password Hashing and Verification
//!
//! - Argon2id hashing with a per-password random salt (PHC string output)
//! - Zeroization of clear-text passwords on drop
//! - The registration password policy: 8 to 32 characters, no whitespace,
//!   at least one upper-case letter, one digit and one symbol

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 32;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must contain at least {min} characters")]
    TooShort { min: usize },

    #[error("Password cannot exceed {max} characters")]
    TooLong { max: usize },

    #[error("Password cannot contain whitespace")]
    ContainsWhitespace,

    #[error(
        "Password must contain at least one capital letter, a special character and a numeric digit"
    )]
    MissingCharacterClass,
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password, wiped from memory on drop.
///
/// Not `Clone`, and `Debug` is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Accept a new password, enforcing the registration policy
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let candidate = Self(raw);
        let len = candidate.0.chars().count();

        if len < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if len > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
            });
        }
        if candidate.0.chars().any(char::is_whitespace) {
            return Err(PasswordPolicyError::ContainsWhitespace);
        }

        let has_upper = candidate.0.chars().any(|c| c.is_ascii_uppercase());
        let has_digit = candidate.0.chars().any(|c| c.is_ascii_digit());
        let has_symbol = candidate
            .0
            .chars()
            .any(|c| !c.is_alphanumeric() && c != '_');
        if !(has_upper && has_digit && has_symbol) {
            return Err(PasswordPolicyError::MissingCharacterClass);
        }

        Ok(candidate)
    }

    /// Wrap a login attempt without applying the policy.
    ///
    /// Login must not leak which rule a stored password would break.
    pub fn for_login(raw: String) -> Self {
        Self(raw)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password using Argon2id
    pub fn hash(&self) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default()
            .hash_password(self.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Argon2id hash in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash (constant time inside argon2)
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
