//! Phone Number Value Object
//!
//! E.164 shape: `+` followed by 8 to 15 digits. The value is kept exactly
//! as received because it doubles as the OTP identifier, which is matched
//! byte for byte.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const MIN_DIGITS: usize = 8;
const MAX_DIGITS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into();

        let valid = raw
            .strip_prefix('+')
            .is_some_and(|digits| {
                (MIN_DIGITS..=MAX_DIGITS).contains(&digits.len())
                    && digits.bytes().all(|b| b.is_ascii_digit())
                    && !digits.starts_with('0')
            });

        if !valid {
            return Err(AppError::bad_request("Invalid Phone Number"));
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        PhoneNumber::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
