//! Organization Value Object
//!
//! Admins see every user of their own organization, so the value is stored
//! trimmed and compared exactly.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

const MIN_LENGTH: usize = 2;
const MAX_LENGTH: usize = 32;
const ALLOWED_SYMBOLS: &[char] = &['.', ',', '&', '(', ')', '-', '+', '/', ' '];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Organization(String);

impl Organization {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let value = raw.as_ref().trim();
        let len = value.chars().count();

        if !(MIN_LENGTH..=MAX_LENGTH).contains(&len) {
            return Err(AppError::bad_request(format!(
                "Organization must be between {MIN_LENGTH} and {MAX_LENGTH} characters"
            )));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ALLOWED_SYMBOLS.contains(&c))
        {
            return Err(AppError::bad_request("Invalid Organization Name"));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Organization {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        Organization::new(value)
    }
}

impl From<Organization> for String {
    fn from(org: Organization) -> Self {
        org.0
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
