//! User Name Value Object
//!
//! A person's display name. Letters and spaces only, 2 to 32 characters
//! after trimming; runs of inner whitespace collapse to one space.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const USER_NAME_MIN_LENGTH: usize = 2;
pub const USER_NAME_MAX_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let canonical = raw.as_ref().split_whitespace().collect::<Vec<_>>().join(" ");
        let len = canonical.chars().count();

        if !(USER_NAME_MIN_LENGTH..=USER_NAME_MAX_LENGTH).contains(&len) {
            return Err(AppError::bad_request(format!(
                "Name must be between {USER_NAME_MIN_LENGTH} and {USER_NAME_MAX_LENGTH} characters"
            )));
        }
        if !canonical.chars().all(|c| c.is_alphabetic() || c == ' ') {
            return Err(AppError::bad_request(
                "Name can only contain letters and spaces",
            ));
        }

        Ok(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        UserName::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert_eq!(UserName::new("Ada Lovelace").unwrap().as_str(), "Ada Lovelace");
        assert_eq!(UserName::new("Jo").unwrap().as_str(), "Jo");
        assert_eq!(UserName::new("Zoë").unwrap().as_str(), "Zoë");
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        assert_eq!(
            UserName::new("  Grace   Hopper ").unwrap().as_str(),
            "Grace Hopper"
        );
    }

    #[test]
    fn test_invalid_names() {
        assert!(UserName::new("J").is_err());
        assert!(UserName::new("   ").is_err());
        assert!(UserName::new("R2 D2").is_err());
        assert!(UserName::new("o'brien").is_err());
        assert!(UserName::new("a".repeat(33)).is_err());
    }
}
