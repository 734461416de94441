//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use chrono::{DateTime, Utc};
use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

use crate::domain::value_object::token_kind::TokenKind;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub access_cookie_name: String,
    pub refresh_cookie_name: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    /// HMAC key for OTP challenges
    pub otp_secret: Vec<u8>,
    /// Echo the OTP code in API responses (development only)
    pub expose_otp_in_response: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_cookie_name: "access_token".to_string(),
            refresh_cookie_name: "refresh_token".to_string(),
            access_token_ttl: Duration::from_secs(15 * 60),
            refresh_token_ttl: Duration::from_secs(7 * 24 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
            otp_secret: Vec::new(),
            expose_otp_in_response: false,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_cookie_name", &self.access_cookie_name)
            .field("refresh_cookie_name", &self.refresh_cookie_name)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("otp_secret", &"[REDACTED]")
            .field("expose_otp_in_response", &self.expose_otp_in_response)
            .finish()
    }
}

impl AuthConfig {
    /// Create config with a random OTP secret
    pub fn with_random_secret() -> Self {
        Self {
            otp_secret: platform::crypto::random_bytes(32),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie, OTP echoed back)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            expose_otp_in_response: true,
            ..Self::with_random_secret()
        }
    }

    pub fn cookie_name(&self, kind: TokenKind) -> &str {
        match kind {
            TokenKind::Access => &self.access_cookie_name,
            TokenKind::Refresh => &self.refresh_cookie_name,
        }
    }

    /// Token lifetime in whole seconds; also the cookie Max-Age
    pub fn ttl_secs(&self, kind: TokenKind) -> i64 {
        let ttl = match kind {
            TokenKind::Access => self.access_token_ttl,
            TokenKind::Refresh => self.refresh_token_ttl,
        };
        i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)
    }

    /// Cookie attributes for a token of `kind` issued at `now`
    pub fn cookie(&self, kind: TokenKind, now: DateTime<Utc>) -> CookieConfig {
        CookieConfig {
            name: self.cookie_name(kind).to_string(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: None,
            expires: None,
        }
        .expiring(now, self.ttl_secs(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.ttl_secs(TokenKind::Access), 900);
        assert_eq!(config.ttl_secs(TokenKind::Refresh), 604_800);
        assert!(config.cookie_secure);
        assert_eq!(config.cookie_same_site, SameSite::Strict);
        assert!(!config.expose_otp_in_response);
    }

    #[test]
    fn test_cookie_uses_token_ttl_in_seconds() {
        let config = AuthConfig::default();
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let cookie = config.cookie(TokenKind::Access, now);
        assert_eq!(cookie.name, "access_token");
        assert_eq!(cookie.max_age_secs, Some(900));
        assert_eq!(cookie.expires, Some(now + chrono::Duration::seconds(900)));
        assert!(cookie.http_only);
    }

    #[test]
    fn test_development_is_insecure() {
        let config = AuthConfig::development();
        assert!(!config.cookie_secure);
        assert!(config.expose_otp_in_response);
        assert_eq!(config.otp_secret.len(), 32);
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = AuthConfig {
            otp_secret: b"super-secret".to_vec(),
            ..Default::default()
        };
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
