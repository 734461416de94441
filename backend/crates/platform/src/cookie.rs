//! Cookie Management Infrastructure
//!
//! Building `Set-Cookie` values and reading the `Cookie` header.

use axum::http::{HeaderMap, HeaderValue, header};
use axum::http::header::InvalidHeaderValue;
use chrono::{DateTime, Utc};

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    #[default]
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie attributes
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age_secs: Option<i64>,
    pub expires: Option<DateTime<Utc>>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Strict,
            path: "/".to_string(),
            max_age_secs: None,
            expires: None,
        }
    }
}

impl CookieConfig {
    /// Attributes for a cookie living `ttl_secs` from `now`
    pub fn expiring(mut self, now: DateTime<Utc>, ttl_secs: i64) -> Self {
        self.max_age_secs = Some(ttl_secs);
        self.expires = Some(now + chrono::Duration::seconds(ttl_secs));
        self
    }

    /// Build Set-Cookie header value
    pub fn build_set_cookie(&self, value: &str) -> String {
        let mut cookie = format!("{}={}", self.name, value);

        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));

        if let Some(max_age) = self.max_age_secs {
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }
        if let Some(expires) = self.expires {
            cookie.push_str(&format!("; Expires={}", http_date(expires)));
        }

        cookie
    }

    /// Build Set-Cookie header for deletion.
    ///
    /// Keeps the same Path/SameSite/Secure attributes so the browser matches
    /// the cookie it is asked to drop.
    pub fn build_delete_cookie(&self) -> String {
        let mut cookie = format!("{}=", self.name);
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));
        cookie.push_str("; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT");
        cookie
    }
}

/// IMF-fixdate, as required by the `Expires` attribute
fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Extract a cookie value from headers.
///
/// Looks at every `Cookie` header, since HTTP/2 clients may split them.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;

            if key == name && !value.is_empty() {
                Some(value.to_string())
            } else {
                None
            }
        })
}

/// Create a Set-Cookie header value
pub fn set_cookie_header(config: &CookieConfig, value: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&config.build_set_cookie(value))
}

/// Create a Set-Cookie header value that clears the cookie
pub fn delete_cookie_header(config: &CookieConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&config.build_delete_cookie())
}
