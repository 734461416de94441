//! Server settings read from the environment (after `.env` is loaded)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow};
use auth::{Algorithm, AuthConfig};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub private_key_path: PathBuf,
    pub public_key_path: PathBuf,
    pub algorithm: Algorithm,
    /// OTP HMAC key; generated per process in development when unset
    pub sms_key: Option<String>,
    pub request_timeout: Duration,
    pub frontend_origins: Vec<String>,
    pub development: bool,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).with_context(|| format!("{key} must be set"));

        let development = lookup("APP_ENV").is_some_and(|v| v.eq_ignore_ascii_case("development"));

        let sms_key = lookup("SMS_KEY").filter(|k| !k.is_empty());
        if sms_key.is_none() && !development {
            return Err(anyhow!("SMS_KEY must be set outside development"));
        }

        let algorithm = match lookup("JWT_ALGORITHM") {
            Some(name) => Algorithm::from_str(&name)
                .map_err(|e| anyhow!("JWT_ALGORITHM {name:?} is not supported: {e}"))?,
            None => Algorithm::RS256,
        };

        Ok(Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            access_token_ttl: Duration::from_secs(parse_required(&lookup, "JWT_ACCESS_TOKEN_EXPIRY")?),
            refresh_token_ttl: Duration::from_secs(parse_required(
                &lookup,
                "JWT_REFRESH_TOKEN_EXPIRY",
            )?),
            private_key_path: required("JWT_PRIVATE_KEY_PATH")?.into(),
            public_key_path: required("JWT_PUBLIC_KEY_PATH")?.into(),
            algorithm,
            sms_key,
            request_timeout: Duration::from_millis(parse_or(
                &lookup,
                "TIMEOUT_INTERVAL",
                DEFAULT_TIMEOUT_MS,
            )?),
            frontend_origins: lookup("FRONTEND_ORIGINS")
                .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            development,
        })
    }

    pub fn auth_config(&self) -> AuthConfig {
        let base = if self.development {
            AuthConfig::development()
        } else {
            AuthConfig::with_random_secret()
        };

        AuthConfig {
            access_token_ttl: self.access_token_ttl,
            refresh_token_ttl: self.refresh_token_ttl,
            otp_secret: match &self.sms_key {
                Some(key) => key.as_bytes().to_vec(),
                None => base.otp_secret.clone(),
            },
            ..base
        }
    }
}

fn parse_required<F, T>(lookup: &F, key: &str) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = lookup(key).with_context(|| format!("{key} must be set"))?;
    raw.trim()
        .parse()
        .with_context(|| format!("{key} has an invalid value: {raw:?}"))
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(_) => parse_required(lookup, key),
        None => Ok(default),
    }
}
