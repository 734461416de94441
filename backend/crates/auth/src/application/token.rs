//! Token Service
//!
//! Signs and verifies the access/refresh JWT pair with an asymmetric key
//! pair. HMAC algorithms are refused: the gateway shares its public key
//! with downstream services, never a signing secret.

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use platform::clock::Clock;
use thiserror::Error;

use crate::application::config::AuthConfig;
use crate::domain::entity::{claims::Claims, principal::Principal};
use crate::domain::value_object::token_kind::TokenKind;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token is malformed: {0}")]
    Malformed(String),

    #[error("expected a {expected} token, got a {actual} token")]
    WrongKind { expected: TokenKind, actual: TokenKind },

    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error("invalid key material: {0}")]
    KeyMaterial(String),
}

impl TokenError {
    fn from_jwt(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
            JwtErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}

/// Key pair used for both token kinds
#[derive(Clone)]
pub struct TokenKeys {
    algorithm: Algorithm,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl TokenKeys {
    /// Load a PEM key pair for an RSA, ECDSA or EdDSA algorithm
    pub fn from_pem(
        algorithm: Algorithm,
        private_pem: &[u8],
        public_pem: &[u8],
    ) -> Result<Self, TokenError> {
        let key_err = |e: jsonwebtoken::errors::Error| TokenError::KeyMaterial(e.to_string());

        let (encoding, decoding) = match algorithm {
            Algorithm::RS256
            | Algorithm::RS384
            | Algorithm::RS512
            | Algorithm::PS256
            | Algorithm::PS384
            | Algorithm::PS512 => (
                EncodingKey::from_rsa_pem(private_pem).map_err(key_err)?,
                DecodingKey::from_rsa_pem(public_pem).map_err(key_err)?,
            ),
            Algorithm::ES256 | Algorithm::ES384 => (
                EncodingKey::from_ec_pem(private_pem).map_err(key_err)?,
                DecodingKey::from_ec_pem(public_pem).map_err(key_err)?,
            ),
            Algorithm::EdDSA => (
                EncodingKey::from_ed_pem(private_pem).map_err(key_err)?,
                DecodingKey::from_ed_pem(public_pem).map_err(key_err)?,
            ),
            other => {
                return Err(TokenError::KeyMaterial(format!(
                    "{other:?} is not an asymmetric algorithm"
                )));
            }
        };

        Ok(Self {
            algorithm,
            encoding,
            decoding,
        })
    }

    pub fn from_pem_files(
        algorithm: Algorithm,
        private_path: impl AsRef<std::path::Path>,
        public_path: impl AsRef<std::path::Path>,
    ) -> Result<Self, TokenError> {
        let read = |path: &std::path::Path| {
            std::fs::read(path)
                .map_err(|e| TokenError::KeyMaterial(format!("{}: {e}", path.display())))
        };
        let private_pem = read(private_path.as_ref())?;
        let public_pem = read(public_path.as_ref())?;
        Self::from_pem(algorithm, &private_pem, &public_pem)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

/// Freshly issued access + refresh tokens for one principal
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct TokenService {
    keys: Arc<TokenKeys>,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    pub fn new(
        keys: TokenKeys,
        access_ttl: Duration,
        refresh_ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let secs = |d: Duration| i64::try_from(d.as_secs()).unwrap_or(i64::MAX);
        Self {
            keys: Arc::new(keys),
            access_ttl_secs: secs(access_ttl),
            refresh_ttl_secs: secs(refresh_ttl),
            clock,
        }
    }

    pub fn from_config(keys: TokenKeys, config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(keys, config.access_token_ttl, config.refresh_token_ttl, clock)
    }

    fn ttl_secs(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.access_ttl_secs,
            TokenKind::Refresh => self.refresh_ttl_secs,
        }
    }

    /// Sign a token of `kind` for `principal`, valid from now for the
    /// configured lifetime
    pub fn issue(&self, principal: &Principal, kind: TokenKind) -> Result<String, TokenError> {
        let now_secs = self.clock.now().timestamp();
        let claims = Claims::new(principal, kind, now_secs, self.ttl_secs(kind));

        jsonwebtoken::encode(
            &Header::new(self.keys.algorithm),
            &claims,
            &self.keys.encoding,
        )
        .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn issue_pair(&self, principal: &Principal) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue(principal, TokenKind::Access)?,
            refresh_token: self.issue(principal, TokenKind::Refresh)?,
        })
    }

    /// Check signature, kind and expiry, in that order
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.keys.algorithm);
        // Expiry is judged against the injected clock below
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = jsonwebtoken::decode::<Claims>(token, &self.keys.decoding, &validation)
            .map_err(TokenError::from_jwt)?
            .claims;

        if claims.kind != kind {
            return Err(TokenError::WrongKind {
                expected: kind,
                actual: claims.kind,
            });
        }
        if claims.is_expired_at(self.clock.now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Read the claims without checking signature or expiry.
    ///
    /// For diagnostics only; never trust the result.
    pub fn decode_unverified(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.keys.algorithm);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        jsonwebtoken::decode::<Claims>(token, &self.keys.decoding, &validation)
            .map(|data| data.claims)
            .map_err(TokenError::from_jwt)
    }
}
