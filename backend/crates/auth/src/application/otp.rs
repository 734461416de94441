//! OTP Challenge Service
//!
//! Stateless one-time codes. `issue` binds identifier, code and expiry into
//! an HMAC; `verify` recomputes it from what the client sends back. The
//! expiry check runs before the MAC check, so an expired challenge reports
//! `Expired` even when the code is also wrong.

use std::sync::Arc;
use std::time::Duration;

use platform::clock::Clock;
use platform::crypto::{self, CryptoError};
use thiserror::Error;

use crate::domain::entity::otp_challenge::{OpaqueHash, OtpChallenge, challenge_payload};

/// How long an issued code stays valid
pub const OTP_TTL: Duration = Duration::from_secs(5 * 60);

/// Five-digit codes
pub const OTP_CODE_RANGE: std::ops::RangeInclusive<u32> = 10_000..=99_999;

#[derive(Debug, Error)]
pub enum OtpError {
    #[error("OTP expired at {expired_at_ms}")]
    Expired { expired_at_ms: i64 },

    /// The opaque hash does not have the `{mac}.{expires}` shape
    #[error("Malformed OTP hash")]
    Malformed,

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

#[derive(Clone)]
pub struct OtpService {
    secret: Arc<[u8]>,
    clock: Arc<dyn Clock>,
}

impl OtpService {
    pub fn new(secret: impl Into<Arc<[u8]>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret: secret.into(),
            clock,
        }
    }

    fn ttl_ms() -> i64 {
        i64::try_from(OTP_TTL.as_millis()).unwrap_or(i64::MAX)
    }

    /// Draw a fresh code for `identifier` and seal it into an opaque hash
    pub fn issue(&self, identifier: &str) -> Result<OtpChallenge, OtpError> {
        let code = crypto::random_numeric_code(OTP_CODE_RANGE);
        self.issue_with_code(identifier, code)
    }

    pub(crate) fn issue_with_code(
        &self,
        identifier: &str,
        code: u32,
    ) -> Result<OtpChallenge, OtpError> {
        let expires_at_ms = self.clock.now_ms().saturating_add(Self::ttl_ms());
        let expires_text = expires_at_ms.to_string();
        let payload = challenge_payload(identifier, &code.to_string(), &expires_text);
        let mac = crypto::hmac_sha256_hex(&self.secret, payload.as_bytes())?;

        Ok(OtpChallenge {
            code,
            opaque_hash: format!("{mac}.{expires_text}"),
            expires_at_ms,
        })
    }

    /// `Ok(true)` only when the challenge is live and every part matches
    pub fn verify(&self, identifier: &str, code: &str, opaque_hash: &str) -> Result<bool, OtpError> {
        let parsed = OpaqueHash::parse(opaque_hash).ok_or(OtpError::Malformed)?;

        if self.clock.now_ms() > parsed.expires_at_ms {
            return Err(OtpError::Expired {
                expired_at_ms: parsed.expires_at_ms,
            });
        }

        let payload = challenge_payload(identifier, code, parsed.expires_text);
        Ok(crypto::verify_hmac_sha256_hex(
            &self.secret,
            payload.as_bytes(),
            parsed.mac,
        )?)
    }
}
