//! OTP delivery through the log
//!
//! Stand-in for an SMS gateway. The code itself is only emitted, at `debug`,
//! when the sender was built with `reveal_codes` (development).

use crate::domain::entity::otp_challenge::OtpChallenge;
use crate::domain::notifier::OtpSender;
use crate::error::AuthResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingOtpSender {
    reveal_codes: bool,
}

impl TracingOtpSender {
    pub fn new(reveal_codes: bool) -> Self {
        Self { reveal_codes }
    }

    fn loggable_code(&self, challenge: &OtpChallenge) -> Option<u32> {
        self.reveal_codes.then_some(challenge.code)
    }
}

impl OtpSender for TracingOtpSender {
    async fn send(&self, identifier: &str, challenge: &OtpChallenge) -> AuthResult<()> {
        tracing::info!(
            recipient = %identifier,
            expires_at_ms = challenge.expires_at_ms,
            "OTP issued"
        );
        if let Some(code) = self.loggable_code(challenge) {
            tracing::debug!(recipient = %identifier, code, "OTP code");
        }
        Ok(())
    }
}
