//! OTP delivery port
//!
//! SMS or email delivery lives behind this trait; the gateway only decides
//! when a code must be sent.

use crate::domain::entity::otp_challenge::OtpChallenge;
use crate::error::AuthResult;

#[trait_variant::make(OtpSender: Send)]
pub trait LocalOtpSender {
    /// Deliver `challenge.code` to the owner of `identifier`
    async fn send(&self, identifier: &str, challenge: &OtpChallenge) -> AuthResult<()>;
}
