//! Phone OTP Use Case
//!
//! Starting a phone login requires a known number. Resending does not look
//! the number up, so it also serves accounts that are still unverified.

use std::sync::Arc;

use crate::application::otp::OtpService;
use crate::domain::entity::otp_challenge::OtpChallenge;
use crate::domain::notifier::OtpSender;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::phone_number::PhoneNumber;
use crate::error::{AuthError, AuthResult};

pub struct SendOtpUseCase<R, S>
where
    R: UserRepository,
    S: OtpSender,
{
    repo: Arc<R>,
    sender: Arc<S>,
    otp: OtpService,
}

impl<R, S> SendOtpUseCase<R, S>
where
    R: UserRepository,
    S: OtpSender,
{
    pub fn new(repo: Arc<R>, sender: Arc<S>, otp: OtpService) -> Self {
        Self { repo, sender, otp }
    }

    /// Begin a phone login for an existing account
    pub async fn start(&self, phone_number: &str) -> AuthResult<OtpChallenge> {
        let phone_number = PhoneNumber::new(phone_number)?;

        if self.repo.find_by_phone_number(&phone_number).await?.is_none() {
            return Err(AuthError::UserNotFound(format!(
                "No user found with phone number {phone_number}"
            )));
        }

        self.send(&phone_number).await
    }

    /// Issue a fresh challenge; earlier ones stay valid until they expire
    pub async fn resend(&self, phone_number: &str) -> AuthResult<OtpChallenge> {
        let phone_number = PhoneNumber::new(phone_number)?;
        self.send(&phone_number).await
    }

    async fn send(&self, phone_number: &PhoneNumber) -> AuthResult<OtpChallenge> {
        let challenge = self.otp.issue(phone_number.as_str())?;
        self.sender.send(phone_number.as_str(), &challenge).await?;
        Ok(challenge)
    }
}
