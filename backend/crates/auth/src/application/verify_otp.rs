//! Verify OTP Use Case
//!
//! The first successful verification marks the account verified; later ones
//! sign the user in.

use std::sync::Arc;

use platform::clock::Clock;

use crate::application::otp::OtpService;
use crate::application::token::{TokenPair, TokenService};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::phone_number::PhoneNumber;
use crate::error::{AuthError, AuthResult};

pub struct VerifyOtpInput {
    pub phone_number: String,
    pub code: String,
    pub hash: String,
}

pub enum VerifyOtpOutput {
    /// Account was unverified and is now verified; no tokens issued
    Verified(User),
    SignedIn { user: User, tokens: TokenPair },
}

pub struct VerifyOtpUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    otp: OtpService,
    tokens: TokenService,
    clock: Arc<dyn Clock>,
}

impl<R> VerifyOtpUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, otp: OtpService, tokens: TokenService, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            otp,
            tokens,
            clock,
        }
    }

    pub async fn execute(&self, input: VerifyOtpInput) -> AuthResult<VerifyOtpOutput> {
        let phone_number = PhoneNumber::new(input.phone_number)?;

        let user = self
            .repo
            .find_by_phone_number(&phone_number)
            .await?
            .ok_or_else(|| {
                AuthError::UserNotFound(format!("No user found with phone number {phone_number}"))
            })?;

        if !self
            .otp
            .verify(phone_number.as_str(), &input.code, &input.hash)?
        {
            return Err(AuthError::OtpMismatch);
        }

        if !user.verified {
            let user = self
                .repo
                .mark_verified(&user.id, self.clock.now())
                .await?
                .ok_or_else(|| AuthError::Internal("user vanished during verification".into()))?;
            tracing::info!(user_id = %user.id, "User verified phone number");
            return Ok(VerifyOtpOutput::Verified(user));
        }

        let tokens = self.tokens.issue_pair(&user.principal())?;
        tracing::info!(user_id = %user.id, method = "otp", "User signed in");

        Ok(VerifyOtpOutput::SignedIn { user, tokens })
    }
}
