//! Sign Up Use Case
//!
//! Creates an unverified account and sends an OTP to its phone number.

use std::sync::Arc;

use platform::clock::Clock;
use platform::password::ClearTextPassword;

use crate::application::otp::OtpService;
use crate::domain::entity::otp_challenge::OtpChallenge;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::notifier::OtpSender;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    date_of_birth::DateOfBirth, email::Email, organization::Organization,
    phone_number::PhoneNumber, user_id::UserId, user_name::UserName, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub organization: String,
    /// `DD/MM/YYYY`
    pub date_of_birth: String,
    pub password: String,
    pub password_confirm: String,
    pub role: Option<UserRole>,
    pub manager_id: Option<UserId>,
}

/// Sign up output
pub struct SignUpOutput {
    pub user: User,
    pub challenge: OtpChallenge,
}

pub struct SignUpUseCase<R, S>
where
    R: UserRepository,
    S: OtpSender,
{
    repo: Arc<R>,
    sender: Arc<S>,
    otp: OtpService,
    clock: Arc<dyn Clock>,
}

impl<R, S> SignUpUseCase<R, S>
where
    R: UserRepository,
    S: OtpSender,
{
    pub fn new(repo: Arc<R>, sender: Arc<S>, otp: OtpService, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            sender,
            otp,
            clock,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let now = self.clock.now();

        let name = UserName::new(&input.name)?;
        let email = Email::new(input.email)?;
        let phone_number = PhoneNumber::new(input.phone_number)?;
        let organization = Organization::new(&input.organization)?;
        let date_of_birth = DateOfBirth::parse(&input.date_of_birth, now.date_naive())?;

        if input.password != input.password_confirm {
            return Err(AuthError::Validation("Passwords do not match".to_string()));
        }
        let password_hash = ClearTextPassword::new(input.password)?.hash()?;

        let user = User::new(
            NewUser {
                name,
                email,
                phone_number,
                organization,
                date_of_birth,
                role: input.role.unwrap_or_default(),
                manager_id: input.manager_id,
                password_hash,
            },
            now,
        );

        self.repo.create(&user).await?;

        let challenge = self.otp.issue(user.phone_number.as_str())?;
        self.sender
            .send(user.phone_number.as_str(), &challenge)
            .await?;

        tracing::info!(
            user_id = %user.id,
            role = %user.role,
            organization = %user.organization,
            "User signed up"
        );

        Ok(SignUpOutput { user, challenge })
    }
}
