//! Email Sign In Use Case
//!
//! Authenticates with email + password and issues the token pair.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::token::{TokenPair, TokenService};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub user: User,
    pub tokens: TokenPair,
}

pub struct SignInUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: TokenService,
}

impl<R> SignInUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: TokenService) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let email = Email::new(input.email)?;

        let user = self.repo.find_by_email(&email).await?.ok_or_else(|| {
            AuthError::UserNotFound(format!("No user found with email address {email}"))
        })?;

        let password = ClearTextPassword::for_login(input.password);
        if !user.password_hash.verify(&password) {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.verified {
            return Err(AuthError::NotVerified);
        }

        let tokens = self.tokens.issue_pair(&user.principal())?;

        tracing::info!(user_id = %user.id, method = "email", "User signed in");

        Ok(SignInOutput { user, tokens })
    }
}
