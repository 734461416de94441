//! User Query Use Cases
//!
//! Admins see their whole organization; managers see the users reporting to
//! them.

use std::sync::Arc;

use crate::domain::entity::{principal::Principal, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{organization::Organization, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

pub struct UserQueryUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> UserQueryUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn current_user(&self, principal: &Principal) -> AuthResult<User> {
        self.repo
            .find_by_id(&principal.id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound("No such user found".to_string()))
    }

    pub async fn list_visible(&self, principal: &Principal) -> AuthResult<Vec<User>> {
        match principal.role {
            UserRole::Admin => {
                let organization = Organization::new(&principal.organization)?;
                self.repo.list_by_organization(&organization).await
            }
            UserRole::Manager => self.repo.list_by_manager(&principal.id).await,
            UserRole::User => Err(AuthError::RoleNotPermitted),
        }
    }
}
