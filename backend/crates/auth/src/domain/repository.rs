//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};

use crate::domain::entity::user::User;
use crate::domain::value_object::{
    email::Email, organization::Organization, phone_number::PhoneNumber, user_id::UserId,
};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user; fails with `UserAlreadyExists` on a duplicate
    /// email or phone number
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn find_by_phone_number(&self, phone_number: &PhoneNumber) -> AuthResult<Option<User>>;

    /// Flag the user as verified, returning the updated record
    async fn mark_verified(
        &self,
        user_id: &UserId,
        at: DateTime<Utc>,
    ) -> AuthResult<Option<User>>;

    /// Users of one organization, oldest first
    async fn list_by_organization(&self, organization: &Organization) -> AuthResult<Vec<User>>;

    /// Users reporting to `manager_id`, oldest first
    async fn list_by_manager(&self, manager_id: &UserId) -> AuthResult<Vec<User>>;
}
