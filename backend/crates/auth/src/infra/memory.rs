//! In-Memory Repository Implementation
//!
//! Process-local user store. Email and phone number are unique across all
//! users, as a database unique index would enforce.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, organization::Organization, phone_number::PhoneNumber, user_id::UserId,
};
use crate::error::{AuthError, AuthResult};

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    async fn collect_sorted<F>(&self, keep: F) -> Vec<User>
    where
        F: Fn(&User) -> bool,
    {
        let users = self.users.read().await;
        let mut found: Vec<User> = users.values().filter(|u| keep(u)).cloned().collect();
        found.sort_by_key(|u| u.created_at);
        found
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        let duplicate = users.values().any(|existing| {
            existing.email == user.email || existing.phone_number == user.phone_number
        });
        if duplicate || users.contains_key(&user.id) {
            return Err(AuthError::UserAlreadyExists);
        }

        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| &u.email == email).cloned())
    }

    async fn find_by_phone_number(&self, phone_number: &PhoneNumber) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| &u.phone_number == phone_number)
            .cloned())
    }

    async fn mark_verified(&self, user_id: &UserId, at: DateTime<Utc>) -> AuthResult<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(user_id).map(|user| {
            user.mark_verified(at);
            user.clone()
        }))
    }

    async fn list_by_organization(&self, organization: &Organization) -> AuthResult<Vec<User>> {
        Ok(self
            .collect_sorted(|u| &u.organization == organization)
            .await)
    }

    async fn list_by_manager(&self, manager_id: &UserId) -> AuthResult<Vec<User>> {
        Ok(self
            .collect_sorted(|u| u.manager_id.as_ref() == Some(manager_id))
            .await)
    }
}
