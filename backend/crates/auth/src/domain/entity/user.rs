//! User Entity
//!
//! A registered account. The password hash never leaves the domain layer;
//! responses are built from [`User::principal`] or the presentation DTOs.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::entity::principal::Principal;
use crate::domain::value_object::{
    date_of_birth::DateOfBirth, email::Email, organization::Organization,
    phone_number::PhoneNumber, user_id::UserId, user_name::UserName, user_role::UserRole,
};

/// Validated registration data for a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: UserName,
    pub email: Email,
    pub phone_number: PhoneNumber,
    pub organization: Organization,
    pub date_of_birth: DateOfBirth,
    pub role: UserRole,
    pub manager_id: Option<UserId>,
    pub password_hash: HashedPassword,
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: Email,
    pub phone_number: PhoneNumber,
    pub organization: Organization,
    pub date_of_birth: DateOfBirth,
    pub role: UserRole,
    /// Set for users reporting to a manager
    pub manager_id: Option<UserId>,
    pub password_hash: HashedPassword,
    /// Phone ownership confirmed through an OTP
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// New accounts start unverified
    pub fn new(new_user: NewUser, now: DateTime<Utc>) -> Self {
        Self {
            id: UserId::new(),
            name: new_user.name,
            email: new_user.email,
            phone_number: new_user.phone_number,
            organization: new_user.organization,
            date_of_birth: new_user.date_of_birth,
            role: new_user.role,
            manager_id: new_user.manager_id,
            password_hash: new_user.password_hash,
            verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn mark_verified(&mut self, now: DateTime<Utc>) {
        self.verified = true;
        self.updated_at = now;
    }

    /// Identity carried in this user's tokens
    pub fn principal(&self) -> Principal {
        Principal::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use platform::password::ClearTextPassword;

    pub(crate) fn sample_new_user() -> NewUser {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        NewUser {
            name: UserName::new("Ada Lovelace").unwrap(),
            email: Email::new("ada@example.com").unwrap(),
            phone_number: PhoneNumber::new("+15551234567").unwrap(),
            organization: Organization::new("Acme").unwrap(),
            date_of_birth: DateOfBirth::parse("10/12/1990", today).unwrap(),
            role: UserRole::Manager,
            manager_id: None,
            password_hash: ClearTextPassword::new("Str0ng!Pass".to_string())
                .unwrap()
                .hash()
                .unwrap(),
        }
    }

    #[test]
    fn test_new_user_is_unverified() {
        let now = Utc::now();
        let user = User::new(sample_new_user(), now);
        assert!(!user.verified);
        assert_eq!(user.created_at, now);
    }

    #[test]
    fn test_mark_verified_touches_updated_at() {
        let now = Utc::now();
        let mut user = User::new(sample_new_user(), now);
        let later = now + chrono::Duration::seconds(5);
        user.mark_verified(later);
        assert!(user.verified);
        assert_eq!(user.updated_at, later);
        assert_eq!(user.created_at, now);
    }

    #[test]
    fn test_principal_carries_role_and_organization() {
        let user = User::new(sample_new_user(), Utc::now());
        let principal = user.principal();
        assert_eq!(principal.id, user.id);
        assert_eq!(principal.role, UserRole::Manager);
        assert_eq!(principal.organization, "Acme");
    }
}
