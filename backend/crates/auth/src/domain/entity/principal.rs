//! Authenticated Principal
//!
//! The identity a verified token carries. Downstream handlers read it from
//! the request extensions.

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: UserId,
    pub role: UserRole,
    pub organization: String,
}

impl Principal {
    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        roles.contains(&self.role)
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            organization: user.organization.as_str().to_string(),
        }
    }
}
