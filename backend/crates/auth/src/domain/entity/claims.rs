//! JWT Claims

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::principal::Principal;
use crate::domain::value_object::{token_kind::TokenKind, user_id::UserId, user_role::UserRole};

/// Payload of both access and refresh tokens.
///
/// `iat` and `exp` are whole seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: UserId,
    pub role: UserRole,
    pub org: String,
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
    /// Unique per token, so two tokens issued in the same second differ
    pub jti: Uuid,
}

impl Claims {
    pub fn new(principal: &Principal, kind: TokenKind, iat: i64, ttl_secs: i64) -> Self {
        Self {
            sub: principal.id,
            role: principal.role,
            org: principal.organization.clone(),
            kind,
            iat,
            exp: iat.saturating_add(ttl_secs),
            jti: Uuid::new_v4(),
        }
    }

    pub fn principal(&self) -> Principal {
        Principal {
            id: self.sub,
            role: self.role,
            organization: self.org.clone(),
        }
    }

    /// A token is dead from its `exp` second onwards
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        now_secs >= self.exp
    }
}
