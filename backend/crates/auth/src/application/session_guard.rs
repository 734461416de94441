//! Session Guard
//!
//! Decides, from the two cookies on a request, whether the caller is
//! authenticated. An expired access token is replaced transparently as long
//! as the refresh token still verifies. The identity is always taken from
//! the refresh token; a live access token must name the same subject.
//!
//! | refresh       | access          | outcome                         |
//! |---------------|-----------------|---------------------------------|
//! | missing       | any             | `MissingRefreshToken`           |
//! | present       | missing         | `MissingAccessToken`            |
//! | expired       | any             | `RefreshTokenExpired`           |
//! | invalid       | any             | `InvalidRefreshToken`           |
//! | valid         | valid, same sub | `Authenticated`                 |
//! | valid         | valid, other sub| `InvalidAccessToken`            |
//! | valid         | expired         | `Rotated` with a new access JWT |
//! | valid         | invalid         | `InvalidAccessToken`            |

use crate::application::token::{TokenError, TokenService};
use crate::domain::entity::principal::Principal;
use crate::domain::value_object::token_kind::TokenKind;
use crate::error::{AuthError, AuthResult};

/// Which cookies a request carried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPresence {
    NoTokens,
    RefreshOnly,
    AccessOnly,
    Both,
}

impl TokenPresence {
    pub fn of(access: Option<&str>, refresh: Option<&str>) -> Self {
        match (access, refresh) {
            (None, None) => TokenPresence::NoTokens,
            (None, Some(_)) => TokenPresence::RefreshOnly,
            (Some(_), None) => TokenPresence::AccessOnly,
            (Some(_), Some(_)) => TokenPresence::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Authenticated(Principal),
    /// The access token had expired; `access_token` replaces it
    Rotated {
        principal: Principal,
        access_token: String,
    },
}

impl GuardOutcome {
    pub fn principal(&self) -> &Principal {
        match self {
            GuardOutcome::Authenticated(principal) => principal,
            GuardOutcome::Rotated { principal, .. } => principal,
        }
    }

    pub fn rotated_access_token(&self) -> Option<&str> {
        match self {
            GuardOutcome::Authenticated(_) => None,
            GuardOutcome::Rotated { access_token, .. } => Some(access_token),
        }
    }
}

#[derive(Clone)]
pub struct SessionGuard {
    tokens: TokenService,
}

impl SessionGuard {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }

    pub fn authenticate(
        &self,
        access: Option<&str>,
        refresh: Option<&str>,
    ) -> AuthResult<GuardOutcome> {
        let presence = TokenPresence::of(access, refresh);

        let (access, refresh) = match (access, refresh) {
            (_, None) => {
                tracing::debug!(?presence, "Rejecting request without refresh token");
                return Err(AuthError::MissingRefreshToken);
            }
            (None, Some(_)) => {
                tracing::debug!(?presence, "Rejecting request without access token");
                return Err(AuthError::MissingAccessToken);
            }
            (Some(access), Some(refresh)) => (access, refresh),
        };

        let refresh_claims = self
            .tokens
            .verify(refresh, TokenKind::Refresh)
            .map_err(|e| match e {
                TokenError::Expired => AuthError::RefreshTokenExpired,
                other => AuthError::InvalidRefreshToken(other.to_string()),
            })?;

        match self.tokens.verify(access, TokenKind::Access) {
            Ok(claims) if claims.sub == refresh_claims.sub => {
                Ok(GuardOutcome::Authenticated(refresh_claims.principal()))
            }
            Ok(claims) => {
                tracing::warn!(
                    access_sub = %claims.sub,
                    refresh_sub = %refresh_claims.sub,
                    "Access and refresh tokens belong to different subjects"
                );
                Err(AuthError::InvalidAccessToken(
                    "subject does not match refresh token".to_string(),
                ))
            }
            Err(TokenError::Expired) => {
                let principal = refresh_claims.principal();
                if let Ok(stale) = self.tokens.decode_unverified(access) {
                    if stale.sub != principal.id {
                        tracing::warn!(
                            access_sub = %stale.sub,
                            refresh_sub = %principal.id,
                            "Expired access token belongs to another subject"
                        );
                    }
                }

                let access_token = self.tokens.issue(&principal, TokenKind::Access)?;
                tracing::debug!(user_id = %principal.id, "Rotated expired access token");
                Ok(GuardOutcome::Rotated {
                    principal,
                    access_token,
                })
            }
            Err(other) => Err(AuthError::InvalidAccessToken(other.to_string())),
        }
    }
}
