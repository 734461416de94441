//! Auth Middleware
//!
//! `require_session` runs the session guard on the token cookies and puts
//! the [`Principal`] into request extensions. `require_role` must sit
//! inside it.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use platform::clock::Clock;
use platform::cookie::{extract_cookie, set_cookie_header};

use crate::application::config::AuthConfig;
use crate::application::SessionGuard;
use crate::domain::entity::principal::Principal;
use crate::domain::value_object::{token_kind::TokenKind, user_role::UserRole};
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct SessionLayerState {
    pub guard: SessionGuard,
    pub config: Arc<AuthConfig>,
    pub clock: Arc<dyn Clock>,
}

/// Reject the request unless the cookies authenticate it.
///
/// When the access token was rotated, the new one is sent back as a cookie
/// unless the handler already set that cookie itself (logout clears it).
pub async fn require_session(
    State(state): State<SessionLayerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let access = extract_cookie(req.headers(), &state.config.access_cookie_name);
    let refresh = extract_cookie(req.headers(), &state.config.refresh_cookie_name);

    let outcome = state
        .guard
        .authenticate(access.as_deref(), refresh.as_deref())?;

    req.extensions_mut().insert(outcome.principal().clone());
    let mut response = next.run(req).await;

    if let Some(token) = outcome.rotated_access_token() {
        let name = &state.config.access_cookie_name;
        let handler_set_it = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .any(|v| v.split_once('=').is_some_and(|(key, _)| key == name));

        if !handler_set_it {
            let cookie = state.config.cookie(TokenKind::Access, state.clock.now());
            let value = set_cookie_header(&cookie, token)
                .map_err(|e| AuthError::Internal(format!("invalid Set-Cookie value: {e}")))?;
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    Ok(response)
}

/// Roles allowed through [`require_role`]
#[derive(Debug, Clone, Copy)]
pub struct AllowedRoles(pub &'static [UserRole]);

pub async fn require_role(
    State(AllowedRoles(roles)): State<AllowedRoles>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let permitted = match req.extensions().get::<Principal>() {
        Some(principal) => principal.has_any_role(roles),
        None => return Err(AuthError::MissingAccessToken),
    };

    if !permitted {
        return Err(AuthError::RoleNotPermitted);
    }

    Ok(next.run(req).await)
}
