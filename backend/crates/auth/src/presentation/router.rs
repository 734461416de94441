//! Auth Router
//!
//! Paths are relative; the application nests this router under `/api/v1`.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::domain::notifier::OtpSender;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{
    AllowedRoles, SessionLayerState, require_role, require_session,
};

const USER_LISTING_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Manager];

pub fn auth_router<R, S>(state: AuthAppState<R, S>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
    S: OtpSender + Clone + Send + Sync + 'static,
{
    let session = SessionLayerState {
        guard: state.guard.clone(),
        config: state.config.clone(),
        clock: state.clock.clone(),
    };

    let role_guarded = Router::new()
        .route("/users", get(handlers::list_users::<R, S>))
        .route_layer(middleware::from_fn_with_state(
            AllowedRoles(USER_LISTING_ROLES),
            require_role,
        ));

    let protected = Router::new()
        .route("/auth/logout", get(handlers::logout::<R, S>))
        .route("/users/me", get(handlers::current_user::<R, S>))
        .merge(role_guarded)
        .route_layer(middleware::from_fn_with_state(session, require_session));

    Router::new()
        .route("/auth/register", post(handlers::register::<R, S>))
        .route("/auth/login/email", post(handlers::login_email::<R, S>))
        .route("/auth/login/phone", post(handlers::login_phone::<R, S>))
        .route("/auth/verifyotp", post(handlers::verify_otp::<R, S>))
        .route("/auth/resendotp", post(handlers::resend_otp::<R, S>))
        .merge(protected)
        .with_state(state)
}
