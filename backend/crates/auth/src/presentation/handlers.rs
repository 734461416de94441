//! HTTP Handlers

use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use axum::{Extension, Json, extract::State};
use std::sync::Arc;

use platform::clock::Clock;
use platform::cookie::{delete_cookie_header, set_cookie_header};

use crate::application::config::AuthConfig;
use crate::application::{
    OtpService, SendOtpUseCase, SessionGuard, SignInInput, SignInUseCase, SignUpInput,
    SignUpUseCase, TokenKeys, TokenPair, TokenService, UserQueryUseCase, VerifyOtpInput,
    VerifyOtpOutput, VerifyOtpUseCase,
};
use crate::domain::entity::{otp_challenge::OtpChallenge, principal::Principal};
use crate::domain::notifier::OtpSender;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::token_kind::TokenKind;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    EmailLoginRequest, MessageResponse, OtpSentResponse, PhoneRequest, RegisterRequest,
    RegisterResponse, UserResponse, UsersResponse, VerifyOtpRequest,
};

const OTP_SENT_MESSAGE: &str = "An OTP has been sent to your registered phone number";

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, S>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    S: OtpSender + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub sender: Arc<S>,
    pub config: Arc<AuthConfig>,
    pub otp: OtpService,
    pub tokens: TokenService,
    pub guard: SessionGuard,
    pub clock: Arc<dyn Clock>,
}

impl<R, S> AuthAppState<R, S>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    S: OtpSender + Clone + Send + Sync + 'static,
{
    pub fn new(
        repo: R,
        sender: S,
        config: AuthConfig,
        keys: TokenKeys,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let otp = OtpService::new(config.otp_secret.clone(), clock.clone());
        let tokens = TokenService::from_config(keys, &config, clock.clone());
        Self {
            repo: Arc::new(repo),
            sender: Arc::new(sender),
            config: Arc::new(config),
            otp,
            guard: SessionGuard::new(tokens.clone()),
            tokens,
            clock,
        }
    }

    /// The code itself, when the deployment echoes it
    fn exposed_code(&self, challenge: &OtpChallenge) -> Option<u32> {
        self.config.expose_otp_in_response.then_some(challenge.code)
    }

    fn token_cookies(&self, pair: &TokenPair) -> AuthResult<HeaderMap> {
        let now = self.clock.now();
        let mut headers = HeaderMap::new();
        for (kind, value) in [
            (TokenKind::Access, &pair.access_token),
            (TokenKind::Refresh, &pair.refresh_token),
        ] {
            headers.append(
                header::SET_COOKIE,
                header_value(set_cookie_header(&self.config.cookie(kind, now), value))?,
            );
        }
        Ok(headers)
    }

    fn cleared_cookies(&self) -> AuthResult<HeaderMap> {
        let now = self.clock.now();
        let mut headers = HeaderMap::new();
        for kind in [TokenKind::Access, TokenKind::Refresh] {
            headers.append(
                header::SET_COOKIE,
                header_value(delete_cookie_header(&self.config.cookie(kind, now)))?,
            );
        }
        Ok(headers)
    }
}

fn header_value(
    value: Result<HeaderValue, axum::http::header::InvalidHeaderValue>,
) -> AuthResult<HeaderValue> {
    value.map_err(|e| AuthError::Internal(format!("invalid Set-Cookie value: {e}")))
}

// ============================================================================
// Register
// ============================================================================

/// POST /auth/register
pub async fn register<R, S>(
    State(state): State<AuthAppState<R, S>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    S: OtpSender + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.sender.clone(),
        state.otp.clone(),
        state.clock.clone(),
    );

    let output = use_case
        .execute(SignUpInput {
            name: req.name,
            email: req.email,
            phone_number: req.phone_number,
            organization: req.organization,
            date_of_birth: req.date_of_birth,
            password: req.password,
            password_confirm: req.password_confirm,
            role: req.role,
            manager_id: req.manager_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: UserResponse::from(&output.user),
            otp: state.exposed_code(&output.challenge),
            hash: output.challenge.opaque_hash,
            message: OTP_SENT_MESSAGE.to_string(),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /auth/login/email
pub async fn login_email<R, S>(
    State(state): State<AuthAppState<R, S>>,
    Json(req): Json<EmailLoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    S: OtpSender + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.tokens.clone());

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::OK,
        state.token_cookies(&output.tokens)?,
        Json(MessageResponse::new("User logged in successfully")),
    ))
}

/// POST /auth/login/phone
pub async fn login_phone<R, S>(
    State(state): State<AuthAppState<R, S>>,
    Json(req): Json<PhoneRequest>,
) -> AuthResult<Json<OtpSentResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    S: OtpSender + Clone + Send + Sync + 'static,
{
    let use_case = SendOtpUseCase::new(state.repo.clone(), state.sender.clone(), state.otp.clone());
    let challenge = use_case.start(&req.phone_number).await?;

    Ok(Json(OtpSentResponse {
        otp: state.exposed_code(&challenge),
        phone_number: req.phone_number,
        hash: challenge.opaque_hash,
        message: OTP_SENT_MESSAGE.to_string(),
    }))
}

/// POST /auth/resendotp
pub async fn resend_otp<R, S>(
    State(state): State<AuthAppState<R, S>>,
    Json(req): Json<PhoneRequest>,
) -> AuthResult<Json<OtpSentResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    S: OtpSender + Clone + Send + Sync + 'static,
{
    let use_case = SendOtpUseCase::new(state.repo.clone(), state.sender.clone(), state.otp.clone());
    let challenge = use_case.resend(&req.phone_number).await?;

    Ok(Json(OtpSentResponse {
        otp: state.exposed_code(&challenge),
        phone_number: req.phone_number,
        hash: challenge.opaque_hash,
        message: OTP_SENT_MESSAGE.to_string(),
    }))
}

/// POST /auth/verifyotp
pub async fn verify_otp<R, S>(
    State(state): State<AuthAppState<R, S>>,
    Json(req): Json<VerifyOtpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    S: OtpSender + Clone + Send + Sync + 'static,
{
    let use_case = VerifyOtpUseCase::new(
        state.repo.clone(),
        state.otp.clone(),
        state.tokens.clone(),
        state.clock.clone(),
    );

    let output = use_case
        .execute(VerifyOtpInput {
            phone_number: req.phone_number,
            code: req.otp.into_text(),
            hash: req.hash,
        })
        .await?;

    match output {
        VerifyOtpOutput::Verified(_) => Ok((
            StatusCode::OK,
            HeaderMap::new(),
            Json(MessageResponse::new("User is verified. You may login now")),
        )),
        VerifyOtpOutput::SignedIn { tokens, .. } => Ok((
            StatusCode::OK,
            state.token_cookies(&tokens)?,
            Json(MessageResponse::new("User logged in successfully")),
        )),
    }
}

// ============================================================================
// Session
// ============================================================================

/// GET /auth/logout
///
/// Tokens stay valid until they expire; only the cookies are dropped.
pub async fn logout<R, S>(
    State(state): State<AuthAppState<R, S>>,
    Extension(principal): Extension<Principal>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    S: OtpSender + Clone + Send + Sync + 'static,
{
    tracing::info!(user_id = %principal.id, "User logged out");

    Ok((
        StatusCode::OK,
        state.cleared_cookies()?,
        Json(MessageResponse::new("User logged out")),
    ))
}

// ============================================================================
// Users
// ============================================================================

/// GET /users/me
pub async fn current_user<R, S>(
    State(state): State<AuthAppState<R, S>>,
    Extension(principal): Extension<Principal>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    S: OtpSender + Clone + Send + Sync + 'static,
{
    let user = UserQueryUseCase::new(state.repo.clone())
        .current_user(&principal)
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

/// GET /users
pub async fn list_users<R, S>(
    State(state): State<AuthAppState<R, S>>,
    Extension(principal): Extension<Principal>,
) -> AuthResult<Json<UsersResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    S: OtpSender + Clone + Send + Sync + 'static,
{
    let users = UserQueryUseCase::new(state.repo.clone())
        .list_visible(&principal)
        .await?;
    Ok(Json(UsersResponse {
        users: users.iter().map(UserResponse::from).collect(),
    }))
}
