//! Auth Error Types
//!
//! Auth-specific variants on top of the unified `kernel::error::AppError`.
//! Every variant carries a stable reason code for clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

use crate::application::otp::OtpError;
use crate::application::token::TokenError;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Access token is missing")]
    MissingAccessToken,

    #[error("Refresh token is missing")]
    MissingRefreshToken,

    #[error("Refresh token has expired")]
    RefreshTokenExpired,

    #[error("Invalid Refresh Token")]
    InvalidRefreshToken(String),

    #[error("Invalid Access Token")]
    InvalidAccessToken(String),

    #[error("OTP has expired")]
    OtpExpired,

    #[error("Incorrect OTP")]
    OtpMismatch,

    #[error("{0}")]
    UserNotFound(String),

    #[error("An account with this email or phone number already exists")]
    UserAlreadyExists,

    #[error("Password is incorrect.")]
    InvalidCredentials,

    #[error("Please verify your phone number before logging in")]
    NotVerified,

    #[error("Your role is not permitted to access this resource")]
    RoleNotPermitted,

    #[error("{0}")]
    Validation(String),

    /// Signing or key problems; never a client fault
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAccessToken
            | AuthError::MissingRefreshToken
            | AuthError::RefreshTokenExpired
            | AuthError::InvalidRefreshToken(_)
            | AuthError::InvalidAccessToken(_)
            | AuthError::OtpMismatch => StatusCode::UNAUTHORIZED,
            AuthError::OtpExpired => StatusCode::REQUEST_TIMEOUT,
            AuthError::UserNotFound(_) => StatusCode::NOT_FOUND,
            AuthError::UserAlreadyExists => StatusCode::CONFLICT,
            AuthError::InvalidCredentials
            | AuthError::NotVerified
            | AuthError::RoleNotPermitted => StatusCode::FORBIDDEN,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Token(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingAccessToken
            | AuthError::MissingRefreshToken
            | AuthError::RefreshTokenExpired
            | AuthError::InvalidRefreshToken(_)
            | AuthError::InvalidAccessToken(_)
            | AuthError::OtpMismatch => ErrorKind::Unauthorized,
            AuthError::OtpExpired => ErrorKind::RequestTimeout,
            AuthError::UserNotFound(_) => ErrorKind::NotFound,
            AuthError::UserAlreadyExists => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::NotVerified
            | AuthError::RoleNotPermitted => ErrorKind::Forbidden,
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::Token(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Stable machine-readable code
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingAccessToken => "ACCESS_TOKEN_MISSING",
            AuthError::MissingRefreshToken => "REFRESH_TOKEN_MISSING",
            AuthError::RefreshTokenExpired => "REFRESH_TOKEN_EXPIRED",
            AuthError::InvalidRefreshToken(_) => "REFRESH_TOKEN_INVALID",
            AuthError::InvalidAccessToken(_) => "ACCESS_TOKEN_INVALID",
            AuthError::OtpExpired => "OTP_EXPIRED",
            AuthError::OtpMismatch => "OTP_MISMATCH",
            AuthError::UserNotFound(_) => "USER_NOT_FOUND",
            AuthError::UserAlreadyExists => "USER_EXISTS",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::NotVerified => "USER_NOT_VERIFIED",
            AuthError::RoleNotPermitted => "ROLE_NOT_PERMITTED",
            AuthError::Validation(_) => "VALIDATION_FAILED",
            AuthError::Token(_) | AuthError::Internal(_) => "INTERNAL",
        }
    }

    fn action(&self) -> Option<&'static str> {
        match self {
            AuthError::MissingAccessToken
            | AuthError::MissingRefreshToken
            | AuthError::RefreshTokenExpired
            | AuthError::InvalidRefreshToken(_) => Some("Please log in again."),
            AuthError::OtpExpired => Some("Request a new OTP."),
            AuthError::NotVerified => Some("Verify your phone number with the OTP sent to it."),
            _ => None,
        }
    }

    /// Server-side detail stays in the logs
    pub fn to_app_error(&self) -> AppError {
        let message = match self {
            AuthError::Token(_) | AuthError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        let err = AppError::new(self.kind(), message).with_reason(self.reason());
        match self.action() {
            Some(action) => err.with_action(action),
            None => err,
        }
    }

    fn log(&self) {
        match self {
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Token signing or key failure");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidRefreshToken(detail) | AuthError::InvalidAccessToken(detail) => {
                tracing::warn!(reason = self.reason(), detail = %detail, "Rejected token");
            }
            AuthError::InvalidCredentials | AuthError::OtpMismatch => {
                tracing::warn!(reason = self.reason(), "Failed authentication attempt");
            }
            _ => {
                tracing::debug!(error = %self, reason = self.reason(), "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            AuthError::Internal(err.to_string())
        } else {
            AuthError::Validation(err.message().to_string())
        }
    }
}

impl From<OtpError> for AuthError {
    fn from(err: OtpError) -> Self {
        match err {
            OtpError::Expired { .. } => AuthError::OtpExpired,
            OtpError::Malformed => AuthError::OtpMismatch,
            OtpError::Crypto(e) => AuthError::Internal(e.to_string()),
        }
    }
}

impl From<PasswordPolicyError> for AuthError {
    fn from(err: PasswordPolicyError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_kind_agree() {
        let errors = [
            AuthError::MissingAccessToken,
            AuthError::MissingRefreshToken,
            AuthError::RefreshTokenExpired,
            AuthError::InvalidRefreshToken("bad".into()),
            AuthError::InvalidAccessToken("bad".into()),
            AuthError::OtpExpired,
            AuthError::OtpMismatch,
            AuthError::UserNotFound("User Not Found".into()),
            AuthError::UserAlreadyExists,
            AuthError::InvalidCredentials,
            AuthError::NotVerified,
            AuthError::RoleNotPermitted,
            AuthError::Validation("bad".into()),
            AuthError::Internal("boom".into()),
        ];
        for err in errors {
            assert_eq!(err.status_code().as_u16(), err.kind().status_code(), "{err:?}");
        }
    }

    #[test]
    fn test_otp_error_mapping() {
        assert_eq!(
            AuthError::from(OtpError::Expired { expired_at_ms: 1 }).status_code(),
            StatusCode::REQUEST_TIMEOUT
        );
        assert!(matches!(
            AuthError::from(OtpError::Malformed),
            AuthError::OtpMismatch
        ));
    }

    #[test]
    fn test_internal_detail_not_exposed() {
        let app = AuthError::Internal("db password leaked".into()).to_app_error();
        assert_eq!(app.message(), "Internal server error");
        assert_eq!(app.reason(), Some("INTERNAL"));
    }

    #[test]
    fn test_refresh_expired_carries_action() {
        let app = AuthError::RefreshTokenExpired.to_app_error();
        assert_eq!(app.status_code(), 401);
        assert_eq!(app.reason(), Some("REFRESH_TOKEN_EXPIRED"));
        assert_eq!(app.action(), Some("Please log in again."));
    }

    #[test]
    fn test_client_app_error_becomes_validation() {
        let err = AuthError::from(AppError::bad_request("Invalid Phone Number"));
        assert!(matches!(err, AuthError::Validation(ref m) if m == "Invalid Phone Number"));
    }
}
