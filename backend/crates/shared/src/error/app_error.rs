//! Application Error - the error every HTTP-facing layer converges on
//!
//! Defines [`AppError`] and the [`AppResult<T>`] alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// Unified gateway error.
///
/// Besides the [`ErrorKind`] and a human message it can carry:
/// * `reason` - a stable machine code clients can branch on
///   (e.g. `REFRESH_TOKEN_EXPIRED` vs `ACCESS_TOKEN_INVALID`)
/// * `action` - what the user should do next ("Please log in again")
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::Unauthorized, "Refresh token has expired")
///     .with_reason("REFRESH_TOKEN_EXPIRED")
///     .with_action("Please log in again");
/// assert_eq!(err.status_code(), 401);
/// assert_eq!(err.reason(), Some("REFRESH_TOKEN_EXPIRED"));
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    reason: Option<&'static str>,
    action: Option<Cow<'static, str>>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            reason: None,
            action: None,
        }
    }

    #[inline]
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Attach a stable machine-readable reason code
    #[inline]
    pub fn with_reason(mut self, reason: &'static str) -> Self {
        self.reason = Some(reason);
        self
    }

    /// Attach the action the user should take next
    #[inline]
    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn reason(&self) -> Option<&'static str> {
        self.reason
    }

    #[inline]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        if let Some(reason) = self.reason {
            builder.field("reason", &reason);
        }
        if let Some(action) = &self.action {
            builder.field("action", action);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(action) = &self.action {
            write!(f, " (Action: {})", action)?;
        }
        Ok(())
    }
}

impl Error for AppError {}
