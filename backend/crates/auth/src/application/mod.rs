//! Application Layer
//!
//! Core services (OTP, tokens, session guard) and the use cases built on them.

pub mod config;
pub mod list_users;
pub mod otp;
pub mod phone_sign_in;
pub mod session_guard;
pub mod sign_in;
pub mod sign_up;
pub mod token;
pub mod verify_otp;

// Re-exports
pub use config::AuthConfig;
pub use list_users::UserQueryUseCase;
pub use otp::{OtpError, OtpService};
pub use phone_sign_in::SendOtpUseCase;
pub use session_guard::{GuardOutcome, SessionGuard, TokenPresence};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use token::{TokenError, TokenKeys, TokenPair, TokenService};
pub use verify_otp::{VerifyOtpInput, VerifyOtpOutput, VerifyOtpUseCase};
