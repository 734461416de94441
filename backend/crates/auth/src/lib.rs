//! Auth Gateway Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and notifier traits
//! - `application/` - OTP challenges, JWT issuance, the session guard, use cases
//! - `infra/` - In-memory repository, log-based OTP delivery
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration with phone verification through a stateless OTP
//! - Login by email + password or by phone OTP
//! - Access/refresh JWT pair in `HttpOnly` cookies, signed with an
//!   asymmetric key
//! - Transparent access token rotation while the refresh token is valid
//! - Role-based access (User, Manager, Admin)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - OTP challenges sealed with HMAC-SHA256 over identifier, code and expiry
//! - Tokens are not revocable; logout only clears cookies

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::TokenKeys;
pub use jsonwebtoken::Algorithm;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::InMemoryUserRepository, otp_sender::TracingOtpSender};
pub use presentation::{handlers::AuthAppState, router::auth_router};

