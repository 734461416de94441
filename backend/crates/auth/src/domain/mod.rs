//! Domain Layer
//!
//! Contains entities, value objects, repository and notifier traits.

pub mod entity;
pub mod notifier;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{claims::Claims, otp_challenge::OtpChallenge, principal::Principal, user::User};
pub use notifier::OtpSender;
pub use repository::UserRepository;
