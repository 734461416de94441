//! Infrastructure Layer
//!
//! Repository and OTP delivery implementations.

pub mod memory;
pub mod otp_sender;

pub use memory::InMemoryUserRepository;
pub use otp_sender::TracingOtpSender;
