//! Entity Module

pub mod claims;
pub mod otp_challenge;
pub mod principal;
pub mod user;
