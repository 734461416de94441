//! Value Object Module

pub mod date_of_birth;
pub mod email;
pub mod organization;
pub mod phone_number;
pub mod token_kind;
pub mod user_id;
pub mod user_name;
pub mod user_role;
