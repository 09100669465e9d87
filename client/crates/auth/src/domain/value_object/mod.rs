//! Value Object Module

pub mod access_token;
pub mod user_role;
