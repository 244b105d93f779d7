//! Admin authentication

pub mod admin_auth;

pub use admin_auth::{admin_auth_middleware, is_admin};
