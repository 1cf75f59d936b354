//! Value objects returned across the core boundary.

pub mod auth_result;

pub use auth_result::AuthResult;
