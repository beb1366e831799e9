//! Session authentication

pub mod jwt;
mod manager;

pub use jwt::{JwtError, SessionClaims};
pub use manager::AuthManager;
