//! Authentication module for ServiceHub
//!
//! - HS256 bearer tokens carrying the user id and role
//! - Identity resolution against the user store

mod jwt;
mod service;

pub use jwt::{generate_access_token, verify_token, Claims, JwtError};
pub use service::{AuthError, AuthService};
