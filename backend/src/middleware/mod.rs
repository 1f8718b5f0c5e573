//! Middleware for ServiceHub API
//!
//! This module provides request tracing and bearer authentication.

pub mod auth;
mod tracing;

pub use auth::{AuthenticatedUser, ProviderUser};
pub use tracing::request_tracing;
