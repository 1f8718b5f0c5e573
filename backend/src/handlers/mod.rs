//! API handlers for ServiceHub backend

pub mod booking;
pub mod catalog;
pub mod health;
pub mod message;
pub mod payment;
pub mod report;
pub mod review;
pub mod user;

// Re-export extractors from middleware for handler use
pub use crate::middleware::auth::{AuthenticatedUser, ProviderUser};
