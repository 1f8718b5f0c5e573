//! Dashboard statistics
//!
//! Consumer spend and provider earnings derived from bookings, payments
//! and reviews. Nothing here writes.

mod service;
pub mod stats;

pub use service::DashboardService;
pub use stats::{ConsumerStats, DashboardStats, ProviderStats};
