//! Payment domain module
//!
//! Gateway orders, signature verification and payment records.

pub mod gateway;
mod model;
mod service;
pub mod signature;

pub use gateway::{PaymentGateway, RazorpayGateway};
pub use model::*;
pub use service::PaymentService;
