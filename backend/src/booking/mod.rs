//! Booking domain module
//!
//! Contains the booking model, its status rules and the lifecycle service.

mod model;
mod service;

pub use model::*;
pub use service::BookingService;
