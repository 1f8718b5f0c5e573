//! Service catalog domain module
//!
//! Provider-owned listings and location search.

pub mod geo;
mod model;
mod service;

pub use model::*;
pub use service::CatalogService;
