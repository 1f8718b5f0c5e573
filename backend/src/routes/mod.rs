//! Route definitions for ServiceHub API

mod booking;
mod catalog;
mod message;
mod payment;
mod report;
mod review;
mod user;

use axum::{routing::get, Router};

use crate::handlers::health::{health_check, root};
use crate::middleware;
use crate::state::AppState;

pub use booking::booking_routes;
pub use catalog::catalog_routes;
pub use message::message_routes;
pub use payment::payment_routes;
pub use report::report_routes;
pub use review::review_routes;
pub use user::user_routes;

/// Full application router with request tracing; CORS is layered by the caller
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(user_routes())
        .merge(catalog_routes())
        .merge(booking_routes())
        .merge(payment_routes())
        .merge(review_routes())
        .merge(report_routes())
        .merge(message_routes())
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::request_tracing))
}
