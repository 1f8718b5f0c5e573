//! Payment route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::payment::{create_order, get_payment_by_booking, verify_payment};
use crate::state::AppState;

pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/api/payments/create-order", post(create_order))
        .route("/api/payments/verify", post(verify_payment))
        .route(
            "/api/payments/booking/:booking_id",
            get(get_payment_by_booking),
        )
}
