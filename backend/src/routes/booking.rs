//! Booking route definitions

use axum::{
    routing::{get, put},
    Router,
};

use crate::handlers::booking::*;
use crate::state::AppState;

pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", get(list_bookings).post(create_booking))
        .route("/api/bookings/my-bookings", get(my_bookings))
        .route("/api/bookings/my-orders", get(my_orders))
        .route(
            "/api/bookings/:id",
            get(get_booking).delete(cancel_booking),
        )
        .route("/api/bookings/:id/status", put(update_status))
        .route("/api/bookings/:id/payment-status", put(update_payment_status))
}
