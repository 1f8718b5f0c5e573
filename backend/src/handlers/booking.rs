//! Booking lifecycle handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use super::AuthenticatedUser;
use crate::booking::{Booking, BookingService, CreateBookingRequest, PaymentStatusQuery, StatusQuery};
use crate::error::ApiError;
use crate::models::ApiResponse;

/// POST /api/bookings
pub async fn create_booking(
    State(service): State<Arc<BookingService>>,
    AuthenticatedUser(consumer): AuthenticatedUser,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Booking>>), ApiError> {
    let booking = service.create_booking(&consumer, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(booking))))
}

/// GET /api/bookings - the caller's bookings for their role
pub async fn list_bookings(
    State(service): State<Arc<BookingService>>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<Booking>>>, ApiError> {
    let bookings = service.list_for_user(&user).await?;
    Ok(Json(ApiResponse::ok(bookings)))
}

/// GET /api/bookings/my-bookings
pub async fn my_bookings(
    State(service): State<Arc<BookingService>>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<Booking>>>, ApiError> {
    let bookings = service.list_for_consumer(user.id()).await?;
    Ok(Json(ApiResponse::ok(bookings)))
}

/// GET /api/bookings/my-orders
pub async fn my_orders(
    State(service): State<Arc<BookingService>>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<Booking>>>, ApiError> {
    let bookings = service.list_for_provider(user.id()).await?;
    Ok(Json(ApiResponse::ok(bookings)))
}

pub async fn get_booking(
    State(service): State<Arc<BookingService>>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Booking>>, ApiError> {
    let booking = service.get_booking(user.id(), id).await?;
    Ok(Json(ApiResponse::ok(booking)))
}

/// PUT /api/bookings/:id/status?status=
pub async fn update_status(
    State(service): State<Arc<BookingService>>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<ApiResponse<Booking>>, ApiError> {
    let booking = service.transition_status(user.id(), id, query.status).await?;
    Ok(Json(ApiResponse::ok(booking)))
}

/// PUT /api/bookings/:id/payment-status?paymentStatus=
pub async fn update_payment_status(
    State(service): State<Arc<BookingService>>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Query(query): Query<PaymentStatusQuery>,
) -> Result<Json<ApiResponse<Booking>>, ApiError> {
    let booking = service
        .update_payment_status(user.id(), id, query.payment_status)
        .await?;
    Ok(Json(ApiResponse::ok(booking)))
}

/// DELETE /api/bookings/:id - consumer cancellation
pub async fn cancel_booking(
    State(service): State<Arc<BookingService>>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Booking>>, ApiError> {
    let booking = service.cancel_booking(user.id(), id).await?;
    Ok(Json(ApiResponse::ok(booking)))
}
