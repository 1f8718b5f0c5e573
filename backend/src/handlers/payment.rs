//! Payment handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use super::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::ApiResponse;
use crate::payment::{CreateOrderRequest, Payment, PaymentService, VerifyPaymentRequest};

/// POST /api/payments/create-order
pub async fn create_order(
    State(service): State<Arc<PaymentService>>,
    user: AuthenticatedUser,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Payment>>), ApiError> {
    tracing::debug!(user_id = %user.id(), booking_id = %request.booking_id, "Order requested");
    let payment = service.create_order(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(payment))))
}

/// POST /api/payments/verify
pub async fn verify_payment(
    State(service): State<Arc<PaymentService>>,
    _user: AuthenticatedUser,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<Json<ApiResponse<Payment>>, ApiError> {
    let payment = service.verify_payment(request).await?;
    Ok(Json(ApiResponse::ok(payment)))
}

/// GET /api/payments/booking/:booking_id
pub async fn get_payment_by_booking(
    State(service): State<Arc<PaymentService>>,
    _user: AuthenticatedUser,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Payment>>, ApiError> {
    let payment = service.get_by_booking_id(booking_id).await?;
    Ok(Json(ApiResponse::ok(payment)))
}
