//! Payment records and gateway DTOs

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

pub use crate::booking::PaymentStatus;

/// Gateway receipts are limited to 40 characters
pub const MAX_RECEIPT_LEN: usize = 40;

/// Payment model, one per booking
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub gateway_order_id: String,
    pub gateway_payment_id: Option<String>,
    pub gateway_signature: Option<String>,
    pub amount: i64, // Amount in paise
    pub currency: String,
    pub status: PaymentStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for `POST /api/payments/create-order`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub booking_id: Uuid,
    #[validate(range(min = 1))]
    pub amount: i64,
}

/// Request DTO for `POST /api/payments/verify`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    #[serde(alias = "razorpayOrderId")]
    #[validate(length(min = 1))]
    pub order_id: String,
    #[serde(alias = "razorpayPaymentId")]
    #[validate(length(min = 1))]
    pub payment_id: String,
    #[serde(alias = "razorpaySignature")]
    #[validate(length(min = 1))]
    pub signature: String,
}

/// Order creation payload sent to the gateway
#[derive(Debug, Serialize, Clone)]
pub struct GatewayOrderRequest {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
}

/// Order as acknowledged by the gateway
#[derive(Debug, Deserialize, Clone)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub status: Option<String>,
}
