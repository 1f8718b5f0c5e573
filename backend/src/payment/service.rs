use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::config::GatewayConfig;
use crate::error::ApiError;
use crate::payment::gateway::PaymentGateway;
use crate::payment::model::{
    CreateOrderRequest, GatewayOrderRequest, Payment, PaymentStatus, VerifyPaymentRequest,
    MAX_RECEIPT_LEN,
};
use crate::payment::signature;
use crate::repository::{BookingRepository, PaymentRepository};

/// Gateway order creation and callback verification.
///
/// Verification only marks the payment record; the booking's own
/// `payment_status` is moved separately by the client.
#[derive(Clone)]
pub struct PaymentService {
    payments: Arc<dyn PaymentRepository>,
    bookings: Arc<dyn BookingRepository>,
    gateway: Arc<dyn PaymentGateway>,
    key_secret: String,
    currency: String,
}

impl PaymentService {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        bookings: Arc<dyn BookingRepository>,
        gateway: Arc<dyn PaymentGateway>,
        config: &GatewayConfig,
    ) -> Self {
        Self {
            payments,
            bookings,
            gateway,
            key_secret: config.key_secret.clone(),
            currency: config.currency.clone(),
        }
    }

    /// Create a gateway order for a booking and record it as PENDING.
    /// A retry for an unpaid booking replaces the order id on the same row.
    pub async fn create_order(&self, request: CreateOrderRequest) -> Result<Payment, ApiError> {
        request.validate()?;

        let booking = self
            .bookings
            .find_by_id(request.booking_id)
            .await?
            .ok_or(ApiError::NotFound("Booking not found".to_string()))?;

        let receipt = booking.id.to_string();
        if receipt.len() > MAX_RECEIPT_LEN {
            return Err(ApiError::ValidationError(format!(
                "receipt must be at most {} characters",
                MAX_RECEIPT_LEN
            )));
        }

        let existing = self.payments.find_by_booking_id(booking.id).await?;
        if let Some(payment) = &existing {
            if matches!(payment.status, PaymentStatus::Completed | PaymentStatus::Refunded) {
                return Err(ApiError::InvalidState(format!(
                    "Booking {} is already paid",
                    booking.id
                )));
            }
        }

        tracing::info!(
            booking_id = %booking.id,
            amount = request.amount,
            "Creating gateway order"
        );

        let order = self
            .gateway
            .create_order(&GatewayOrderRequest {
                amount: request.amount,
                currency: self.currency.clone(),
                receipt,
            })
            .await
            .map_err(|e| match e {
                ApiError::GatewayError(msg) => ApiError::GatewayError(format!(
                    "{}. Please check gateway credentials",
                    msg
                )),
                other => other,
            })?;

        let payment = match existing {
            Some(mut payment) => {
                payment.gateway_order_id = order.id;
                payment.gateway_payment_id = None;
                payment.gateway_signature = None;
                payment.amount = request.amount;
                payment.currency = self.currency.clone();
                payment.status = PaymentStatus::Pending;
                payment.paid_at = None;
                self.payments.update(&payment).await?
            }
            None => {
                let now = Utc::now();
                self.payments
                    .create(Payment {
                        id: Uuid::new_v4(),
                        booking_id: booking.id,
                        gateway_order_id: order.id,
                        gateway_payment_id: None,
                        gateway_signature: None,
                        amount: request.amount,
                        currency: self.currency.clone(),
                        status: PaymentStatus::Pending,
                        paid_at: None,
                        created_at: now,
                        updated_at: now,
                    })
                    .await?
            }
        };

        tracing::info!(
            booking_id = %payment.booking_id,
            order_id = %payment.gateway_order_id,
            "Payment order recorded"
        );

        Ok(payment)
    }

    /// Check the gateway signature, then mark the payment COMPLETED.
    /// Nothing is written when the signature does not match.
    pub async fn verify_payment(&self, request: VerifyPaymentRequest) -> Result<Payment, ApiError> {
        request.validate()?;

        if !signature::verify(
            &self.key_secret,
            &request.order_id,
            &request.payment_id,
            &request.signature,
        ) {
            tracing::warn!(order_id = %request.order_id, "Payment signature mismatch");
            return Err(ApiError::InvalidSignature);
        }

        let mut payment = self
            .payments
            .find_by_order_id(&request.order_id)
            .await?
            .ok_or(ApiError::NotFound("Payment not found".to_string()))?;

        if payment.status == PaymentStatus::Refunded {
            return Err(ApiError::InvalidState(
                "Payment has been refunded".to_string(),
            ));
        }

        let already_settled = payment.status == PaymentStatus::Completed
            && payment.gateway_payment_id.as_deref() == Some(request.payment_id.as_str());

        payment.gateway_payment_id = Some(request.payment_id);
        payment.gateway_signature = Some(request.signature);
        payment.status = PaymentStatus::Completed;
        if !already_settled || payment.paid_at.is_none() {
            payment.paid_at = Some(Utc::now());
        }
        let payment = self.payments.update(&payment).await?;

        tracing::info!(
            booking_id = %payment.booking_id,
            order_id = %payment.gateway_order_id,
            "Payment verified"
        );

        Ok(payment)
    }

    pub async fn get_by_booking_id(&self, booking_id: Uuid) -> Result<Payment, ApiError> {
        self.payments
            .find_by_booking_id(booking_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!("Payment not found for booking: {}", booking_id))
            })
    }
}
