//! Order creation and signature verification

mod common;

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use servicehub_server::error::ApiError;
    use servicehub_server::payment::{
        signature, CreateOrderRequest, PaymentStatus, VerifyPaymentRequest,
    };

    use crate::common::{FakeGateway, Harness, KEY_SECRET};

    fn verify_request(order_id: &str, payment_id: &str) -> VerifyPaymentRequest {
        VerifyPaymentRequest {
            order_id: order_id.to_string(),
            payment_id: payment_id.to_string(),
            signature: signature::sign(KEY_SECRET, order_id, payment_id).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_order_records_pending_payment() {
        let h = Harness::new();
        let consumer = h.consumer().await;
        let provider = h.provider().await;
        let booking = h.booking(&consumer, &provider, 50_000).await;

        let payment = h
            .state
            .payment_service
            .create_order(CreateOrderRequest {
                booking_id: booking.id,
                amount: 55_000,
            })
            .await
            .unwrap();

        assert_eq!(payment.booking_id, booking.id);
        assert_eq!(payment.gateway_order_id, "order_test_1");
        assert_eq!(payment.amount, 55_000);
        assert_eq!(payment.currency, "INR");
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert!(payment.paid_at.is_none());
    }

    #[tokio::test]
    async fn test_create_order_for_unknown_booking() {
        let h = Harness::new();

        let result = h
            .state
            .payment_service
            .create_order(CreateOrderRequest {
                booking_id: Uuid::new_v4(),
                amount: 1_000,
            })
            .await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
        assert_eq!(h.gateway.orders_issued(), 0);
    }

    #[tokio::test]
    async fn test_create_order_rejects_non_positive_amount() {
        let h = Harness::new();
        let consumer = h.consumer().await;
        let provider = h.provider().await;
        let booking = h.booking(&consumer, &provider, 50_000).await;

        let result = h
            .state
            .payment_service
            .create_order(CreateOrderRequest {
                booking_id: booking.id,
                amount: 0,
            })
            .await;

        assert!(matches!(result, Err(ApiError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_gateway_failure_surfaces_as_gateway_error() {
        let h = Harness::with_gateway(FakeGateway::failing());
        let consumer = h.consumer().await;
        let provider = h.provider().await;
        let booking = h.booking(&consumer, &provider, 50_000).await;

        let result = h
            .state
            .payment_service
            .create_order(CreateOrderRequest {
                booking_id: booking.id,
                amount: 55_000,
            })
            .await;

        assert!(matches!(result, Err(ApiError::GatewayError(_))));
        assert!(matches!(
            h.state.payment_service.get_by_booking_id(booking.id).await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_retry_replaces_order_on_same_record() {
        let h = Harness::new();
        let consumer = h.consumer().await;
        let provider = h.provider().await;
        let booking = h.booking(&consumer, &provider, 50_000).await;
        let svc = &h.state.payment_service;

        let first = svc
            .create_order(CreateOrderRequest {
                booking_id: booking.id,
                amount: 55_000,
            })
            .await
            .unwrap();
        let second = svc
            .create_order(CreateOrderRequest {
                booking_id: booking.id,
                amount: 55_000,
            })
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.gateway_order_id, "order_test_2");

        // the superseded order id no longer resolves
        let result = svc.verify_payment(verify_request("order_test_1", "pay_1")).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_verify_marks_payment_completed() {
        let h = Harness::new();
        let consumer = h.consumer().await;
        let provider = h.provider().await;
        let booking = h.booking(&consumer, &provider, 50_000).await;
        let svc = &h.state.payment_service;

        let order = svc
            .create_order(CreateOrderRequest {
                booking_id: booking.id,
                amount: 55_000,
            })
            .await
            .unwrap();

        let paid = svc
            .verify_payment(verify_request(&order.gateway_order_id, "pay_29QQoUBi66xm2f"))
            .await
            .unwrap();

        assert_eq!(paid.status, PaymentStatus::Completed);
        assert_eq!(paid.gateway_payment_id.as_deref(), Some("pay_29QQoUBi66xm2f"));
        assert!(paid.gateway_signature.is_some());
        assert!(paid.paid_at.is_some());

        // booking payment status is moved separately
        let booking = h
            .state
            .booking_service
            .get_booking(consumer.id, booking.id)
            .await
            .unwrap();
        assert_eq!(booking.payment_status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn test_bad_signature_leaves_record_untouched() {
        let h = Harness::new();
        let consumer = h.consumer().await;
        let provider = h.provider().await;
        let booking = h.booking(&consumer, &provider, 50_000).await;
        let svc = &h.state.payment_service;

        let order = svc
            .create_order(CreateOrderRequest {
                booking_id: booking.id,
                amount: 55_000,
            })
            .await
            .unwrap();

        let mut request = verify_request(&order.gateway_order_id, "pay_1");
        request.signature = signature::sign("wrong_secret", &order.gateway_order_id, "pay_1").unwrap();

        let result = svc.verify_payment(request).await;
        assert!(matches!(result, Err(ApiError::InvalidSignature)));

        let stored = svc.get_by_booking_id(booking.id).await.unwrap();
        assert_eq!(stored.status, PaymentStatus::Pending);
        assert!(stored.gateway_payment_id.is_none());
        assert!(stored.gateway_signature.is_none());
        assert!(stored.paid_at.is_none());
    }

    #[tokio::test]
    async fn test_signature_must_match_exactly() {
        let h = Harness::new();
        let consumer = h.consumer().await;
        let provider = h.provider().await;
        let booking = h.booking(&consumer, &provider, 50_000).await;
        let svc = &h.state.payment_service;

        let order = svc
            .create_order(CreateOrderRequest {
                booking_id: booking.id,
                amount: 55_000,
            })
            .await
            .unwrap();

        let good = verify_request(&order.gateway_order_id, "pay_1");
        for variant in [
            good.signature.to_uppercase(),
            format!("  {}\n", good.signature),
            format!("  {}\n", good.signature.to_uppercase()),
        ] {
            let result = svc
                .verify_payment(VerifyPaymentRequest {
                    order_id: order.gateway_order_id.clone(),
                    payment_id: "pay_1".to_string(),
                    signature: variant,
                })
                .await;
            assert!(matches!(result, Err(ApiError::InvalidSignature)));
        }

        let stored = svc.get_by_booking_id(booking.id).await.unwrap();
        assert_eq!(stored.status, PaymentStatus::Pending);
        assert!(stored.gateway_signature.is_none());
        assert!(stored.paid_at.is_none());
    }

    #[tokio::test]
    async fn test_signature_checked_before_lookup() {
        let h = Harness::new();

        let result = h
            .state
            .payment_service
            .verify_payment(VerifyPaymentRequest {
                order_id: "order_missing".to_string(),
                payment_id: "pay_1".to_string(),
                signature: "00".repeat(32),
            })
            .await;

        assert!(matches!(result, Err(ApiError::InvalidSignature)));
    }

    #[tokio::test]
    async fn test_verify_is_idempotent() {
        let h = Harness::new();
        let consumer = h.consumer().await;
        let provider = h.provider().await;
        let booking = h.booking(&consumer, &provider, 50_000).await;
        let svc = &h.state.payment_service;

        let order = svc
            .create_order(CreateOrderRequest {
                booking_id: booking.id,
                amount: 55_000,
            })
            .await
            .unwrap();

        let first = svc
            .verify_payment(verify_request(&order.gateway_order_id, "pay_1"))
            .await
            .unwrap();
        let second = svc
            .verify_payment(verify_request(&order.gateway_order_id, "pay_1"))
            .await
            .unwrap();

        assert_eq!(second.status, PaymentStatus::Completed);
        assert_eq!(first.paid_at, second.paid_at);
    }

    #[tokio::test]
    async fn test_paid_booking_cannot_open_new_order() {
        let h = Harness::new();
        let consumer = h.consumer().await;
        let provider = h.provider().await;
        let booking = h.booking(&consumer, &provider, 50_000).await;
        let svc = &h.state.payment_service;

        let order = svc
            .create_order(CreateOrderRequest {
                booking_id: booking.id,
                amount: 55_000,
            })
            .await
            .unwrap();
        svc.verify_payment(verify_request(&order.gateway_order_id, "pay_1"))
            .await
            .unwrap();

        let result = svc
            .create_order(CreateOrderRequest {
                booking_id: booking.id,
                amount: 55_000,
            })
            .await;

        assert!(matches!(result, Err(ApiError::InvalidState(_))));
        assert_eq!(h.gateway.orders_issued(), 1);
    }
}
