//! HTTP surface: routing, auth extractors and response envelopes

mod common;

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use servicehub_server::models::User;
    use servicehub_server::routes::app_router;

    use crate::common::Harness;

    fn app(h: &Harness) -> Router {
        app_router(h.state.clone())
    }

    fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn listing_body() -> Value {
        json!({
            "name": "Kitchen tap replacement",
            "category": "plumbing",
            "price": 45000,
            "priceType": "fixed",
            "latitude": 18.5204,
            "longitude": 73.8567
        })
    }

    async fn create_listing(h: &Harness, provider: &User) -> Value {
        let token = h.token_for(provider);
        let (status, body) = send(
            app(h),
            request(Method::POST, "/api/services", Some(&token), Some(listing_body())),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    #[tokio::test]
    async fn test_health_reports_in_memory_store() {
        let h = Harness::new();

        let (status, body) = send(app(&h), request(Method::GET, "/health", None, None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "in-memory");
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        let h = Harness::new();

        let (status, body) = send(app(&h), request(Method::GET, "/api/bookings", None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "MISSING_TOKEN");

        let (status, body) = send(
            app(&h),
            request(Method::GET, "/api/users/me", Some("not-a-jwt"), None),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn test_get_me_returns_caller() {
        let h = Harness::new();
        let consumer = h.consumer().await;
        let token = h.token_for(&consumer);

        let (status, body) = send(
            app(&h),
            request(Method::GET, "/api/users/me", Some(&token), None),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["email"], consumer.email.as_str());
        assert_eq!(body["data"]["role"], "CONSUMER");
    }

    #[tokio::test]
    async fn test_provider_creates_listing() {
        let h = Harness::new();
        let provider = h.provider().await;

        let body = create_listing(&h, &provider).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["providerId"], provider.id.to_string());
        assert_eq!(body["data"]["providerName"], provider.name.as_str());
        assert_eq!(body["data"]["price"], 45000);
        assert_eq!(body["data"]["serviceRadius"], 5.0);
    }

    #[tokio::test]
    async fn test_consumer_cannot_create_listing() {
        let h = Harness::new();
        let consumer = h.consumer().await;
        let token = h.token_for(&consumer);

        let (status, body) = send(
            app(&h),
            request(Method::POST, "/api/services", Some(&token), Some(listing_body())),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_booking_over_http() {
        let h = Harness::new();
        let consumer = h.consumer().await;
        let provider = h.provider().await;
        let listing = create_listing(&h, &provider).await;
        let service_id = listing["data"]["id"].as_str().unwrap().to_string();

        let consumer_token = h.token_for(&consumer);
        let (status, body) = send(
            app(&h),
            request(
                Method::POST,
                "/api/bookings",
                Some(&consumer_token),
                Some(json!({
                    "providerId": provider.id,
                    "serviceId": service_id,
                    "scheduledDate": "2026-11-02",
                    "scheduledTime": "10:30",
                    "address": "12 MG Road, Pune"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["status"], "PENDING");
        assert_eq!(body["data"]["price"], 45000);
        let booking_id = body["data"]["id"].as_str().unwrap().to_string();

        // consumer may not confirm
        let uri = format!("/api/bookings/{}/status?status=CONFIRMED", booking_id);
        let (status, _) = send(
            app(&h),
            request(Method::PUT, &uri, Some(&consumer_token), None),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let provider_token = h.token_for(&provider);
        let (status, body) = send(
            app(&h),
            request(Method::PUT, &uri, Some(&provider_token), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "CONFIRMED");

        let uri = format!("/api/bookings/{}/status?status=PENDING", booking_id);
        let (status, body) = send(
            app(&h),
            request(Method::PUT, &uri, Some(&provider_token), None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_STATE");
    }

    #[tokio::test]
    async fn test_verify_with_bad_signature_is_rejected() {
        let h = Harness::new();
        let consumer = h.consumer().await;
        let token = h.token_for(&consumer);

        let (status, body) = send(
            app(&h),
            request(
                Method::POST,
                "/api/payments/verify",
                Some(&token),
                Some(json!({
                    "razorpayOrderId": "order_test_1",
                    "razorpayPaymentId": "pay_1",
                    "razorpaySignature": "deadbeef"
                })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_SIGNATURE");
    }

    #[tokio::test]
    async fn test_dashboard_stats_shape_follows_role() {
        let h = Harness::new();
        let provider = h.provider().await;
        let token = h.token_for(&provider);

        let (status, body) = send(
            app(&h),
            request(Method::GET, "/api/users/dashboard/stats", Some(&token), None),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["totalBookings"], 0);
        assert_eq!(body["data"]["totalEarnings"], 0);
        assert_eq!(body["data"]["averageRating"], 0.0);
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let h = Harness::new();

        let response = app(&h)
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("x-request-id").unwrap(),
            "req-42"
        );
    }
}
