//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use servicehub_server::booking::{Booking, CreateBookingRequest};
use servicehub_server::catalog::{PriceType, ServiceCategory, ServiceRequest};
use servicehub_server::config::GatewayConfig;
use servicehub_server::error::ApiError;
use servicehub_server::models::{User, UserRole};
use servicehub_server::payment::{GatewayOrder, GatewayOrderRequest, PaymentGateway};
use servicehub_server::repository::{MemoryStore, UserRepository};
use servicehub_server::state::AppState;

pub const KEY_SECRET: &str = "test_key_secret";
pub const JWT_SECRET: &str = "test-jwt-secret";

/// Gateway stand-in handing out sequential order ids
#[derive(Default)]
pub struct FakeGateway {
    issued: AtomicUsize,
    pub fail: bool,
}

impl FakeGateway {
    pub fn failing() -> Self {
        Self {
            issued: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn orders_issued(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_order(&self, request: &GatewayOrderRequest) -> Result<GatewayOrder, ApiError> {
        if self.fail {
            return Err(ApiError::GatewayError("status 401: bad credentials".to_string()));
        }
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(GatewayOrder {
            id: format!("order_test_{}", n),
            amount: request.amount,
            currency: request.currency.clone(),
            status: Some("created".to_string()),
        })
    }
}

pub fn gateway_config() -> GatewayConfig {
    GatewayConfig {
        key_id: "rzp_test_key".to_string(),
        key_secret: KEY_SECRET.to_string(),
        api_url: "http://gateway.invalid/v1".to_string(),
        currency: "INR".to_string(),
        timeout: Duration::from_secs(5),
    }
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub gateway: Arc<FakeGateway>,
    pub state: AppState,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_gateway(FakeGateway::default())
    }

    pub fn with_gateway(gateway: FakeGateway) -> Self {
        let store = Arc::new(MemoryStore::new());
        let gateway = Arc::new(gateway);
        let state = AppState::from_store(
            store.clone(),
            gateway.clone(),
            &gateway_config(),
            JWT_SECRET.to_string(),
            3600,
            None,
        );
        Self {
            store,
            gateway,
            state,
        }
    }

    pub async fn user(&self, name: &str, role: UserRole) -> User {
        let now = Utc::now();
        UserRepository::create(
            self.store.as_ref(),
            User {
                id: Uuid::new_v4(),
                name: name.to_string(),
                email: format!("{}-{}@example.com", name.to_lowercase(), Uuid::new_v4()),
                phone: "9876543210".to_string(),
                role,
                approved: role == UserRole::Provider,
                address: None,
                city: Some("Pune".to_string()),
                state: None,
                zip_code: None,
                created_at: now,
                updated_at: now,
            },
        )
        .await
        .expect("create user")
    }

    pub async fn consumer(&self) -> User {
        self.user("Asha", UserRole::Consumer).await
    }

    pub async fn provider(&self) -> User {
        self.user("Ravi", UserRole::Provider).await
    }

    /// Listing owned by `provider` at the given price and coordinates
    pub async fn listing(&self, provider: &User, price: i64, coords: Option<(f64, f64)>) -> Uuid {
        self.state
            .catalog_service
            .create_service(provider, service_request(price, coords))
            .await
            .expect("create service")
            .listing
            .id
    }

    pub async fn booking(&self, consumer: &User, provider: &User, price: i64) -> Booking {
        let service_id = self.listing(provider, price, None).await;
        self.state
            .booking_service
            .create_booking(consumer, booking_request(provider.id, service_id))
            .await
            .expect("create booking")
    }

    pub fn token_for(&self, user: &User) -> String {
        self.state
            .auth_service
            .issue_token(user)
            .expect("issue token")
    }
}

pub fn service_request(price: i64, coords: Option<(f64, f64)>) -> ServiceRequest {
    ServiceRequest {
        name: "Fan installation".to_string(),
        category: ServiceCategory::Electrical,
        description: Some("Ceiling fan fitting".to_string()),
        price,
        price_type: PriceType::Fixed,
        images: None,
        service_area: Some("Kothrud".to_string()),
        latitude: coords.map(|c| c.0),
        longitude: coords.map(|c| c.1),
        service_radius: None,
    }
}

pub fn booking_request(provider_id: Uuid, service_id: Uuid) -> CreateBookingRequest {
    CreateBookingRequest {
        provider_id,
        service_id,
        scheduled_date: NaiveDate::from_ymd_opt(2026, 11, 2).expect("valid date"),
        scheduled_time: "10:30".to_string(),
        address: "12 MG Road, Pune".to_string(),
        description: None,
    }
}
