//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::AuthService;
use crate::booking::BookingService;
use crate::catalog::CatalogService;
use crate::config::GatewayConfig;
use crate::dashboard::DashboardService;
use crate::message::MessageService;
use crate::payment::{PaymentGateway, PaymentService};
use crate::report::ReportService;
use crate::repository::{
    BookingRepository, MessageRepository, PaymentRepository, ReportRepository, ReviewRepository,
    ServiceRepository, UserRepository,
};
use crate::review::ReviewService;
use crate::users::UserService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub catalog_service: Arc<CatalogService>,
    pub booking_service: Arc<BookingService>,
    pub payment_service: Arc<PaymentService>,
    pub review_service: Arc<ReviewService>,
    pub report_service: Arc<ReportService>,
    pub message_service: Arc<MessageService>,
    pub dashboard_service: Arc<DashboardService>,
    /// Present when running against Postgres, probed by `/health`
    pub db_pool: Option<PgPool>,
}

impl AppState {
    /// Wire every service over one store implementing all repositories
    pub fn from_store<S>(
        store: Arc<S>,
        gateway: Arc<dyn PaymentGateway>,
        gateway_config: &GatewayConfig,
        jwt_secret: String,
        access_token_ttl: i64,
        db_pool: Option<PgPool>,
    ) -> Self
    where
        S: UserRepository
            + ServiceRepository
            + BookingRepository
            + PaymentRepository
            + ReviewRepository
            + ReportRepository
            + MessageRepository
            + 'static,
    {
        let users: Arc<dyn UserRepository> = store.clone();
        let services: Arc<dyn ServiceRepository> = store.clone();
        let bookings: Arc<dyn BookingRepository> = store.clone();
        let payments: Arc<dyn PaymentRepository> = store.clone();
        let reviews: Arc<dyn ReviewRepository> = store.clone();
        let reports: Arc<dyn ReportRepository> = store.clone();
        let messages: Arc<dyn MessageRepository> = store;

        Self {
            auth_service: Arc::new(AuthService::new(
                users.clone(),
                jwt_secret,
                access_token_ttl,
            )),
            user_service: Arc::new(UserService::new(users.clone())),
            catalog_service: Arc::new(CatalogService::new(services.clone(), users.clone())),
            booking_service: Arc::new(BookingService::new(
                bookings.clone(),
                services.clone(),
                users.clone(),
            )),
            payment_service: Arc::new(PaymentService::new(
                payments.clone(),
                bookings.clone(),
                gateway,
                gateway_config,
            )),
            review_service: Arc::new(ReviewService::new(reviews.clone(), bookings.clone())),
            report_service: Arc::new(ReportService::new(reports, bookings.clone())),
            message_service: Arc::new(MessageService::new(messages, users)),
            dashboard_service: Arc::new(DashboardService::new(
                bookings, payments, services, reviews,
            )),
            db_pool,
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}

impl FromRef<AppState> for Arc<UserService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.user_service.clone()
    }
}

impl FromRef<AppState> for Arc<CatalogService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.catalog_service.clone()
    }
}

impl FromRef<AppState> for Arc<BookingService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.booking_service.clone()
    }
}

impl FromRef<AppState> for Arc<PaymentService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.payment_service.clone()
    }
}

impl FromRef<AppState> for Arc<ReviewService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.review_service.clone()
    }
}

impl FromRef<AppState> for Arc<ReportService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.report_service.clone()
    }
}

impl FromRef<AppState> for Arc<MessageService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.message_service.clone()
    }
}

impl FromRef<AppState> for Arc<DashboardService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.dashboard_service.clone()
    }
}
