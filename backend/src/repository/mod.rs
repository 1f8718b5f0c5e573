//! Persistence collaborator traits
//!
//! Every collection exposes find/create/update primitives behind an async
//! trait so services can run against Postgres or the in-memory store.

mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::booking::Booking;
use crate::catalog::{ServiceCategory, ServiceListing};
use crate::error::ApiResult;
use crate::message::Message;
use crate::models::User;
use crate::payment::Payment;
use crate::report::Report;
use crate::review::Review;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> ApiResult<User>;
    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<User>>;
    async fn update(&self, user: &User) -> ApiResult<User>;
}

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn create(&self, listing: ServiceListing) -> ApiResult<ServiceListing>;
    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<ServiceListing>>;
    async fn find_all(&self) -> ApiResult<Vec<ServiceListing>>;
    async fn find_by_provider(&self, provider_id: Uuid) -> ApiResult<Vec<ServiceListing>>;
    async fn find_by_category(&self, category: ServiceCategory) -> ApiResult<Vec<ServiceListing>>;
    async fn update(&self, listing: &ServiceListing) -> ApiResult<ServiceListing>;
    /// Returns false when nothing was deleted
    async fn delete(&self, id: Uuid) -> ApiResult<bool>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: Booking) -> ApiResult<Booking>;
    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<Booking>>;
    async fn find_by_consumer(&self, consumer_id: Uuid) -> ApiResult<Vec<Booking>>;
    async fn find_by_provider(&self, provider_id: Uuid) -> ApiResult<Vec<Booking>>;
    async fn update(&self, booking: &Booking) -> ApiResult<Booking>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: Payment) -> ApiResult<Payment>;
    async fn find_by_order_id(&self, order_id: &str) -> ApiResult<Option<Payment>>;
    async fn find_by_booking_id(&self, booking_id: Uuid) -> ApiResult<Option<Payment>>;
    async fn update(&self, payment: &Payment) -> ApiResult<Payment>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: Review) -> ApiResult<Review>;
    async fn find_by_booking_id(&self, booking_id: Uuid) -> ApiResult<Option<Review>>;
    async fn find_by_provider(&self, provider_id: Uuid) -> ApiResult<Vec<Review>>;
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn create(&self, report: Report) -> ApiResult<Report>;
    async fn find_by_reporter_and_booking(
        &self,
        reporter_id: Uuid,
        booking_id: Uuid,
    ) -> ApiResult<Option<Report>>;
    /// Newest first
    async fn find_by_reporter(&self, reporter_id: Uuid) -> ApiResult<Vec<Report>>;
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, message: Message) -> ApiResult<Message>;
    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<Message>>;
    /// Both directions between two users, oldest first
    async fn find_conversation(&self, user_a: Uuid, user_b: Uuid) -> ApiResult<Vec<Message>>;
    /// Sent or received by the user, newest first
    async fn find_for_user(&self, user_id: Uuid) -> ApiResult<Vec<Message>>;
    async fn mark_read(&self, id: Uuid) -> ApiResult<()>;
    async fn count_unread(&self, receiver_id: Uuid) -> ApiResult<i64>;
}
