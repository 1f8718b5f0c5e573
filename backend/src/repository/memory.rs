//! In-process store used by tests and `STORE_BACKEND=memory`

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    BookingRepository, MessageRepository, PaymentRepository, ReportRepository, ReviewRepository,
    ServiceRepository, UserRepository,
};
use crate::booking::Booking;
use crate::catalog::{ServiceCategory, ServiceListing};
use crate::error::{ApiError, ApiResult};
use crate::message::Message;
use crate::models::User;
use crate::payment::Payment;
use crate::report::Report;
use crate::review::Review;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    services: HashMap<Uuid, ServiceListing>,
    bookings: HashMap<Uuid, Booking>,
    payments: HashMap<Uuid, Payment>,
    reviews: HashMap<Uuid, Review>,
    reports: HashMap<Uuid, Report>,
    messages: HashMap<Uuid, Message>,
}

/// HashMap-backed store that mirrors the Postgres unique constraints
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T, F>(mut rows: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> chrono::DateTime<Utc>,
{
    rows.sort_by_key(|row| std::cmp::Reverse(key(row)));
    rows
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: User) -> ApiResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(ApiError::Conflict(format!(
                "User with email {} already exists",
                user.email
            )));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn update(&self, user: &User) -> ApiResult<User> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .users
            .get_mut(&user.id)
            .ok_or_else(|| ApiError::NotFound(format!("User {} not found", user.id)))?;
        *stored = user.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }
}

#[async_trait]
impl ServiceRepository for MemoryStore {
    async fn create(&self, listing: ServiceListing) -> ApiResult<ServiceListing> {
        self.tables
            .write()
            .await
            .services
            .insert(listing.id, listing.clone());
        Ok(listing)
    }

    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<ServiceListing>> {
        Ok(self.tables.read().await.services.get(&id).cloned())
    }

    async fn find_all(&self) -> ApiResult<Vec<ServiceListing>> {
        let rows = self.tables.read().await.services.values().cloned().collect();
        Ok(newest_first(rows, |s: &ServiceListing| s.created_at))
    }

    async fn find_by_provider(&self, provider_id: Uuid) -> ApiResult<Vec<ServiceListing>> {
        let rows = self
            .tables
            .read()
            .await
            .services
            .values()
            .filter(|s| s.provider_id == provider_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |s: &ServiceListing| s.created_at))
    }

    async fn find_by_category(&self, category: ServiceCategory) -> ApiResult<Vec<ServiceListing>> {
        let rows = self
            .tables
            .read()
            .await
            .services
            .values()
            .filter(|s| s.category == category)
            .cloned()
            .collect();
        Ok(newest_first(rows, |s: &ServiceListing| s.created_at))
    }

    async fn update(&self, listing: &ServiceListing) -> ApiResult<ServiceListing> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .services
            .get_mut(&listing.id)
            .ok_or_else(|| ApiError::NotFound(format!("Service {} not found", listing.id)))?;
        *stored = listing.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> ApiResult<bool> {
        Ok(self.tables.write().await.services.remove(&id).is_some())
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn create(&self, booking: Booking) -> ApiResult<Booking> {
        self.tables
            .write()
            .await
            .bookings
            .insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<Booking>> {
        Ok(self.tables.read().await.bookings.get(&id).cloned())
    }

    async fn find_by_consumer(&self, consumer_id: Uuid) -> ApiResult<Vec<Booking>> {
        let rows = self
            .tables
            .read()
            .await
            .bookings
            .values()
            .filter(|b| b.consumer_id == consumer_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |b: &Booking| b.created_at))
    }

    async fn find_by_provider(&self, provider_id: Uuid) -> ApiResult<Vec<Booking>> {
        let rows = self
            .tables
            .read()
            .await
            .bookings
            .values()
            .filter(|b| b.provider_id == provider_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |b: &Booking| b.created_at))
    }

    async fn update(&self, booking: &Booking) -> ApiResult<Booking> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .bookings
            .get_mut(&booking.id)
            .ok_or_else(|| ApiError::NotFound(format!("Booking {} not found", booking.id)))?;
        stored.status = booking.status;
        stored.payment_status = booking.payment_status;
        stored.completed_at = booking.completed_at;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }
}

#[async_trait]
impl PaymentRepository for MemoryStore {
    async fn create(&self, payment: Payment) -> ApiResult<Payment> {
        let mut tables = self.tables.write().await;
        if tables
            .payments
            .values()
            .any(|p| p.booking_id == payment.booking_id)
        {
            return Err(ApiError::Conflict(format!(
                "Payment for booking {} already exists",
                payment.booking_id
            )));
        }
        if tables
            .payments
            .values()
            .any(|p| p.gateway_order_id == payment.gateway_order_id)
        {
            return Err(ApiError::Conflict(format!(
                "Order {} already recorded",
                payment.gateway_order_id
            )));
        }
        tables.payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn find_by_order_id(&self, order_id: &str) -> ApiResult<Option<Payment>> {
        Ok(self
            .tables
            .read()
            .await
            .payments
            .values()
            .find(|p| p.gateway_order_id == order_id)
            .cloned())
    }

    async fn find_by_booking_id(&self, booking_id: Uuid) -> ApiResult<Option<Payment>> {
        Ok(self
            .tables
            .read()
            .await
            .payments
            .values()
            .find(|p| p.booking_id == booking_id)
            .cloned())
    }

    async fn update(&self, payment: &Payment) -> ApiResult<Payment> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .payments
            .get_mut(&payment.id)
            .ok_or_else(|| ApiError::NotFound(format!("Payment {} not found", payment.id)))?;
        *stored = payment.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn create(&self, review: Review) -> ApiResult<Review> {
        let mut tables = self.tables.write().await;
        if tables
            .reviews
            .values()
            .any(|r| r.booking_id == review.booking_id)
        {
            return Err(ApiError::Conflict(format!(
                "Booking {} has already been reviewed",
                review.booking_id
            )));
        }
        tables.reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn find_by_booking_id(&self, booking_id: Uuid) -> ApiResult<Option<Review>> {
        Ok(self
            .tables
            .read()
            .await
            .reviews
            .values()
            .find(|r| r.booking_id == booking_id)
            .cloned())
    }

    async fn find_by_provider(&self, provider_id: Uuid) -> ApiResult<Vec<Review>> {
        let rows = self
            .tables
            .read()
            .await
            .reviews
            .values()
            .filter(|r| r.provider_id == provider_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |r: &Review| r.created_at))
    }
}

#[async_trait]
impl ReportRepository for MemoryStore {
    async fn create(&self, report: Report) -> ApiResult<Report> {
        let mut tables = self.tables.write().await;
        if let Some(booking_id) = report.booking_id {
            if tables
                .reports
                .values()
                .any(|r| r.reporter_id == report.reporter_id && r.booking_id == Some(booking_id))
            {
                return Err(ApiError::Conflict(format!(
                    "Booking {} has already been reported",
                    booking_id
                )));
            }
        }
        tables.reports.insert(report.id, report.clone());
        Ok(report)
    }

    async fn find_by_reporter_and_booking(
        &self,
        reporter_id: Uuid,
        booking_id: Uuid,
    ) -> ApiResult<Option<Report>> {
        Ok(self
            .tables
            .read()
            .await
            .reports
            .values()
            .find(|r| r.reporter_id == reporter_id && r.booking_id == Some(booking_id))
            .cloned())
    }

    async fn find_by_reporter(&self, reporter_id: Uuid) -> ApiResult<Vec<Report>> {
        let rows = self
            .tables
            .read()
            .await
            .reports
            .values()
            .filter(|r| r.reporter_id == reporter_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |r: &Report| r.created_at))
    }
}

#[async_trait]
impl MessageRepository for MemoryStore {
    async fn create(&self, message: Message) -> ApiResult<Message> {
        self.tables
            .write()
            .await
            .messages
            .insert(message.id, message.clone());
        Ok(message)
    }

    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<Message>> {
        Ok(self.tables.read().await.messages.get(&id).cloned())
    }

    async fn find_conversation(&self, user_a: Uuid, user_b: Uuid) -> ApiResult<Vec<Message>> {
        let mut rows: Vec<Message> = self
            .tables
            .read()
            .await
            .messages
            .values()
            .filter(|m| {
                (m.sender_id == user_a && m.receiver_id == user_b)
                    || (m.sender_id == user_b && m.receiver_id == user_a)
            })
            .cloned()
            .collect();
        rows.sort_by_key(|m| m.created_at);
        Ok(rows)
    }

    async fn find_for_user(&self, user_id: Uuid) -> ApiResult<Vec<Message>> {
        let rows = self
            .tables
            .read()
            .await
            .messages
            .values()
            .filter(|m| m.sender_id == user_id || m.receiver_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |m: &Message| m.created_at))
    }

    async fn mark_read(&self, id: Uuid) -> ApiResult<()> {
        let mut tables = self.tables.write().await;
        let message = tables
            .messages
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("Message {} not found", id)))?;
        message.is_read = true;
        Ok(())
    }

    async fn count_unread(&self, receiver_id: Uuid) -> ApiResult<i64> {
        let count = self
            .tables
            .read()
            .await
            .messages
            .values()
            .filter(|m| m.receiver_id == receiver_id && !m.is_read)
            .count();
        Ok(count as i64)
    }
}
