//! sqlx/Postgres implementation of the repository traits

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
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

/// Postgres-backed store
#[derive(Clone)]
pub struct PgStore {
    db_pool: PgPool,
}

impl PgStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

fn missing(kind: &str, id: Uuid) -> ApiError {
    ApiError::NotFound(format!("{} {} not found", kind, id))
}

#[async_trait]
impl UserRepository for PgStore {
    async fn create(&self, user: User) -> ApiResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                id, name, email, phone, role, approved, address, city, state, zip_code,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(user.role)
        .bind(user.approved)
        .bind(&user.address)
        .bind(&user.city)
        .bind(&user.state)
        .bind(&user.zip_code)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(user)
    }

    async fn update(&self, user: &User) -> ApiResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2, phone = $3, approved = $4, address = $5, city = $6,
                state = $7, zip_code = $8, updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.phone)
        .bind(user.approved)
        .bind(&user.address)
        .bind(&user.city)
        .bind(&user.state)
        .bind(&user.zip_code)
        .bind(Utc::now())
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or_else(|| missing("User", user.id))
    }
}

#[async_trait]
impl ServiceRepository for PgStore {
    async fn create(&self, listing: ServiceListing) -> ApiResult<ServiceListing> {
        let listing = sqlx::query_as::<_, ServiceListing>(
            r#"
            INSERT INTO services (
                id, provider_id, name, category, description, price, price_type, images,
                service_area, latitude, longitude, service_radius, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(listing.id)
        .bind(listing.provider_id)
        .bind(&listing.name)
        .bind(listing.category)
        .bind(&listing.description)
        .bind(listing.price)
        .bind(listing.price_type)
        .bind(&listing.images)
        .bind(&listing.service_area)
        .bind(listing.latitude)
        .bind(listing.longitude)
        .bind(listing.service_radius)
        .bind(listing.created_at)
        .bind(listing.updated_at)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(listing)
    }

    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<ServiceListing>> {
        let listing = sqlx::query_as::<_, ServiceListing>("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(listing)
    }

    async fn find_all(&self) -> ApiResult<Vec<ServiceListing>> {
        let listings =
            sqlx::query_as::<_, ServiceListing>("SELECT * FROM services ORDER BY created_at DESC")
                .fetch_all(&self.db_pool)
                .await?;

        Ok(listings)
    }

    async fn find_by_provider(&self, provider_id: Uuid) -> ApiResult<Vec<ServiceListing>> {
        let listings = sqlx::query_as::<_, ServiceListing>(
            "SELECT * FROM services WHERE provider_id = $1 ORDER BY created_at DESC",
        )
        .bind(provider_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(listings)
    }

    async fn find_by_category(&self, category: ServiceCategory) -> ApiResult<Vec<ServiceListing>> {
        let listings = sqlx::query_as::<_, ServiceListing>(
            "SELECT * FROM services WHERE category = $1 ORDER BY created_at DESC",
        )
        .bind(category)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(listings)
    }

    async fn update(&self, listing: &ServiceListing) -> ApiResult<ServiceListing> {
        sqlx::query_as::<_, ServiceListing>(
            r#"
            UPDATE services
            SET name = $2, category = $3, description = $4, price = $5, price_type = $6,
                images = $7, service_area = $8, latitude = $9, longitude = $10,
                service_radius = $11, updated_at = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(listing.id)
        .bind(&listing.name)
        .bind(listing.category)
        .bind(&listing.description)
        .bind(listing.price)
        .bind(listing.price_type)
        .bind(&listing.images)
        .bind(&listing.service_area)
        .bind(listing.latitude)
        .bind(listing.longitude)
        .bind(listing.service_radius)
        .bind(Utc::now())
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or_else(|| missing("Service", listing.id))
    }

    async fn delete(&self, id: Uuid) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl BookingRepository for PgStore {
    async fn create(&self, booking: Booking) -> ApiResult<Booking> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                id, consumer_id, provider_id, service_id, status, payment_status,
                scheduled_date, scheduled_time, address, description, price,
                completed_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(booking.id)
        .bind(booking.consumer_id)
        .bind(booking.provider_id)
        .bind(booking.service_id)
        .bind(booking.status)
        .bind(booking.payment_status)
        .bind(booking.scheduled_date)
        .bind(&booking.scheduled_time)
        .bind(&booking.address)
        .bind(&booking.description)
        .bind(booking.price)
        .bind(booking.completed_at)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(booking)
    }

    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(booking)
    }

    async fn find_by_consumer(&self, consumer_id: Uuid) -> ApiResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE consumer_id = $1 ORDER BY created_at DESC",
        )
        .bind(consumer_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(bookings)
    }

    async fn find_by_provider(&self, provider_id: Uuid) -> ApiResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE provider_id = $1 ORDER BY created_at DESC",
        )
        .bind(provider_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(bookings)
    }

    async fn update(&self, booking: &Booking) -> ApiResult<Booking> {
        sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = $2, payment_status = $3, completed_at = $4, updated_at = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(booking.id)
        .bind(booking.status)
        .bind(booking.payment_status)
        .bind(booking.completed_at)
        .bind(Utc::now())
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or_else(|| missing("Booking", booking.id))
    }
}

#[async_trait]
impl PaymentRepository for PgStore {
    async fn create(&self, payment: Payment) -> ApiResult<Payment> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (
                id, booking_id, gateway_order_id, gateway_payment_id, gateway_signature,
                amount, currency, status, paid_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(payment.id)
        .bind(payment.booking_id)
        .bind(&payment.gateway_order_id)
        .bind(&payment.gateway_payment_id)
        .bind(&payment.gateway_signature)
        .bind(payment.amount)
        .bind(&payment.currency)
        .bind(payment.status)
        .bind(payment.paid_at)
        .bind(payment.created_at)
        .bind(payment.updated_at)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(payment)
    }

    async fn find_by_order_id(&self, order_id: &str) -> ApiResult<Option<Payment>> {
        let payment =
            sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE gateway_order_id = $1")
                .bind(order_id)
                .fetch_optional(&self.db_pool)
                .await?;

        Ok(payment)
    }

    async fn find_by_booking_id(&self, booking_id: Uuid) -> ApiResult<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE booking_id = $1")
            .bind(booking_id)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(payment)
    }

    async fn update(&self, payment: &Payment) -> ApiResult<Payment> {
        sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments
            SET gateway_order_id = $2, gateway_payment_id = $3, gateway_signature = $4,
                amount = $5, currency = $6, status = $7, paid_at = $8, updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(payment.id)
        .bind(&payment.gateway_order_id)
        .bind(&payment.gateway_payment_id)
        .bind(&payment.gateway_signature)
        .bind(payment.amount)
        .bind(&payment.currency)
        .bind(payment.status)
        .bind(payment.paid_at)
        .bind(Utc::now())
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or_else(|| missing("Payment", payment.id))
    }
}

#[async_trait]
impl ReviewRepository for PgStore {
    async fn create(&self, review: Review) -> ApiResult<Review> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (id, booking_id, consumer_id, provider_id, rating, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(review.id)
        .bind(review.booking_id)
        .bind(review.consumer_id)
        .bind(review.provider_id)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.created_at)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(review)
    }

    async fn find_by_booking_id(&self, booking_id: Uuid) -> ApiResult<Option<Review>> {
        let review = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE booking_id = $1")
            .bind(booking_id)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(review)
    }

    async fn find_by_provider(&self, provider_id: Uuid) -> ApiResult<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE provider_id = $1 ORDER BY created_at DESC",
        )
        .bind(provider_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(reviews)
    }
}

#[async_trait]
impl ReportRepository for PgStore {
    async fn create(&self, report: Report) -> ApiResult<Report> {
        let report = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (
                id, reporter_id, reported_user_id, booking_id, report_type, description,
                status, admin_notes, resolved_at, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(report.id)
        .bind(report.reporter_id)
        .bind(report.reported_user_id)
        .bind(report.booking_id)
        .bind(report.report_type)
        .bind(&report.description)
        .bind(report.status)
        .bind(&report.admin_notes)
        .bind(report.resolved_at)
        .bind(report.created_at)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(report)
    }

    async fn find_by_reporter_and_booking(
        &self,
        reporter_id: Uuid,
        booking_id: Uuid,
    ) -> ApiResult<Option<Report>> {
        let report = sqlx::query_as::<_, Report>(
            "SELECT * FROM reports WHERE reporter_id = $1 AND booking_id = $2",
        )
        .bind(reporter_id)
        .bind(booking_id)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(report)
    }

    async fn find_by_reporter(&self, reporter_id: Uuid) -> ApiResult<Vec<Report>> {
        let reports = sqlx::query_as::<_, Report>(
            "SELECT * FROM reports WHERE reporter_id = $1 ORDER BY created_at DESC",
        )
        .bind(reporter_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(reports)
    }
}

#[async_trait]
impl MessageRepository for PgStore {
    async fn create(&self, message: Message) -> ApiResult<Message> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (id, sender_id, receiver_id, content, is_read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(message.id)
        .bind(message.sender_id)
        .bind(message.receiver_id)
        .bind(&message.content)
        .bind(message.is_read)
        .bind(message.created_at)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(message)
    }

    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<Message>> {
        let message = sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(message)
    }

    async fn find_conversation(&self, user_a: Uuid, user_b: Uuid) -> ApiResult<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT * FROM messages
            WHERE (sender_id = $1 AND receiver_id = $2)
               OR (sender_id = $2 AND receiver_id = $1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_a)
        .bind(user_b)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(messages)
    }

    async fn find_for_user(&self, user_id: Uuid) -> ApiResult<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT * FROM messages
            WHERE sender_id = $1 OR receiver_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(messages)
    }

    async fn mark_read(&self, id: Uuid) -> ApiResult<()> {
        let result = sqlx::query("UPDATE messages SET is_read = true WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(missing("Message", id));
        }

        Ok(())
    }

    async fn count_unread(&self, receiver_id: Uuid) -> ApiResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages WHERE receiver_id = $1 AND is_read = false",
        )
        .bind(receiver_id)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(count)
    }
}
