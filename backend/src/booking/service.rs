use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::booking::model::{
    Booking, BookingParty, BookingStatus, CreateBookingRequest, PaymentStatus,
};
use crate::error::ApiError;
use crate::models::{User, UserRole};
use crate::repository::{BookingRepository, ServiceRepository, UserRepository};

/// Booking lifecycle: creation, role-gated status transitions, cancellation
#[derive(Clone)]
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    services: Arc<dyn ServiceRepository>,
    users: Arc<dyn UserRepository>,
}

impl BookingService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        services: Arc<dyn ServiceRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            bookings,
            services,
            users,
        }
    }

    pub async fn create_booking(
        &self,
        consumer: &User,
        request: CreateBookingRequest,
    ) -> Result<Booking, ApiError> {
        if consumer.role != UserRole::Consumer {
            return Err(ApiError::Forbidden(
                "Only consumers can create bookings".to_string(),
            ));
        }
        request.validate()?;

        self.users
            .find_by_id(consumer.id)
            .await?
            .ok_or(ApiError::NotFound("Consumer not found".to_string()))?;

        let provider = self
            .users
            .find_by_id(request.provider_id)
            .await?
            .ok_or(ApiError::NotFound("Provider not found".to_string()))?;
        if !provider.is_provider() {
            return Err(ApiError::ValidationError(format!(
                "User {} is not a provider",
                provider.id
            )));
        }

        let service = self
            .services
            .find_by_id(request.service_id)
            .await?
            .ok_or(ApiError::NotFound("Service not found".to_string()))?;
        if service.provider_id != provider.id {
            return Err(ApiError::ValidationError(
                "Service is not offered by this provider".to_string(),
            ));
        }

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            consumer_id: consumer.id,
            provider_id: provider.id,
            service_id: service.id,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            scheduled_date: request.scheduled_date,
            scheduled_time: request.scheduled_time,
            address: request.address,
            description: request.description,
            price: service.price,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };
        let booking = self.bookings.create(booking).await?;

        tracing::info!(
            booking_id = %booking.id,
            consumer_id = %booking.consumer_id,
            provider_id = %booking.provider_id,
            price = booking.price,
            "Booking created"
        );

        Ok(booking)
    }

    pub async fn list_for_consumer(&self, consumer_id: Uuid) -> Result<Vec<Booking>, ApiError> {
        self.bookings.find_by_consumer(consumer_id).await
    }

    pub async fn list_for_provider(&self, provider_id: Uuid) -> Result<Vec<Booking>, ApiError> {
        self.bookings.find_by_provider(provider_id).await
    }

    /// Bookings on the caller's side of the marketplace
    pub async fn list_for_user(&self, user: &User) -> Result<Vec<Booking>, ApiError> {
        match user.role {
            UserRole::Consumer => self.list_for_consumer(user.id).await,
            UserRole::Provider => self.list_for_provider(user.id).await,
        }
    }

    pub async fn get_booking(&self, caller_id: Uuid, id: Uuid) -> Result<Booking, ApiError> {
        let booking = self.find(id).await?;
        if booking.party_of(caller_id).is_none() {
            return Err(ApiError::Forbidden(
                "Not a participant in this booking".to_string(),
            ));
        }
        Ok(booking)
    }

    /// Move a booking to `next`, checking both the transition table and
    /// which party is allowed to perform it.
    pub async fn transition_status(
        &self,
        caller_id: Uuid,
        id: Uuid,
        next: BookingStatus,
    ) -> Result<Booking, ApiError> {
        let mut booking = self.find(id).await?;

        let party = booking.party_of(caller_id).ok_or_else(|| {
            ApiError::Forbidden("Not a participant in this booking".to_string())
        })?;

        let actors = booking.status.transition_actors(next).ok_or_else(|| {
            ApiError::InvalidState(format!(
                "Cannot move booking from {:?} to {:?}",
                booking.status, next
            ))
        })?;

        if !actors.contains(&party) {
            return Err(ApiError::Forbidden(format!(
                "{:?} cannot move booking to {:?}",
                party, next
            )));
        }

        let previous = booking.status;
        booking.status = next;
        if next == BookingStatus::Completed {
            booking.completed_at = Some(Utc::now());
        }
        let booking = self.bookings.update(&booking).await?;

        tracing::info!(
            booking_id = %id,
            from = ?previous,
            to = ?next,
            actor = ?party,
            "Booking status changed"
        );

        Ok(booking)
    }

    /// Consumer cancellation. State is checked before the caller.
    pub async fn cancel_booking(&self, caller_id: Uuid, id: Uuid) -> Result<Booking, ApiError> {
        let mut booking = self.find(id).await?;

        if !booking.status.is_cancellable() {
            return Err(ApiError::InvalidState(format!(
                "Booking in status {:?} cannot be cancelled",
                booking.status
            )));
        }
        if booking.party_of(caller_id) != Some(BookingParty::Consumer) {
            return Err(ApiError::Forbidden(
                "Only the consumer can cancel this booking".to_string(),
            ));
        }

        booking.status = BookingStatus::Cancelled;
        let booking = self.bookings.update(&booking).await?;

        tracing::info!(booking_id = %id, "Booking cancelled by consumer");
        Ok(booking)
    }

    pub async fn update_payment_status(
        &self,
        caller_id: Uuid,
        id: Uuid,
        next: PaymentStatus,
    ) -> Result<Booking, ApiError> {
        let mut booking = self.find(id).await?;

        if booking.party_of(caller_id).is_none() {
            return Err(ApiError::Forbidden(
                "Not a participant in this booking".to_string(),
            ));
        }
        if !booking.payment_status.can_become(next) {
            return Err(ApiError::InvalidState(format!(
                "Payment status cannot move from {:?} to {:?}",
                booking.payment_status, next
            )));
        }
        if booking.payment_status == next {
            return Ok(booking);
        }

        let previous = booking.payment_status;
        booking.payment_status = next;
        let booking = self.bookings.update(&booking).await?;

        tracing::info!(
            booking_id = %id,
            from = ?previous,
            to = ?next,
            "Booking payment status changed"
        );

        Ok(booking)
    }

    async fn find(&self, id: Uuid) -> Result<Booking, ApiError> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("Booking not found".to_string()))
    }
}
