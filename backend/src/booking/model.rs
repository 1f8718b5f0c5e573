//! Booking models and status rules

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

/// Booking model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub consumer_id: Uuid,
    pub provider_id: Uuid,
    pub service_id: Uuid,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: String,
    pub address: String,
    pub description: Option<String>,
    pub price: i64, // Service price in paise at booking time
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Which side of the booking the given user is on, if any
    pub fn party_of(&self, user_id: Uuid) -> Option<BookingParty> {
        if user_id == self.provider_id {
            Some(BookingParty::Provider)
        } else if user_id == self.consumer_id {
            Some(BookingParty::Consumer)
        } else {
            None
        }
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, Hash)]
#[sqlx(type_name = "booking_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    pub fn is_cancellable(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    /// Parties allowed to move a booking from `self` to `next`.
    /// `None` means the transition does not exist.
    pub fn transition_actors(&self, next: BookingStatus) -> Option<&'static [BookingParty]> {
        use BookingStatus::*;

        match (self, next) {
            (Pending, Confirmed) => Some(PROVIDER_ONLY),
            (Confirmed, InProgress) => Some(PROVIDER_ONLY),
            (Confirmed | InProgress, Completed) => Some(PROVIDER_ONLY),
            (Pending | Confirmed, Cancelled) => Some(EITHER_PARTY),
            _ => None,
        }
    }
}

const PROVIDER_ONLY: &[BookingParty] = &[BookingParty::Provider];
const EITHER_PARTY: &[BookingParty] = &[BookingParty::Provider, BookingParty::Consumer];

/// Side of a booking a caller acts for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingParty {
    Consumer,
    Provider,
}

/// Settlement state of a booking, mirrored from the payment flow
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, Hash)]
#[sqlx(type_name = "payment_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    #[serde(alias = "PAID")]
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    /// Forward-only settlement rule. Re-applying the current value is allowed.
    pub fn can_become(&self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;

        *self == next
            || matches!(
                (self, next),
                (Pending, Completed)
                    | (Pending, Failed)
                    | (Failed, Pending)
                    | (Failed, Completed)
                    | (Completed, Refunded)
            )
    }
}

/// Request DTO for creating a booking
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub provider_id: Uuid,
    pub service_id: Uuid,
    pub scheduled_date: NaiveDate,
    #[validate(length(min = 1, max = 20))]
    pub scheduled_time: String,
    #[validate(length(min = 1, max = 500))]
    pub address: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// Query for `PUT /api/bookings/:id/status`
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: BookingStatus,
}

/// Query for `PUT /api/bookings/:id/payment-status`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusQuery {
    pub payment_status: PaymentStatus,
}
