//! Pure stat aggregation over bookings and their payments
//!
//! Amounts are paise. Percentages are basis points rounded half-up.

use serde::{Deserialize, Serialize};

use crate::booking::{BookingStatus, PaymentStatus};
use crate::review::ProviderRating;

/// Platform fee charged on top of the service price (10%)
pub const PLATFORM_FEE_BPS: i64 = 1_000;
/// Provider's share of the service price (90%)
pub const PROVIDER_SHARE_BPS: i64 = 9_000;

const BPS_DENOMINATOR: i64 = 10_000;

/// `amount * bps / 10000`, rounded half-up
pub fn apply_bps(amount: i64, bps: i64) -> i64 {
    let scaled = amount as i128 * bps as i128;
    let denom = BPS_DENOMINATOR as i128;
    let rounded = if scaled >= 0 {
        (scaled + denom / 2) / denom
    } else {
        (scaled - denom / 2) / denom
    };
    rounded as i64
}

/// What the aggregation needs to know about one booking
#[derive(Debug, Clone)]
pub struct BookingFacts {
    pub status: BookingStatus,
    /// Live price of the booked service, 0 when the service is gone
    pub service_price: i64,
    /// Status and amount of the booking's payment, if one exists
    pub payment: Option<(PaymentStatus, i64)>,
}

impl BookingFacts {
    fn paid_amount(&self) -> Option<i64> {
        match self.payment {
            Some((PaymentStatus::Completed, amount)) => Some(amount),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub total_bookings: i64,
    pub pending_bookings: i64,
    pub confirmed_bookings: i64,
    pub in_progress_bookings: i64,
    pub completed_bookings: i64,
    pub cancelled_bookings: i64,
}

impl StatusCounts {
    fn tally(facts: &[BookingFacts]) -> Self {
        let mut counts = StatusCounts {
            total_bookings: facts.len() as i64,
            ..Default::default()
        };
        for fact in facts {
            match fact.status {
                BookingStatus::Pending => counts.pending_bookings += 1,
                BookingStatus::Confirmed => counts.confirmed_bookings += 1,
                BookingStatus::InProgress => counts.in_progress_bookings += 1,
                BookingStatus::Completed => counts.completed_bookings += 1,
                BookingStatus::Cancelled => counts.cancelled_bookings += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumerStats {
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub total_spent: i64,
    pub pending_payments: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStats {
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub total_earnings: i64,
    pub pending_payments: i64,
    pub average_rating: f64,
    pub total_reviews: i64,
}

/// Role-specific stats returned by `GET /api/users/dashboard/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DashboardStats {
    Provider(ProviderStats),
    Consumer(ConsumerStats),
}

/// Paid bookings add the captured amount to `total_spent`. Unpaid bookings
/// that are CONFIRMED or COMPLETED add price plus platform fee to
/// `pending_payments`.
pub fn consumer_stats(facts: &[BookingFacts]) -> ConsumerStats {
    let mut total_spent = 0;
    let mut pending_payments = 0;

    for fact in facts {
        if let Some(amount) = fact.paid_amount() {
            total_spent += amount;
        } else if matches!(
            fact.status,
            BookingStatus::Completed | BookingStatus::Confirmed
        ) {
            pending_payments += fact.service_price + apply_bps(fact.service_price, PLATFORM_FEE_BPS);
        }
    }

    ConsumerStats {
        counts: StatusCounts::tally(facts),
        total_spent,
        pending_payments,
    }
}

/// Only COMPLETED bookings earn. The provider share lands in
/// `total_earnings` once paid, otherwise in `pending_payments`.
pub fn provider_stats(facts: &[BookingFacts], rating: &ProviderRating) -> ProviderStats {
    let mut total_earnings = 0;
    let mut pending_payments = 0;

    for fact in facts.iter().filter(|f| f.status == BookingStatus::Completed) {
        let share = apply_bps(fact.service_price, PROVIDER_SHARE_BPS);
        if fact.paid_amount().is_some() {
            total_earnings += share;
        } else {
            pending_payments += share;
        }
    }

    ProviderStats {
        counts: StatusCounts::tally(facts),
        total_earnings,
        pending_payments,
        average_rating: rating.average_rating,
        total_reviews: rating.total_reviews,
    }
}
