use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::booking::Booking;
use crate::dashboard::stats::{
    consumer_stats, provider_stats, BookingFacts, ConsumerStats, DashboardStats, ProviderStats,
};
use crate::error::ApiError;
use crate::models::{User, UserRole};
use crate::repository::{
    BookingRepository, PaymentRepository, ReviewRepository, ServiceRepository,
};
use crate::review::ProviderRating;

/// Read-only aggregation over bookings, payments and reviews
#[derive(Clone)]
pub struct DashboardService {
    bookings: Arc<dyn BookingRepository>,
    payments: Arc<dyn PaymentRepository>,
    services: Arc<dyn ServiceRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl DashboardService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        payments: Arc<dyn PaymentRepository>,
        services: Arc<dyn ServiceRepository>,
        reviews: Arc<dyn ReviewRepository>,
    ) -> Self {
        Self {
            bookings,
            payments,
            services,
            reviews,
        }
    }

    pub async fn stats_for(&self, user: &User) -> Result<DashboardStats, ApiError> {
        match user.role {
            UserRole::Consumer => Ok(DashboardStats::Consumer(
                self.consumer_stats(user.id).await?,
            )),
            UserRole::Provider => Ok(DashboardStats::Provider(
                self.provider_stats(user.id).await?,
            )),
        }
    }

    pub async fn consumer_stats(&self, consumer_id: Uuid) -> Result<ConsumerStats, ApiError> {
        let bookings = self.bookings.find_by_consumer(consumer_id).await?;
        let facts = self.collect_facts(&bookings).await?;
        Ok(consumer_stats(&facts))
    }

    pub async fn provider_stats(&self, provider_id: Uuid) -> Result<ProviderStats, ApiError> {
        let bookings = self.bookings.find_by_provider(provider_id).await?;
        let facts = self.collect_facts(&bookings).await?;
        let reviews = self.reviews.find_by_provider(provider_id).await?;
        Ok(provider_stats(&facts, &ProviderRating::from_reviews(&reviews)))
    }

    async fn collect_facts(&self, bookings: &[Booking]) -> Result<Vec<BookingFacts>, ApiError> {
        let mut prices: HashMap<Uuid, i64> = HashMap::new();
        let mut facts = Vec::with_capacity(bookings.len());

        for booking in bookings {
            let service_price = match prices.get(&booking.service_id) {
                Some(price) => *price,
                None => {
                    let price = self
                        .services
                        .find_by_id(booking.service_id)
                        .await?
                        .map(|s| s.price)
                        .unwrap_or(0);
                    prices.insert(booking.service_id, price);
                    price
                }
            };

            let payment = self
                .payments
                .find_by_booking_id(booking.id)
                .await?
                .map(|p| (p.status, p.amount));

            facts.push(BookingFacts {
                status: booking.status,
                service_price,
                payment,
            });
        }

        Ok(facts)
    }
}
