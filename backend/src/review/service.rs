use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::booking::{BookingParty, BookingStatus};
use crate::error::ApiError;
use crate::repository::{BookingRepository, ReviewRepository};
use crate::review::model::{CreateReviewRequest, ProviderRating, Review};

#[derive(Clone)]
pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl ReviewService {
    pub fn new(reviews: Arc<dyn ReviewRepository>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { reviews, bookings }
    }

    /// One review per completed booking, written by its consumer
    pub async fn create_review(
        &self,
        caller_id: Uuid,
        request: CreateReviewRequest,
    ) -> Result<Review, ApiError> {
        request.validate()?;

        let booking = self
            .bookings
            .find_by_id(request.booking_id)
            .await?
            .ok_or(ApiError::NotFound("Booking not found".to_string()))?;

        if booking.party_of(caller_id) != Some(BookingParty::Consumer) {
            return Err(ApiError::Forbidden(
                "You can only review your own bookings".to_string(),
            ));
        }
        if booking.status != BookingStatus::Completed {
            return Err(ApiError::InvalidState(
                "Only completed bookings can be reviewed".to_string(),
            ));
        }
        if self
            .reviews
            .find_by_booking_id(booking.id)
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict(
                "Review already exists for this booking".to_string(),
            ));
        }

        let review = self
            .reviews
            .create(Review {
                id: Uuid::new_v4(),
                booking_id: booking.id,
                consumer_id: caller_id,
                provider_id: booking.provider_id,
                rating: request.rating,
                comment: request.comment,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(
            booking_id = %review.booking_id,
            provider_id = %review.provider_id,
            rating = review.rating,
            "Review created"
        );

        Ok(review)
    }

    pub async fn provider_reviews(&self, provider_id: Uuid) -> Result<Vec<Review>, ApiError> {
        self.reviews.find_by_provider(provider_id).await
    }

    pub async fn provider_rating(&self, provider_id: Uuid) -> Result<ProviderRating, ApiError> {
        let reviews = self.reviews.find_by_provider(provider_id).await?;
        Ok(ProviderRating::from_reviews(&reviews))
    }
}
