use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

/// Review of a completed booking
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub consumer_id: Uuid,
    pub provider_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub booking_id: Uuid,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[validate(length(max = 1000))]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRating {
    pub average_rating: f64,
    pub total_reviews: i64,
}

impl ProviderRating {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        if reviews.is_empty() {
            return Self {
                average_rating: 0.0,
                total_reviews: 0,
            };
        }
        let sum: i64 = reviews.iter().map(|r| r.rating as i64).sum();
        Self {
            average_rating: sum as f64 / reviews.len() as f64,
            total_reviews: reviews.len() as i64,
        }
    }
}
