use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use super::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::ApiResponse;
use crate::review::{CreateReviewRequest, ProviderRating, Review, ReviewService};

pub async fn create_review(
    State(service): State<Arc<ReviewService>>,
    user: AuthenticatedUser,
    Json(request): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Review>>), ApiError> {
    let review = service.create_review(user.id(), request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(review))))
}

pub async fn provider_reviews(
    State(service): State<Arc<ReviewService>>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Review>>>, ApiError> {
    let reviews = service.provider_reviews(provider_id).await?;
    Ok(Json(ApiResponse::ok(reviews)))
}

pub async fn provider_rating(
    State(service): State<Arc<ReviewService>>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProviderRating>>, ApiError> {
    let rating = service.provider_rating(provider_id).await?;
    Ok(Json(ApiResponse::ok(rating)))
}
