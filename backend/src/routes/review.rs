use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::review::{create_review, provider_rating, provider_reviews};
use crate::state::AppState;

pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/api/reviews", post(create_review))
        .route("/api/reviews/provider/:provider_id", get(provider_reviews))
        .route(
            "/api/reviews/provider/:provider_id/rating",
            get(provider_rating),
        )
}
