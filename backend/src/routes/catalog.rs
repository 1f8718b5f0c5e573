//! Service catalog route definitions

use axum::{routing::get, Router};

use crate::handlers::catalog::*;
use crate::state::AppState;

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/api/services", get(list_services).post(create_service))
        .route("/api/services/search/nearby", get(search_nearby))
        .route(
            "/api/services/provider/:provider_id",
            get(list_provider_services),
        )
        .route(
            "/api/services/category/:category",
            get(list_category_services),
        )
        .route(
            "/api/services/:id",
            get(get_service).put(update_service).delete(delete_service),
        )
}
