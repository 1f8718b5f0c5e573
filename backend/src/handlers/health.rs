use axum::{extract::State, Json};
use serde::Serialize;

use crate::db;
use crate::state::AppState;

pub async fn root() -> &'static str {
    "ServiceHub API Server"
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    database: String,
    version: String,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_status = match &state.db_pool {
        Some(pool) => match db::ping(pool).await {
            Ok(()) => "connected".to_string(),
            Err(e) => format!("error: {}", e),
        },
        None => "in-memory".to_string(),
    };

    let status = if db_status.starts_with("error") {
        "unhealthy"
    } else {
        "healthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        database: db_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
