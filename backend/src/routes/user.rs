//! User route definitions

use axum::{routing::get, Router};

use crate::handlers::user::{get_dashboard_stats, get_me, update_me};
use crate::state::AppState;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users/me", get(get_me).put(update_me))
        .route("/api/users/dashboard/stats", get(get_dashboard_stats))
}
