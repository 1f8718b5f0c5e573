use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::report::{create_report, my_reports};
use crate::state::AppState;

pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/api/reports", post(create_report))
        .route("/api/reports/my-reports", get(my_reports))
}
