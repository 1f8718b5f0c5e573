use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::ApiResponse;
use crate::report::{CreateReportRequest, Report, ReportService};

pub async fn create_report(
    State(service): State<Arc<ReportService>>,
    user: AuthenticatedUser,
    Json(request): Json<CreateReportRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Report>>), ApiError> {
    let report = service.create_report(user.id(), request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(report))))
}

pub async fn my_reports(
    State(service): State<Arc<ReportService>>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<Report>>>, ApiError> {
    let reports = service.my_reports(user.id()).await?;
    Ok(Json(ApiResponse::ok(reports)))
}
