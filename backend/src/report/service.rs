use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::report::model::{CreateReportRequest, Report, ReportStatus};
use crate::repository::{BookingRepository, ReportRepository};

#[derive(Clone)]
pub struct ReportService {
    reports: Arc<dyn ReportRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl ReportService {
    pub fn new(reports: Arc<dyn ReportRepository>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { reports, bookings }
    }

    pub async fn create_report(
        &self,
        reporter_id: Uuid,
        request: CreateReportRequest,
    ) -> Result<Report, ApiError> {
        request.validate()?;

        if let Some(booking_id) = request.booking_id {
            self.bookings
                .find_by_id(booking_id)
                .await?
                .ok_or(ApiError::NotFound("Booking not found".to_string()))?;

            if self
                .reports
                .find_by_reporter_and_booking(reporter_id, booking_id)
                .await?
                .is_some()
            {
                return Err(ApiError::Conflict(
                    "Report already submitted for this booking".to_string(),
                ));
            }
        }

        let report = self
            .reports
            .create(Report {
                id: Uuid::new_v4(),
                reporter_id,
                reported_user_id: request.reported_user_id,
                booking_id: request.booking_id,
                report_type: request.report_type,
                description: request.description,
                status: ReportStatus::Pending,
                admin_notes: None,
                resolved_at: None,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(
            report_id = %report.id,
            reported_user_id = %report.reported_user_id,
            report_type = ?report.report_type,
            "Report filed"
        );

        Ok(report)
    }

    pub async fn my_reports(&self, reporter_id: Uuid) -> Result<Vec<Report>, ApiError> {
        self.reports.find_by_reporter(reporter_id).await
    }
}
