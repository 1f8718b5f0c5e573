//! User-related API handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use super::AuthenticatedUser;
use crate::dashboard::{DashboardService, DashboardStats};
use crate::error::ApiError;
use crate::models::{ApiResponse, UpdateProfileRequest, User};
use crate::users::UserService;

/// GET /api/users/me
pub async fn get_me(
    State(service): State<Arc<UserService>>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = service.get_user(user.id()).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /api/users/me
pub async fn update_me(
    State(service): State<Arc<UserService>>,
    user: AuthenticatedUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = service.update_profile(user.id(), request).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// GET /api/users/dashboard/stats - consumer or provider view by role
pub async fn get_dashboard_stats(
    State(service): State<Arc<DashboardService>>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    let stats = service.stats_for(&user).await?;
    Ok(Json(ApiResponse::ok(stats)))
}
