//! Service catalog handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use super::{AuthenticatedUser, ProviderUser};
use crate::catalog::{CatalogService, NearbyQuery, ServiceCategory, ServiceRequest, ServiceResponse};
use crate::error::ApiError;
use crate::models::{ApiResponse, MessageResponse};

pub async fn create_service(
    State(service): State<Arc<CatalogService>>,
    ProviderUser(provider): ProviderUser,
    Json(request): Json<ServiceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceResponse>>), ApiError> {
    let listing = service.create_service(&provider, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(listing))))
}

pub async fn list_services(
    State(service): State<Arc<CatalogService>>,
) -> Result<Json<ApiResponse<Vec<ServiceResponse>>>, ApiError> {
    let listings = service.list_services().await?;
    Ok(Json(ApiResponse::ok(listings)))
}

pub async fn get_service(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ServiceResponse>>, ApiError> {
    let listing = service.get_service(id).await?;
    Ok(Json(ApiResponse::ok(listing)))
}

pub async fn list_provider_services(
    State(service): State<Arc<CatalogService>>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ServiceResponse>>>, ApiError> {
    let listings = service.list_by_provider(provider_id).await?;
    Ok(Json(ApiResponse::ok(listings)))
}

pub async fn list_category_services(
    State(service): State<Arc<CatalogService>>,
    Path(category): Path<ServiceCategory>,
) -> Result<Json<ApiResponse<Vec<ServiceResponse>>>, ApiError> {
    let listings = service.list_by_category(category).await?;
    Ok(Json(ApiResponse::ok(listings)))
}

pub async fn search_nearby(
    State(service): State<Arc<CatalogService>>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<ApiResponse<Vec<ServiceResponse>>>, ApiError> {
    let listings = service.search_nearby(query).await?;
    Ok(Json(ApiResponse::ok(listings)))
}

pub async fn update_service(
    State(service): State<Arc<CatalogService>>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<ServiceRequest>,
) -> Result<Json<ApiResponse<ServiceResponse>>, ApiError> {
    let listing = service.update_service(&caller, id, request).await?;
    Ok(Json(ApiResponse::ok(listing)))
}

pub async fn delete_service(
    State(service): State<Arc<CatalogService>>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    service.delete_service(user.id(), id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Service deleted".to_string(),
    })))
}
