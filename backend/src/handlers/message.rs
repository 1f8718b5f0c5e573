//! Direct message handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use super::AuthenticatedUser;
use crate::error::ApiError;
use crate::message::{MessageService, MessageView, SendMessageRequest, UnreadCount};
use crate::models::{ApiResponse, MessageResponse};

pub async fn send_message(
    State(service): State<Arc<MessageService>>,
    user: AuthenticatedUser,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MessageView>>), ApiError> {
    let message = service.send_message(user.id(), request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(message))))
}

pub async fn list_messages(
    State(service): State<Arc<MessageService>>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<MessageView>>>, ApiError> {
    let messages = service.user_messages(user.id()).await?;
    Ok(Json(ApiResponse::ok(messages)))
}

pub async fn get_conversation(
    State(service): State<Arc<MessageService>>,
    user: AuthenticatedUser,
    Path(other_user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<MessageView>>>, ApiError> {
    let messages = service.conversation(user.id(), other_user_id).await?;
    Ok(Json(ApiResponse::ok(messages)))
}

pub async fn mark_read(
    State(service): State<Arc<MessageService>>,
    user: AuthenticatedUser,
    Path(message_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    service.mark_read(user.id(), message_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Message marked as read".to_string(),
    })))
}

pub async fn unread_count(
    State(service): State<Arc<MessageService>>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<UnreadCount>>, ApiError> {
    let unread_count = service.unread_count(user.id()).await?;
    Ok(Json(ApiResponse::ok(UnreadCount { unread_count })))
}
