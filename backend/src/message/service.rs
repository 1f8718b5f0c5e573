use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::message::model::{Message, MessageView, SendMessageRequest};
use crate::repository::{MessageRepository, UserRepository};

/// Placeholder for users that no longer resolve
const UNKNOWN_USER: &str = "Unknown user";

#[derive(Clone)]
pub struct MessageService {
    messages: Arc<dyn MessageRepository>,
    users: Arc<dyn UserRepository>,
}

impl MessageService {
    pub fn new(messages: Arc<dyn MessageRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { messages, users }
    }

    pub async fn send_message(
        &self,
        sender_id: Uuid,
        request: SendMessageRequest,
    ) -> Result<MessageView, ApiError> {
        request.validate()?;

        self.users
            .find_by_id(request.receiver_id)
            .await?
            .ok_or(ApiError::NotFound("Receiver not found".to_string()))?;

        let message = self
            .messages
            .create(Message {
                id: Uuid::new_v4(),
                sender_id,
                receiver_id: request.receiver_id,
                content: request.content,
                is_read: false,
                created_at: Utc::now(),
            })
            .await?;

        tracing::debug!(
            message_id = %message.id,
            sender_id = %sender_id,
            receiver_id = %message.receiver_id,
            "Message sent"
        );

        let mut views = self.with_names(vec![message]).await?;
        views
            .pop()
            .ok_or_else(|| ApiError::InternalError("message view missing".to_string()))
    }

    pub async fn conversation(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
    ) -> Result<Vec<MessageView>, ApiError> {
        let messages = self.messages.find_conversation(user_id, other_user_id).await?;
        self.with_names(messages).await
    }

    pub async fn user_messages(&self, user_id: Uuid) -> Result<Vec<MessageView>, ApiError> {
        let messages = self.messages.find_for_user(user_id).await?;
        self.with_names(messages).await
    }

    /// Only the receiver may mark a message read
    pub async fn mark_read(&self, caller_id: Uuid, message_id: Uuid) -> Result<(), ApiError> {
        let message = self
            .messages
            .find_by_id(message_id)
            .await?
            .ok_or(ApiError::NotFound("Message not found".to_string()))?;

        if message.receiver_id != caller_id {
            return Err(ApiError::Forbidden(
                "Only the receiver can mark a message as read".to_string(),
            ));
        }

        if !message.is_read {
            self.messages.mark_read(message_id).await?;
        }
        Ok(())
    }

    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64, ApiError> {
        self.messages.count_unread(user_id).await
    }

    async fn with_names(&self, messages: Vec<Message>) -> Result<Vec<MessageView>, ApiError> {
        let mut names: HashMap<Uuid, String> = HashMap::new();
        let mut views = Vec::with_capacity(messages.len());

        for message in messages {
            for id in [message.sender_id, message.receiver_id] {
                if !names.contains_key(&id) {
                    let name = self
                        .users
                        .find_by_id(id)
                        .await?
                        .map(|u| u.name)
                        .unwrap_or_else(|| UNKNOWN_USER.to_string());
                    names.insert(id, name);
                }
            }

            let sender_name = names.get(&message.sender_id).cloned().unwrap_or_default();
            let receiver_name = names.get(&message.receiver_id).cloned().unwrap_or_default();
            views.push(MessageView {
                message,
                sender_name,
                receiver_name,
            });
        }

        Ok(views)
    }
}
