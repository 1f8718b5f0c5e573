//! Message route definitions

use axum::{
    routing::{get, put},
    Router,
};

use crate::handlers::message::*;
use crate::state::AppState;

pub fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/api/messages", get(list_messages).post(send_message))
        .route("/api/messages/unread-count", get(unread_count))
        .route("/api/messages/conversation/:user_id", get(get_conversation))
        .route("/api/messages/:id/read", put(mark_read))
}
