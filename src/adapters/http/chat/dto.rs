//! Request/response DTOs for the chat endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::chat::{ChatMessage, ChatRole};

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub role: ChatRole,
    pub message: String,
    pub created_at: String,
}

impl From<ChatMessage> for MessageResponse {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id.to_string(),
            role: message.role,
            message: message.message,
            created_at: message.created_at.as_datetime().to_rfc3339(),
        }
    }
}
