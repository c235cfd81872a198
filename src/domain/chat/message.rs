//! Coaching chat messages.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ChatMessageId, Timestamp, UserId};

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

impl std::str::FromStr for ChatRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(ChatRole::User),
            "assistant" => Ok(ChatRole::Assistant),
            other => Err(format!("unknown chat role: {}", other)),
        }
    }
}

/// One message in a user's coaching conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: ChatMessageId,
    pub user_id: UserId,
    pub role: ChatRole,
    pub message: String,
    pub created_at: Timestamp,
}

impl ChatMessage {
    /// Creates a message authored by the user.
    pub fn from_user(user_id: UserId, message: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id: ChatMessageId::new(),
            user_id,
            role: ChatRole::User,
            message: message.into(),
            created_at: now,
        }
    }

    /// Creates a message authored by the assistant.
    pub fn from_assistant(user_id: UserId, message: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id: ChatMessageId::new(),
            user_id,
            role: ChatRole::Assistant,
            message: message.into(),
            created_at: now,
        }
    }
}
