//! Chat message persistence port.

use async_trait::async_trait;

use crate::domain::chat::ChatMessage;
use crate::domain::foundation::{DomainError, UserId};

/// Port for coaching chat message storage.
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Appends a message.
    async fn save(&self, message: &ChatMessage) -> Result<(), DomainError>;

    /// Returns the user's full history, oldest first.
    async fn history(&self, user_id: &UserId) -> Result<Vec<ChatMessage>, DomainError>;

    /// Returns the most recent `limit` messages, oldest first, for use as
    /// model context.
    async fn recent(&self, user_id: &UserId, limit: u32) -> Result<Vec<ChatMessage>, DomainError>;

    /// Hard-deletes all messages for a user (account deletion).
    async fn delete_all_for_user(&self, user_id: &UserId) -> Result<(), DomainError>;
}
