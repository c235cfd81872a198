//! GetHistoryHandler - reads the full conversation, oldest first.

use std::sync::Arc;

use crate::domain::chat::ChatMessage;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::ChatRepository;

/// Query for a user's chat history.
#[derive(Debug, Clone)]
pub struct GetHistoryQuery {
    pub user_id: UserId,
}

/// Handler for history reads.
pub struct GetHistoryHandler {
    chats: Arc<dyn ChatRepository>,
}

impl GetHistoryHandler {
    pub fn new(chats: Arc<dyn ChatRepository>) -> Self {
        Self { chats }
    }

    pub async fn handle(&self, query: GetHistoryQuery) -> Result<Vec<ChatMessage>, DomainError> {
        self.chats.history(&query.user_id).await
    }
}
