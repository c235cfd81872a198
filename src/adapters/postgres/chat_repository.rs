//! PostgreSQL implementation of the ChatRepository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::chat::{ChatMessage, ChatRole};
use crate::domain::foundation::{ChatMessageId, DomainError, Timestamp, UserId};
use crate::ports::ChatRepository;

/// Postgres-backed chat message storage.
pub struct PostgresChatRepository {
    pool: PgPool,
}

impl PostgresChatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: Uuid,
    user_id: Uuid,
    role: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for ChatMessage {
    type Error = DomainError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let role: ChatRole = row.role.parse().map_err(DomainError::database)?;
        Ok(ChatMessage {
            id: ChatMessageId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            role,
            message: row.message,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl ChatRepository for PostgresChatRepository {
    async fn save(&self, message: &ChatMessage) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO chat_messages (id, user_id, role, message, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(message.id.as_uuid())
        .bind(message.user_id.as_uuid())
        .bind(message.role.as_str())
        .bind(&message.message)
        .bind(message.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;

        Ok(())
    }

    async fn history(&self, user_id: &UserId) -> Result<Vec<ChatMessage>, DomainError> {
        let rows: Vec<MessageRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, role, message, created_at
            FROM chat_messages
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::database)?;

        rows.into_iter().map(ChatMessage::try_from).collect()
    }

    async fn recent(&self, user_id: &UserId, limit: u32) -> Result<Vec<ChatMessage>, DomainError> {
        // newest N fetched descending, then reversed into chronological order
        let rows: Vec<MessageRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, role, message, created_at
            FROM chat_messages
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::database)?;

        let mut messages: Vec<ChatMessage> = rows
            .into_iter()
            .map(ChatMessage::try_from)
            .collect::<Result<_, _>>()?;
        messages.reverse();
        Ok(messages)
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM chat_messages WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(DomainError::database)?;

        Ok(())
    }
}
