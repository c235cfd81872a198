//! PostgreSQL implementation of the UsageStore port.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::usage::{DailyUsage, UsageDate};
use crate::ports::UsageStore;

/// Postgres-backed daily usage counters.
///
/// One row per (user_id, date), enforced by a unique index. Reads and writes
/// are separate statements; the entitlement gate accepts the resulting race.
pub struct PostgresUsageStore {
    pool: PgPool,
}

impl PostgresUsageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UsageRow {
    user_id: Uuid,
    date: NaiveDate,
    ai_chat_count: i32,
    recipe_generation_count: i32,
    image_analysis_count: i32,
}

impl From<UsageRow> for DailyUsage {
    fn from(row: UsageRow) -> Self {
        DailyUsage {
            user_id: UserId::from_uuid(row.user_id),
            date: UsageDate::from_naive(row.date),
            ai_chat_count: row.ai_chat_count.max(0) as u32,
            recipe_generation_count: row.recipe_generation_count.max(0) as u32,
            image_analysis_count: row.image_analysis_count.max(0) as u32,
        }
    }
}

#[async_trait]
impl UsageStore for PostgresUsageStore {
    async fn find(
        &self,
        user_id: &UserId,
        date: UsageDate,
    ) -> Result<Option<DailyUsage>, DomainError> {
        let row: Option<UsageRow> = sqlx::query_as(
            r#"
            SELECT user_id, date, ai_chat_count, recipe_generation_count, image_analysis_count
            FROM usage_limits
            WHERE user_id = $1 AND date = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(date.as_naive())
        .fetch_optional(&self.pool)
        .await
        .map_err(DomainError::database)?;

        Ok(row.map(DailyUsage::from))
    }

    async fn insert(&self, usage: &DailyUsage) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO usage_limits (
                id, user_id, date, ai_chat_count, recipe_generation_count, image_analysis_count
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(usage.user_id.as_uuid())
        .bind(usage.date.as_naive())
        .bind(usage.ai_chat_count as i32)
        .bind(usage.recipe_generation_count as i32)
        .bind(usage.image_analysis_count as i32)
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;

        Ok(())
    }

    async fn update(&self, usage: &DailyUsage) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE usage_limits SET
                ai_chat_count = $3,
                recipe_generation_count = $4,
                image_analysis_count = $5
            WHERE user_id = $1 AND date = $2
            "#,
        )
        .bind(usage.user_id.as_uuid())
        .bind(usage.date.as_naive())
        .bind(usage.ai_chat_count as i32)
        .bind(usage.recipe_generation_count as i32)
        .bind(usage.image_analysis_count as i32)
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;

        Ok(())
    }
}
