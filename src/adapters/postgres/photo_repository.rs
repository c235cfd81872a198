//! PostgreSQL implementation of the PhotoRepository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, PhotoId, Timestamp, UserId};
use crate::domain::user::ProgressPhoto;
use crate::ports::PhotoRepository;

/// Postgres-backed progress photo storage (inline data URLs).
pub struct PostgresPhotoRepository {
    pool: PgPool,
}

impl PostgresPhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PhotoRow {
    id: Uuid,
    user_id: Uuid,
    image_url: String,
    weight_kg: Option<f32>,
    created_at: DateTime<Utc>,
}

impl From<PhotoRow> for ProgressPhoto {
    fn from(row: PhotoRow) -> Self {
        ProgressPhoto {
            id: PhotoId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            image_url: row.image_url,
            weight_kg: row.weight_kg,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[async_trait]
impl PhotoRepository for PostgresPhotoRepository {
    async fn save(&self, photo: &ProgressPhoto) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO progress_photos (id, user_id, image_url, weight_kg, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(photo.id.as_uuid())
        .bind(photo.user_id.as_uuid())
        .bind(&photo.image_url)
        .bind(photo.weight_kg)
        .bind(photo.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;

        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<ProgressPhoto>, DomainError> {
        let rows: Vec<PhotoRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, image_url, weight_kg, created_at
            FROM progress_photos
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::database)?;

        Ok(rows.into_iter().map(ProgressPhoto::from).collect())
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM progress_photos WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(DomainError::database)?;

        Ok(())
    }
}
