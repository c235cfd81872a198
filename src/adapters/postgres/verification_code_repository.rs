//! PostgreSQL implementation of the VerificationCodeRepository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, Timestamp, VerificationCodeId};
use crate::domain::verification::{CodePurpose, CodeRecipient, VerificationCode};
use crate::ports::VerificationCodeRepository;

/// Postgres-backed one-time code storage.
///
/// The recipient is stored across two nullable columns (phone, email) with
/// an explicit purpose discriminator, so a password-reset code can never
/// satisfy an email-verification lookup.
pub struct PostgresVerificationCodeRepository {
    pool: PgPool,
}

impl PostgresVerificationCodeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CodeRow {
    id: Uuid,
    phone: Option<String>,
    email: Option<String>,
    purpose: String,
    code_hash: String,
    expires_at: DateTime<Utc>,
    attempts: i32,
    verified: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<CodeRow> for VerificationCode {
    type Error = DomainError;

    fn try_from(row: CodeRow) -> Result<Self, Self::Error> {
        let recipient = match (row.phone, row.email) {
            (Some(phone), _) => CodeRecipient::Phone(phone),
            (None, Some(email)) => CodeRecipient::Email(email),
            (None, None) => {
                return Err(DomainError::database("verification code row has no recipient"))
            }
        };
        let purpose: CodePurpose = row
            .purpose
            .parse()
            .map_err(DomainError::database)?;

        Ok(VerificationCode {
            id: VerificationCodeId::from_uuid(row.id),
            recipient,
            purpose,
            code_hash: row.code_hash,
            expires_at: Timestamp::from_datetime(row.expires_at),
            attempts: row.attempts.max(0) as u32,
            verified: row.verified,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn recipient_columns(recipient: &CodeRecipient) -> (Option<&str>, Option<&str>) {
    match recipient {
        CodeRecipient::Phone(phone) => (Some(phone.as_str()), None),
        CodeRecipient::Email(email) => (None, Some(email.as_str())),
    }
}

#[async_trait]
impl VerificationCodeRepository for PostgresVerificationCodeRepository {
    async fn save(&self, code: &VerificationCode) -> Result<(), DomainError> {
        let (phone, email) = recipient_columns(&code.recipient);

        sqlx::query(
            r#"
            INSERT INTO verification_codes (
                id, phone, email, purpose, code_hash, expires_at, attempts, verified, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(code.id.as_uuid())
        .bind(phone)
        .bind(email)
        .bind(code.purpose.as_str())
        .bind(&code.code_hash)
        .bind(code.expires_at.as_datetime())
        .bind(code.attempts as i32)
        .bind(code.verified)
        .bind(code.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;

        Ok(())
    }

    async fn update(&self, code: &VerificationCode) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE verification_codes SET attempts = $2, verified = $3 WHERE id = $1
            "#,
        )
        .bind(code.id.as_uuid())
        .bind(code.attempts as i32)
        .bind(code.verified)
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;

        Ok(())
    }

    async fn find_latest_pending(
        &self,
        recipient: &CodeRecipient,
        purpose: CodePurpose,
        now: Timestamp,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let (phone, email) = recipient_columns(recipient);

        let row: Option<CodeRow> = sqlx::query_as(
            r#"
            SELECT id, phone, email, purpose, code_hash, expires_at, attempts, verified, created_at
            FROM verification_codes
            WHERE phone IS NOT DISTINCT FROM $1
              AND email IS NOT DISTINCT FROM $2
              AND purpose = $3
              AND verified = FALSE
              AND expires_at > $4
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(phone)
        .bind(email)
        .bind(purpose.as_str())
        .bind(now.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(DomainError::database)?;

        row.map(VerificationCode::try_from).transpose()
    }

    async fn count_issued_since(
        &self,
        recipient: &CodeRecipient,
        since: Timestamp,
    ) -> Result<u32, DomainError> {
        let (phone, email) = recipient_columns(recipient);

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM verification_codes
            WHERE phone IS NOT DISTINCT FROM $1
              AND email IS NOT DISTINCT FROM $2
              AND created_at >= $3
            "#,
        )
        .bind(phone)
        .bind(email)
        .bind(since.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(DomainError::database)?;

        Ok(count.max(0) as u32)
    }
}
