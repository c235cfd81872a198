//! Verification code persistence port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::verification::{CodePurpose, CodeRecipient, VerificationCode};

/// Port for one-time verification code storage.
#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Stores a newly issued code.
    async fn save(&self, code: &VerificationCode) -> Result<(), DomainError>;

    /// Persists attempt count / verified flag changes.
    async fn update(&self, code: &VerificationCode) -> Result<(), DomainError>;

    /// Returns the most recently issued unverified, unexpired code for the
    /// (recipient, purpose) pair. Older codes are shadowed, not deleted.
    async fn find_latest_pending(
        &self,
        recipient: &CodeRecipient,
        purpose: CodePurpose,
        now: Timestamp,
    ) -> Result<Option<VerificationCode>, DomainError>;

    /// Counts codes issued to the recipient since the given instant,
    /// regardless of purpose. Used for the per-hour issuance cap.
    async fn count_issued_since(
        &self,
        recipient: &CodeRecipient,
        since: Timestamp,
    ) -> Result<u32, DomainError>;
}
