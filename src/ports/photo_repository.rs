//! Progress photo persistence port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::ProgressPhoto;

/// Port for progress photo storage.
#[async_trait]
pub trait PhotoRepository: Send + Sync {
    /// Stores an uploaded photo.
    async fn save(&self, photo: &ProgressPhoto) -> Result<(), DomainError>;

    /// Returns the user's photos, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<ProgressPhoto>, DomainError>;

    /// Hard-deletes all photos for a user (account deletion).
    async fn delete_all_for_user(&self, user_id: &UserId) -> Result<(), DomainError>;
}
