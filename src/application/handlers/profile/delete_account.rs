//! DeleteAccountHandler - soft-deletes the account and purges sensitive
//! data.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::{ChatRepository, PhotoRepository, UserRepository};

/// Command to delete an account.
#[derive(Debug, Clone)]
pub struct DeleteAccountCommand {
    pub user_id: UserId,
}

/// Handler for account deletion.
///
/// The user row is anonymized in place; chat messages and progress photos
/// are hard-deleted.
pub struct DeleteAccountHandler {
    users: Arc<dyn UserRepository>,
    chats: Arc<dyn ChatRepository>,
    photos: Arc<dyn PhotoRepository>,
}

impl DeleteAccountHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        chats: Arc<dyn ChatRepository>,
        photos: Arc<dyn PhotoRepository>,
    ) -> Self {
        Self {
            users,
            chats,
            photos,
        }
    }

    pub async fn handle(&self, cmd: DeleteAccountCommand) -> Result<(), DomainError> {
        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "Usuário não encontrado"))?;

        user.anonymize(Timestamp::now());
        self.users.update(&user).await?;

        self.chats.delete_all_for_user(&cmd.user_id).await?;
        self.photos.delete_all_for_user(&cmd.user_id).await?;

        tracing::info!(user_id = %cmd.user_id, "User account deleted");
        Ok(())
    }
}
