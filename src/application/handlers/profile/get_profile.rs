//! GetProfileHandler - reads a profile, decrypting the medical field.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::User;
use crate::ports::{FieldEncryptor, UserRepository};

/// Query for the current user's profile.
#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub user_id: UserId,
}

/// A profile as returned to the client: the medical conditions field is
/// plaintext here and the ciphertext never leaves the service.
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub user: User,
    pub medical_conditions: Option<String>,
}

/// Handler for profile reads.
pub struct GetProfileHandler {
    users: Arc<dyn UserRepository>,
    encryptor: Arc<dyn FieldEncryptor>,
}

impl GetProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>, encryptor: Arc<dyn FieldEncryptor>) -> Self {
        Self { users, encryptor }
    }

    pub async fn handle(&self, query: GetProfileQuery) -> Result<ProfileView, DomainError> {
        let user = self
            .users
            .find_by_id(&query.user_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "Usuário não encontrado"))?;

        // A decryption failure hides the field rather than failing the read
        let medical_conditions = match &user.medical_conditions_encrypted {
            Some(ciphertext) => match self.encryptor.decrypt(ciphertext) {
                Ok(plaintext) => Some(plaintext),
                Err(err) => {
                    tracing::error!(user_id = %user.id, error = %err, "Failed to decrypt medical conditions");
                    None
                }
            },
            None => None,
        };

        Ok(ProfileView {
            user,
            medical_conditions,
        })
    }
}
