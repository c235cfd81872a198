//! UpdateProfileHandler - partial profile updates.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::{ProfileUpdate, ScheduleSlot};
use crate::ports::{FieldEncryptor, UserRepository};

/// Command carrying a partial profile update.
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub user_id: UserId,
    pub profile: ProfileUpdate,
    /// `Some(None)` clears the field, `Some(Some(text))` replaces it,
    /// `None` leaves it untouched.
    pub medical_conditions: Option<Option<String>>,
    pub weekly_schedule: Option<Vec<ScheduleSlot>>,
}

/// Handler for profile updates.
pub struct UpdateProfileHandler {
    users: Arc<dyn UserRepository>,
    encryptor: Arc<dyn FieldEncryptor>,
}

impl UpdateProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>, encryptor: Arc<dyn FieldEncryptor>) -> Self {
        Self { users, encryptor }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<(), DomainError> {
        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "Usuário não encontrado"))?;

        let mut profile = cmd.profile;
        match cmd.medical_conditions {
            Some(Some(plaintext)) => {
                profile.medical_conditions_encrypted = Some(Some(self.encryptor.encrypt(&plaintext)?));
            }
            Some(None) => {
                profile.medical_conditions_encrypted = Some(None);
            }
            None => {}
        }

        user.apply_update(profile, Timestamp::now());
        self.users.update(&user).await?;

        if let Some(schedule) = cmd.weekly_schedule {
            self.users
                .replace_weekly_schedule(&cmd.user_id, &schedule)
                .await?;
        }

        tracing::info!(user_id = %cmd.user_id, "User profile updated");
        Ok(())
    }
}
