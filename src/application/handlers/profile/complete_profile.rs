//! CompleteProfileHandler - one-time onboarding completion.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::{ProfileUpdate, ScheduleSlot};
use crate::ports::{FieldEncryptor, UserRepository};

/// Command carrying the onboarding payload.
#[derive(Debug, Clone)]
pub struct CompleteProfileCommand {
    pub user_id: UserId,
    pub profile: ProfileUpdate,
    /// Plaintext medical conditions, encrypted before storage.
    pub medical_conditions: Option<String>,
    pub weekly_schedule: Vec<ScheduleSlot>,
}

/// Handler for onboarding completion.
pub struct CompleteProfileHandler {
    users: Arc<dyn UserRepository>,
    encryptor: Arc<dyn FieldEncryptor>,
}

impl CompleteProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>, encryptor: Arc<dyn FieldEncryptor>) -> Self {
        Self { users, encryptor }
    }

    pub async fn handle(&self, cmd: CompleteProfileCommand) -> Result<(), DomainError> {
        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "Usuário não encontrado"))?;

        let mut profile = cmd.profile;
        if let Some(plaintext) = &cmd.medical_conditions {
            let ciphertext = self.encryptor.encrypt(plaintext)?;
            profile.medical_conditions_encrypted = Some(Some(ciphertext));
        }

        let now = Timestamp::now();
        user.complete_profile(profile, now)?;
        self.users.update(&user).await?;

        if !cmd.weekly_schedule.is_empty() {
            if let Err(err) = self
                .users
                .replace_weekly_schedule(&cmd.user_id, &cmd.weekly_schedule)
                .await
            {
                tracing::error!(user_id = %cmd.user_id, error = %err, "Failed to save weekly schedule");
            }
        }

        tracing::info!(user_id = %cmd.user_id, "User profile completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::auth::test_support::MockUserRepository;
    use crate::domain::user::{FitnessGoal, User};
    use crate::ports::EncryptionError;

    struct PrefixEncryptor;

    impl FieldEncryptor for PrefixEncryptor {
        fn encrypt(&self, plaintext: &str) -> Result<String, EncryptionError> {
            Ok(format!("enc:{}", plaintext))
        }

        fn decrypt(&self, ciphertext: &str) -> Result<String, EncryptionError> {
            ciphertext
                .strip_prefix("enc:")
                .map(String::from)
                .ok_or(EncryptionError::Malformed)
        }
    }

    fn onboarding() -> ProfileUpdate {
        ProfileUpdate {
            name: Some("Rui".to_string()),
            fitness_goal: Some(FitnessGoal::LoseWeight),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn completion_encrypts_medical_conditions() {
        let users = Arc::new(MockUserRepository::new());
        let user = User::from_phone("+351912345678", "+351", Timestamp::now());
        let user_id = user.id;
        users.push(user);

        CompleteProfileHandler::new(users.clone(), Arc::new(PrefixEncryptor))
            .handle(CompleteProfileCommand {
                user_id,
                profile: onboarding(),
                medical_conditions: Some("asthma".to_string()),
                weekly_schedule: Vec::new(),
            })
            .await
            .unwrap();

        let stored = users.stored();
        assert!(stored[0].profile_completed);
        assert_eq!(
            stored[0].medical_conditions_encrypted.as_deref(),
            Some("enc:asthma")
        );
    }

    #[tokio::test]
    async fn second_completion_rejected() {
        let users = Arc::new(MockUserRepository::new());
        let user = User::from_phone("+351912345678", "+351", Timestamp::now());
        let user_id = user.id;
        users.push(user);

        let handler = CompleteProfileHandler::new(users, Arc::new(PrefixEncryptor));
        let cmd = || CompleteProfileCommand {
            user_id,
            profile: onboarding(),
            medical_conditions: None,
            weekly_schedule: Vec::new(),
        };

        handler.handle(cmd()).await.unwrap();
        let err = handler.handle(cmd()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProfileAlreadyComplete);
    }
}
