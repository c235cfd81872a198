//! The user aggregate and its enumerated profile attributes.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    LoseWeight,
    GainMuscle,
    Maintain,
    Endurance,
    Flexibility,
    GeneralHealth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Units {
    Metric,
    Imperial,
}

/// A user account with profile attributes.
///
/// Created on first successful verification with an empty profile; the
/// onboarding flow fills it in exactly once, later updates are partial.
/// Medical conditions are stored encrypted and only ever appear here as
/// ciphertext.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub phone: Option<String>,
    pub phone_country_code: Option<String>,
    pub email: Option<String>,
    pub email_verified: bool,
    pub password_hash: Option<String>,
    pub name: Option<String>,
    pub age: Option<u32>,
    pub weight_kg: Option<f32>,
    pub height_cm: Option<f32>,
    pub gender: Option<Gender>,
    pub fitness_goal: Option<FitnessGoal>,
    pub experience_level: Option<ExperienceLevel>,
    pub activity_level: Option<ActivityLevel>,
    pub gym_access: bool,
    pub home_equipment: Vec<String>,
    pub medical_conditions_encrypted: Option<String>,
    pub injuries: Vec<String>,
    pub preferred_language: String,
    pub units: Units,
    pub profile_completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The profile fields supplied during onboarding.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub weight_kg: Option<f32>,
    pub height_cm: Option<f32>,
    pub gender: Option<Gender>,
    pub fitness_goal: Option<FitnessGoal>,
    pub experience_level: Option<ExperienceLevel>,
    pub activity_level: Option<ActivityLevel>,
    pub gym_access: Option<bool>,
    pub home_equipment: Option<Vec<String>>,
    pub medical_conditions_encrypted: Option<Option<String>>,
    pub injuries: Option<Vec<String>>,
    pub preferred_language: Option<String>,
    pub units: Option<Units>,
}

impl User {
    /// Creates a fresh account for a verified phone number.
    pub fn from_phone(phone: impl Into<String>, country_code: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id: UserId::new(),
            phone: Some(phone.into()),
            phone_country_code: Some(country_code.into()),
            email: None,
            email_verified: false,
            password_hash: None,
            ..Self::blank(now)
        }
    }

    /// Creates a fresh account for an email signup awaiting verification.
    pub fn from_email(email: impl Into<String>, password_hash: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id: UserId::new(),
            phone: None,
            phone_country_code: None,
            email: Some(email.into()),
            email_verified: false,
            password_hash: Some(password_hash.into()),
            ..Self::blank(now)
        }
    }

    fn blank(now: Timestamp) -> Self {
        Self {
            id: UserId::new(),
            phone: None,
            phone_country_code: None,
            email: None,
            email_verified: false,
            password_hash: None,
            name: None,
            age: None,
            weight_kg: None,
            height_cm: None,
            gender: None,
            fitness_goal: None,
            experience_level: None,
            activity_level: None,
            gym_access: false,
            home_equipment: Vec::new(),
            medical_conditions_encrypted: None,
            injuries: Vec::new(),
            preferred_language: "pt-BR".to_string(),
            units: Units::Metric,
            profile_completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the one-time onboarding completion.
    ///
    /// Fails if the profile was already completed.
    pub fn complete_profile(&mut self, update: ProfileUpdate, now: Timestamp) -> Result<(), DomainError> {
        if self.profile_completed {
            return Err(DomainError::new(
                ErrorCode::ProfileAlreadyComplete,
                "Perfil já completo",
            ));
        }
        self.apply_update(update, now);
        self.profile_completed = true;
        Ok(())
    }

    /// Applies a partial profile update.
    pub fn apply_update(&mut self, update: ProfileUpdate, now: Timestamp) {
        if let Some(name) = update.name {
            self.name = Some(name);
        }
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if let Some(weight) = update.weight_kg {
            self.weight_kg = Some(weight);
        }
        if let Some(height) = update.height_cm {
            self.height_cm = Some(height);
        }
        if let Some(gender) = update.gender {
            self.gender = Some(gender);
        }
        if let Some(goal) = update.fitness_goal {
            self.fitness_goal = Some(goal);
        }
        if let Some(level) = update.experience_level {
            self.experience_level = Some(level);
        }
        if let Some(level) = update.activity_level {
            self.activity_level = Some(level);
        }
        if let Some(gym) = update.gym_access {
            self.gym_access = gym;
        }
        if let Some(equipment) = update.home_equipment {
            self.home_equipment = equipment;
        }
        if let Some(medical) = update.medical_conditions_encrypted {
            self.medical_conditions_encrypted = medical;
        }
        if let Some(injuries) = update.injuries {
            self.injuries = injuries;
        }
        if let Some(language) = update.preferred_language {
            self.preferred_language = language;
        }
        if let Some(units) = update.units {
            self.units = units;
        }
        self.updated_at = now;
    }

    /// Marks the email address as verified.
    pub fn mark_email_verified(&mut self, now: Timestamp) {
        self.email_verified = true;
        self.updated_at = now;
    }

    /// Soft-deletes the account: identity and sensitive fields are
    /// anonymized, the row itself stays for referential integrity.
    pub fn anonymize(&mut self, now: Timestamp) {
        let short_id: String = self.id.to_string().chars().take(8).collect();
        self.phone = Some(format!("deleted_{}", short_id));
        self.email = None;
        self.email_verified = false;
        self.password_hash = None;
        self.name = Some("Deleted User".to_string());
        self.medical_conditions_encrypted = None;
        self.injuries = Vec::new();
        self.updated_at = now;
    }
}

impl Default for ProfileUpdate {
    fn default() -> Self {
        Self {
            name: None,
            age: None,
            weight_kg: None,
            height_cm: None,
            gender: None,
            fitness_goal: None,
            experience_level: None,
            activity_level: None,
            gym_access: None,
            home_equipment: None,
            medical_conditions_encrypted: None,
            injuries: None,
            preferred_language: None,
            units: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000)
    }

    fn onboarding() -> ProfileUpdate {
        ProfileUpdate {
            name: Some("Ana".to_string()),
            age: Some(29),
            weight_kg: Some(62.5),
            height_cm: Some(168.0),
            gender: Some(Gender::Female),
            fitness_goal: Some(FitnessGoal::GainMuscle),
            experience_level: Some(ExperienceLevel::Intermediate),
            activity_level: Some(ActivityLevel::ModeratelyActive),
            gym_access: Some(true),
            ..Default::default()
        }
    }

    #[test]
    fn phone_user_starts_incomplete() {
        let user = User::from_phone("+351912345678", "+351", now());
        assert!(!user.profile_completed);
        assert_eq!(user.preferred_language, "pt-BR");
        assert_eq!(user.units, Units::Metric);
    }

    #[test]
    fn email_user_starts_unverified() {
        let user = User::from_email("a@b.com", "hash", now());
        assert!(!user.email_verified);
        assert_eq!(user.password_hash.as_deref(), Some("hash"));
    }

    #[test]
    fn complete_profile_sets_flag() {
        let mut user = User::from_phone("+351912345678", "+351", now());
        user.complete_profile(onboarding(), now()).unwrap();

        assert!(user.profile_completed);
        assert_eq!(user.name.as_deref(), Some("Ana"));
        assert_eq!(user.fitness_goal, Some(FitnessGoal::GainMuscle));
    }

    #[test]
    fn complete_profile_twice_rejected() {
        let mut user = User::from_phone("+351912345678", "+351", now());
        user.complete_profile(onboarding(), now()).unwrap();

        let err = user.complete_profile(onboarding(), now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ProfileAlreadyComplete);
    }

    #[test]
    fn partial_update_leaves_other_fields() {
        let mut user = User::from_phone("+351912345678", "+351", now());
        user.complete_profile(onboarding(), now()).unwrap();

        user.apply_update(
            ProfileUpdate {
                weight_kg: Some(60.0),
                ..Default::default()
            },
            now(),
        );

        assert_eq!(user.weight_kg, Some(60.0));
        assert_eq!(user.name.as_deref(), Some("Ana"));
    }

    #[test]
    fn medical_conditions_can_be_cleared() {
        let mut user = User::from_phone("+351912345678", "+351", now());
        user.apply_update(
            ProfileUpdate {
                medical_conditions_encrypted: Some(Some("ciphertext".to_string())),
                ..Default::default()
            },
            now(),
        );
        assert!(user.medical_conditions_encrypted.is_some());

        user.apply_update(
            ProfileUpdate {
                medical_conditions_encrypted: Some(None),
                ..Default::default()
            },
            now(),
        );
        assert!(user.medical_conditions_encrypted.is_none());
    }

    #[test]
    fn anonymize_scrubs_identity_and_sensitive_fields() {
        let mut user = User::from_phone("+351912345678", "+351", now());
        user.complete_profile(
            ProfileUpdate {
                medical_conditions_encrypted: Some(Some("ciphertext".to_string())),
                injuries: Some(vec!["knee".to_string()]),
                ..onboarding()
            },
            now(),
        )
        .unwrap();

        user.anonymize(now());

        assert!(user.phone.as_deref().unwrap().starts_with("deleted_"));
        assert!(user.email.is_none());
        assert_eq!(user.name.as_deref(), Some("Deleted User"));
        assert!(user.medical_conditions_encrypted.is_none());
        assert!(user.injuries.is_empty());
    }
}
