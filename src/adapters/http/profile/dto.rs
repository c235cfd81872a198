//! Request/response DTOs for the profile endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::profile::ProfileView;
use crate::domain::user::{
    ActivityLevel, ExperienceLevel, FitnessGoal, Gender, PreferredTime, ProgressPhoto, Units,
};

#[derive(Debug, Deserialize)]
pub struct ScheduleSlotDto {
    pub day_of_week: u8,
    pub available: bool,
    pub preferred_time: Option<PreferredTime>,
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CompleteProfileRequest {
    pub name: String,
    pub age: u32,
    pub weight_kg: f32,
    pub height_cm: f32,
    pub gender: Gender,
    pub fitness_goal: FitnessGoal,
    pub experience_level: ExperienceLevel,
    pub activity_level: ActivityLevel,
    pub gym_access: bool,
    #[serde(default)]
    pub home_equipment: Vec<String>,
    pub medical_conditions: Option<String>,
    #[serde(default)]
    pub injuries: Vec<String>,
    #[serde(default)]
    pub weekly_schedule: Vec<ScheduleSlotDto>,
    pub preferred_language: Option<String>,
    pub units: Option<Units>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
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
    /// Present-and-null clears the stored value; absent leaves it alone.
    #[serde(default, deserialize_with = "double_option")]
    pub medical_conditions: Option<Option<String>>,
    pub injuries: Option<Vec<String>>,
    pub weekly_schedule: Option<Vec<ScheduleSlotDto>>,
    pub preferred_language: Option<String>,
    pub units: Option<Units>,
}

/// Profile as returned to the client.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub phone: Option<String>,
    pub email: Option<String>,
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
    pub medical_conditions: Option<String>,
    pub injuries: Vec<String>,
    pub preferred_language: String,
    pub units: Units,
    pub profile_completed: bool,
}

impl From<ProfileView> for ProfileResponse {
    fn from(view: ProfileView) -> Self {
        let user = view.user;
        Self {
            id: user.id.to_string(),
            phone: user.phone,
            email: user.email,
            name: user.name,
            age: user.age,
            weight_kg: user.weight_kg,
            height_cm: user.height_cm,
            gender: user.gender,
            fitness_goal: user.fitness_goal,
            experience_level: user.experience_level,
            activity_level: user.activity_level,
            gym_access: user.gym_access,
            home_equipment: user.home_equipment,
            medical_conditions: view.medical_conditions,
            injuries: user.injuries,
            preferred_language: user.preferred_language,
            units: user.units,
            profile_completed: user.profile_completed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PhotoResponse {
    pub id: String,
    pub image_url: String,
    pub weight_kg: Option<f32>,
    pub created_at: String,
}

impl From<ProgressPhoto> for PhotoResponse {
    fn from(photo: ProgressPhoto) -> Self {
        Self {
            id: photo.id.to_string(),
            image_url: photo.image_url,
            weight_kg: photo.weight_kg,
            created_at: photo.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Distinguishes an absent field from an explicit null.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_medical_conditions_stays_untouched() {
        let request: UpdateProfileRequest = serde_json::from_str(r#"{"name":"Rui"}"#).unwrap();
        assert!(request.medical_conditions.is_none());
    }

    #[test]
    fn null_medical_conditions_clears() {
        let request: UpdateProfileRequest =
            serde_json::from_str(r#"{"medical_conditions":null}"#).unwrap();
        assert_eq!(request.medical_conditions, Some(None));
    }

    #[test]
    fn present_medical_conditions_replaces() {
        let request: UpdateProfileRequest =
            serde_json::from_str(r#"{"medical_conditions":"asthma"}"#).unwrap();
        assert_eq!(request.medical_conditions, Some(Some("asthma".to_string())));
    }
}
