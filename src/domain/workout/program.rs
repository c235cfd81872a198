//! Workout program tree: program → sessions → exercises.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProgramId, Timestamp, UserId, WorkoutSessionId};

/// A generated program spans four weeks.
pub const PROGRAM_DURATION_DAYS: i64 = 28;

/// Lifecycle of a workout program.
///
/// Only one program per user is active; generating a new plan archives the
/// previous active one. Archived programs are kept, never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramStatus {
    Active,
    Completed,
    Archived,
}

impl ProgramStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramStatus::Active => "active",
            ProgramStatus::Completed => "completed",
            ProgramStatus::Archived => "archived",
        }
    }
}

impl std::str::FromStr for ProgramStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ProgramStatus::Active),
            "completed" => Ok(ProgramStatus::Completed),
            "archived" => Ok(ProgramStatus::Archived),
            other => Err(format!("unknown program status: {}", other)),
        }
    }
}

/// An AI-generated training program, persisted verbatim from the model
/// output along with the prompt that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutProgram {
    pub id: ProgramId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub weekly_split: Option<String>,
    pub ai_generation_prompt: Option<String>,
    pub status: ProgramStatus,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub created_at: Timestamp,
}

impl WorkoutProgram {
    /// Creates a new active program starting now.
    pub fn new_active(
        user_id: UserId,
        name: impl Into<String>,
        description: Option<String>,
        weekly_split: Option<String>,
        prompt: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id: ProgramId::new(),
            user_id,
            name: name.into(),
            description,
            weekly_split,
            ai_generation_prompt: Some(prompt.into()),
            status: ProgramStatus::Active,
            start_date: now,
            end_date: now.add_days(PROGRAM_DURATION_DAYS),
            created_at: now,
        }
    }
}

/// A planned session within a program (e.g. "Push day", Wednesday).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: WorkoutSessionId,
    pub program_id: ProgramId,
    pub user_id: UserId,
    /// Day of week, 0 = Sunday through 6 = Saturday.
    pub day_of_week: u8,
    pub session_name: String,
    pub session_type: Option<String>,
    pub estimated_duration_minutes: Option<u32>,
    pub exercises: Vec<SessionExercise>,
}

/// One prescribed exercise within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionExercise {
    pub exercise_name: String,
    pub target_muscle: Option<String>,
    pub sets: u32,
    /// Rep prescription as free text, e.g. "8-12".
    pub reps: String,
    pub rest_seconds: Option<u32>,
    pub order_index: u32,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_program_is_active_for_four_weeks() {
        let now = Timestamp::from_unix_secs(1_700_000_000);
        let program = WorkoutProgram::new_active(
            UserId::new(),
            "Hypertrophy Block",
            Some("Push/Pull/Legs".to_string()),
            Some("PPL".to_string()),
            "prompt text",
            now,
        );

        assert_eq!(program.status, ProgramStatus::Active);
        assert_eq!(program.end_date, now.add_days(PROGRAM_DURATION_DAYS));
        assert!(program.ai_generation_prompt.is_some());
    }

    #[test]
    fn program_status_roundtrips() {
        for status in [
            ProgramStatus::Active,
            ProgramStatus::Completed,
            ProgramStatus::Archived,
        ] {
            assert_eq!(status.as_str().parse::<ProgramStatus>().unwrap(), status);
        }
    }
}
