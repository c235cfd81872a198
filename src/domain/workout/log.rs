//! Append-only logs of performed workouts.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId, WorkoutLogId, WorkoutSessionId};

/// One set as actually performed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSetLog {
    pub reps: u32,
    pub weight_kg: f32,
    pub completed: bool,
}

/// Per-exercise performance within a logged workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedExercise {
    pub exercise_name: String,
    pub sets: Vec<ExerciseSetLog>,
}

/// A completed workout. Logs are append-only and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLog {
    pub id: WorkoutLogId,
    pub user_id: UserId,
    pub session_id: WorkoutSessionId,
    pub duration_minutes: u32,
    pub exercises: Vec<LoggedExercise>,
    pub notes: Option<String>,
    pub completed_at: Timestamp,
}

impl WorkoutLog {
    /// Records a completed session.
    pub fn record(
        user_id: UserId,
        session_id: WorkoutSessionId,
        duration_minutes: u32,
        exercises: Vec<LoggedExercise>,
        notes: Option<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id: WorkoutLogId::new(),
            user_id,
            session_id,
            duration_minutes,
            exercises,
            notes,
            completed_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_captures_performance() {
        let log = WorkoutLog::record(
            UserId::new(),
            WorkoutSessionId::new(),
            55,
            vec![LoggedExercise {
                exercise_name: "Bench Press".to_string(),
                sets: vec![
                    ExerciseSetLog { reps: 10, weight_kg: 60.0, completed: true },
                    ExerciseSetLog { reps: 8, weight_kg: 60.0, completed: false },
                ],
            }],
            Some("felt strong".to_string()),
            Timestamp::from_unix_secs(1_700_000_000),
        );

        assert_eq!(log.duration_minutes, 55);
        assert_eq!(log.exercises[0].sets.len(), 2);
        assert!(log.exercises[0].sets[0].completed);
    }
}
