//! Request/response DTOs for the workout endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::workouts::ActivePlan;
use crate::domain::workout::{SessionExercise, WorkoutLog, WorkoutProgram, WorkoutSession};

#[derive(Debug, Deserialize)]
pub struct SetDto {
    pub reps: u32,
    pub weight: f32,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoggedExerciseDto {
    pub exercise_name: String,
    pub sets: Vec<SetDto>,
}

#[derive(Debug, Deserialize)]
pub struct LogSessionRequest {
    pub session_id: String,
    pub duration_minutes: u32,
    pub exercises: Vec<LoggedExerciseDto>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExerciseResponse {
    pub exercise_name: String,
    pub target_muscle: Option<String>,
    pub sets: u32,
    pub reps: String,
    pub rest_seconds: Option<u32>,
    pub order_index: u32,
    pub notes: Option<String>,
}

impl From<&SessionExercise> for ExerciseResponse {
    fn from(exercise: &SessionExercise) -> Self {
        Self {
            exercise_name: exercise.exercise_name.clone(),
            target_muscle: exercise.target_muscle.clone(),
            sets: exercise.sets,
            reps: exercise.reps.clone(),
            rest_seconds: exercise.rest_seconds,
            order_index: exercise.order_index,
            notes: exercise.notes.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub day_of_week: u8,
    pub session_name: String,
    pub session_type: Option<String>,
    pub estimated_duration_minutes: Option<u32>,
    pub exercises: Vec<ExerciseResponse>,
}

impl From<&WorkoutSession> for SessionResponse {
    fn from(session: &WorkoutSession) -> Self {
        Self {
            id: session.id.to_string(),
            day_of_week: session.day_of_week,
            session_name: session.session_name.clone(),
            session_type: session.session_type.clone(),
            estimated_duration_minutes: session.estimated_duration_minutes,
            exercises: session.exercises.iter().map(ExerciseResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProgramResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub weekly_split: Option<String>,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    pub sessions: Vec<SessionResponse>,
}

impl ProgramResponse {
    pub fn from_tree(program: &WorkoutProgram, sessions: &[WorkoutSession]) -> Self {
        Self {
            id: program.id.to_string(),
            name: program.name.clone(),
            description: program.description.clone(),
            weekly_split: program.weekly_split.clone(),
            status: program.status.as_str().to_string(),
            start_date: program.start_date.as_datetime().to_rfc3339(),
            end_date: program.end_date.as_datetime().to_rfc3339(),
            sessions: sessions.iter().map(SessionResponse::from).collect(),
        }
    }
}

impl From<ActivePlan> for ProgramResponse {
    fn from(plan: ActivePlan) -> Self {
        Self::from_tree(&plan.program, &plan.sessions)
    }
}

#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub id: String,
    pub session_id: String,
    pub duration_minutes: u32,
    pub completed_at: String,
}

impl From<WorkoutLog> for LogResponse {
    fn from(log: WorkoutLog) -> Self {
        Self {
            id: log.id.to_string(),
            session_id: log.session_id.to_string(),
            duration_minutes: log.duration_minutes,
            completed_at: log.completed_at.as_datetime().to_rfc3339(),
        }
    }
}
