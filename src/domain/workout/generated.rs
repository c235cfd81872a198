//! Shapes the model is prompted to return for workout generation.
//!
//! These mirror the JSON contract embedded in the generation prompt and are
//! persisted wholesale into the program tree after parsing.

use serde::{Deserialize, Serialize};

/// Top-level generated program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedProgram {
    pub name: String,
    pub description: String,
    pub weekly_split: String,
    pub sessions: Vec<GeneratedSession>,
}

/// One generated session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSession {
    pub day_of_week: u8,
    pub session_name: String,
    pub session_type: String,
    pub estimated_duration_minutes: u32,
    pub exercises: Vec<GeneratedExercise>,
}

/// One generated exercise prescription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedExercise {
    pub exercise_name: String,
    pub sets: u32,
    pub reps: String,
    pub rest_seconds: u32,
    pub order_index: u32,
    #[serde(default)]
    pub target_muscle: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}
