//! Workout program and log persistence port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId, WorkoutSessionId};
use crate::domain::workout::{WorkoutLog, WorkoutProgram, WorkoutSession};

/// Port for the workout program tree and performance logs.
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Persists a program together with its sessions and exercises.
    async fn save_program(
        &self,
        program: &WorkoutProgram,
        sessions: &[WorkoutSession],
    ) -> Result<(), DomainError>;

    /// Archives any currently active programs for the user.
    async fn archive_active_programs(&self, user_id: &UserId) -> Result<(), DomainError>;

    /// Returns the user's active program with nested sessions, if any.
    async fn find_active_program(
        &self,
        user_id: &UserId,
    ) -> Result<Option<(WorkoutProgram, Vec<WorkoutSession>)>, DomainError>;

    /// Finds a planned session by id.
    async fn find_session(
        &self,
        session_id: &WorkoutSessionId,
    ) -> Result<Option<WorkoutSession>, DomainError>;

    /// Appends a performance log.
    async fn save_log(&self, log: &WorkoutLog) -> Result<(), DomainError>;
}
