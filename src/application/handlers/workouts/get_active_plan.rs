//! GetActivePlanHandler - reads the user's active program tree.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::workout::{WorkoutProgram, WorkoutSession};
use crate::ports::WorkoutRepository;

/// Query for the active plan.
#[derive(Debug, Clone)]
pub struct GetActivePlanQuery {
    pub user_id: UserId,
}

/// The active program with its sessions, or nothing if none is active.
#[derive(Debug, Clone)]
pub struct ActivePlan {
    pub program: WorkoutProgram,
    pub sessions: Vec<WorkoutSession>,
}

/// Handler for active plan reads.
pub struct GetActivePlanHandler {
    workouts: Arc<dyn WorkoutRepository>,
}

impl GetActivePlanHandler {
    pub fn new(workouts: Arc<dyn WorkoutRepository>) -> Self {
        Self { workouts }
    }

    pub async fn handle(
        &self,
        query: GetActivePlanQuery,
    ) -> Result<Option<ActivePlan>, DomainError> {
        Ok(self
            .workouts
            .find_active_program(&query.user_id)
            .await?
            .map(|(program, sessions)| ActivePlan { program, sessions }))
    }
}
