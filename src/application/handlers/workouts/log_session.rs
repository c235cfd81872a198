//! LogSessionHandler - records a performed workout.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId, WorkoutSessionId};
use crate::domain::workout::{ExerciseSetLog, LoggedExercise, WorkoutLog};
use crate::ports::WorkoutRepository;

/// One performed set as submitted by the client.
#[derive(Debug, Clone)]
pub struct SetInput {
    pub reps: u32,
    pub weight_kg: f32,
    pub completed: bool,
}

/// One exercise's performance as submitted by the client.
#[derive(Debug, Clone)]
pub struct LoggedExerciseInput {
    pub exercise_name: String,
    pub sets: Vec<SetInput>,
}

/// Command to log a completed session.
#[derive(Debug, Clone)]
pub struct LogSessionCommand {
    pub user_id: UserId,
    pub session_id: WorkoutSessionId,
    pub duration_minutes: u32,
    pub exercises: Vec<LoggedExerciseInput>,
    pub notes: Option<String>,
}

/// Handler for workout logging.
pub struct LogSessionHandler {
    workouts: Arc<dyn WorkoutRepository>,
}

impl LogSessionHandler {
    pub fn new(workouts: Arc<dyn WorkoutRepository>) -> Self {
        Self { workouts }
    }

    pub async fn handle(&self, cmd: LogSessionCommand) -> Result<WorkoutLog, DomainError> {
        let session = self
            .workouts
            .find_session(&cmd.session_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::WorkoutNotFound, "Treino não encontrado"))?;

        if session.user_id != cmd.user_id {
            return Err(DomainError::new(
                ErrorCode::WorkoutNotFound,
                "Treino não encontrado",
            ));
        }

        let exercises = cmd
            .exercises
            .into_iter()
            .map(|e| LoggedExercise {
                exercise_name: e.exercise_name,
                sets: e
                    .sets
                    .into_iter()
                    .map(|s| ExerciseSetLog {
                        reps: s.reps,
                        weight_kg: s.weight_kg,
                        completed: s.completed,
                    })
                    .collect(),
            })
            .collect();

        let log = WorkoutLog::record(
            cmd.user_id,
            cmd.session_id,
            cmd.duration_minutes,
            exercises,
            cmd.notes,
            Timestamp::now(),
        );
        self.workouts.save_log(&log).await?;

        tracing::info!(user_id = %cmd.user_id, session_id = %cmd.session_id, "Workout logged");
        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::workouts::generate_plan::tests::MockWorkouts;
    use crate::domain::workout::{ProgramStatus, WorkoutProgram, WorkoutSession};

    fn seed_session(workouts: &MockWorkouts, user_id: UserId) -> WorkoutSessionId {
        let program = WorkoutProgram {
            id: crate::domain::foundation::ProgramId::new(),
            user_id,
            name: "PPL".to_string(),
            description: None,
            weekly_split: None,
            ai_generation_prompt: None,
            status: ProgramStatus::Active,
            start_date: Timestamp::now(),
            end_date: Timestamp::now().add_days(28),
            created_at: Timestamp::now(),
        };
        let session = WorkoutSession {
            id: WorkoutSessionId::new(),
            program_id: program.id,
            user_id,
            day_of_week: 1,
            session_name: "Push".to_string(),
            session_type: None,
            estimated_duration_minutes: None,
            exercises: Vec::new(),
        };
        let session_id = session.id;
        workouts.programs.lock().unwrap().push(program);
        workouts.sessions.lock().unwrap().push(session);
        session_id
    }

    #[tokio::test]
    async fn logs_a_completed_session() {
        let workouts = Arc::new(MockWorkouts::new());
        let user_id = UserId::new();
        let session_id = seed_session(&workouts, user_id);

        let log = LogSessionHandler::new(workouts.clone())
            .handle(LogSessionCommand {
                user_id,
                session_id,
                duration_minutes: 50,
                exercises: vec![LoggedExerciseInput {
                    exercise_name: "Bench Press".to_string(),
                    sets: vec![SetInput {
                        reps: 10,
                        weight_kg: 60.0,
                        completed: true,
                    }],
                }],
                notes: None,
            })
            .await
            .unwrap();

        assert_eq!(log.duration_minutes, 50);
        assert_eq!(workouts.logs.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_session_rejected() {
        let err = LogSessionHandler::new(Arc::new(MockWorkouts::new()))
            .handle(LogSessionCommand {
                user_id: UserId::new(),
                session_id: WorkoutSessionId::new(),
                duration_minutes: 50,
                exercises: Vec::new(),
                notes: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::WorkoutNotFound);
    }

    #[tokio::test]
    async fn another_users_session_rejected() {
        let workouts = Arc::new(MockWorkouts::new());
        let owner = UserId::new();
        let session_id = seed_session(&workouts, owner);

        let err = LogSessionHandler::new(workouts)
            .handle(LogSessionCommand {
                user_id: UserId::new(),
                session_id,
                duration_minutes: 50,
                exercises: Vec::new(),
                notes: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::WorkoutNotFound);
    }
}
