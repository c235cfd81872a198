//! PostgreSQL implementation of the WorkoutRepository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ProgramId, Timestamp, UserId, WorkoutSessionId,
};
use crate::domain::workout::{
    ProgramStatus, SessionExercise, WorkoutLog, WorkoutProgram, WorkoutSession,
};
use crate::ports::WorkoutRepository;

/// Postgres-backed workout program trees and logs.
///
/// Programs, sessions, and exercises are written in one transaction so a
/// failed generation never leaves a partial tree behind.
pub struct PostgresWorkoutRepository {
    pool: PgPool,
}

impl PostgresWorkoutRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn sessions_for_program(
        &self,
        program_id: &ProgramId,
    ) -> Result<Vec<WorkoutSession>, DomainError> {
        #[derive(sqlx::FromRow)]
        struct SessionRow {
            id: Uuid,
            program_id: Uuid,
            user_id: Uuid,
            day_of_week: i16,
            session_name: String,
            session_type: Option<String>,
            estimated_duration_minutes: Option<i32>,
        }

        #[derive(sqlx::FromRow)]
        struct ExerciseRow {
            session_id: Uuid,
            exercise_name: String,
            target_muscle: Option<String>,
            sets: i32,
            reps: String,
            rest_seconds: Option<i32>,
            order_index: i32,
            notes: Option<String>,
        }

        let session_rows: Vec<SessionRow> = sqlx::query_as(
            r#"
            SELECT id, program_id, user_id, day_of_week, session_name, session_type,
                   estimated_duration_minutes
            FROM workout_sessions
            WHERE program_id = $1
            ORDER BY day_of_week
            "#,
        )
        .bind(program_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::database)?;

        let exercise_rows: Vec<ExerciseRow> = sqlx::query_as(
            r#"
            SELECT e.session_id, e.exercise_name, e.target_muscle, e.sets, e.reps,
                   e.rest_seconds, e.order_index, e.notes
            FROM session_exercises e
            JOIN workout_sessions s ON s.id = e.session_id
            WHERE s.program_id = $1
            ORDER BY e.order_index
            "#,
        )
        .bind(program_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::database)?;

        Ok(session_rows
            .into_iter()
            .map(|s| WorkoutSession {
                id: WorkoutSessionId::from_uuid(s.id),
                program_id: ProgramId::from_uuid(s.program_id),
                user_id: UserId::from_uuid(s.user_id),
                day_of_week: s.day_of_week.clamp(0, 6) as u8,
                session_name: s.session_name,
                session_type: s.session_type,
                estimated_duration_minutes: s.estimated_duration_minutes.map(|d| d.max(0) as u32),
                exercises: exercise_rows
                    .iter()
                    .filter(|e| e.session_id == s.id)
                    .map(|e| SessionExercise {
                        exercise_name: e.exercise_name.clone(),
                        target_muscle: e.target_muscle.clone(),
                        sets: e.sets.max(0) as u32,
                        reps: e.reps.clone(),
                        rest_seconds: e.rest_seconds.map(|r| r.max(0) as u32),
                        order_index: e.order_index.max(0) as u32,
                        notes: e.notes.clone(),
                    })
                    .collect(),
            })
            .collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProgramRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    description: Option<String>,
    weekly_split: Option<String>,
    ai_generation_prompt: Option<String>,
    status: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProgramRow> for WorkoutProgram {
    type Error = DomainError;

    fn try_from(row: ProgramRow) -> Result<Self, Self::Error> {
        let status: ProgramStatus = row.status.parse().map_err(DomainError::database)?;
        Ok(WorkoutProgram {
            id: ProgramId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            name: row.name,
            description: row.description,
            weekly_split: row.weekly_split,
            ai_generation_prompt: row.ai_generation_prompt,
            status,
            start_date: Timestamp::from_datetime(row.start_date),
            end_date: Timestamp::from_datetime(row.end_date),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl WorkoutRepository for PostgresWorkoutRepository {
    async fn save_program(
        &self,
        program: &WorkoutProgram,
        sessions: &[WorkoutSession],
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(DomainError::database)?;

        sqlx::query(
            r#"
            INSERT INTO workout_programs (
                id, user_id, name, description, weekly_split, ai_generation_prompt,
                status, start_date, end_date, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(program.id.as_uuid())
        .bind(program.user_id.as_uuid())
        .bind(&program.name)
        .bind(&program.description)
        .bind(&program.weekly_split)
        .bind(&program.ai_generation_prompt)
        .bind(program.status.as_str())
        .bind(program.start_date.as_datetime())
        .bind(program.end_date.as_datetime())
        .bind(program.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(DomainError::database)?;

        for session in sessions {
            sqlx::query(
                r#"
                INSERT INTO workout_sessions (
                    id, program_id, user_id, day_of_week, session_name, session_type,
                    estimated_duration_minutes
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(session.id.as_uuid())
            .bind(session.program_id.as_uuid())
            .bind(session.user_id.as_uuid())
            .bind(session.day_of_week as i16)
            .bind(&session.session_name)
            .bind(&session.session_type)
            .bind(session.estimated_duration_minutes.map(|d| d as i32))
            .execute(&mut *tx)
            .await
            .map_err(DomainError::database)?;

            for exercise in &session.exercises {
                sqlx::query(
                    r#"
                    INSERT INTO session_exercises (
                        id, session_id, exercise_name, target_muscle, sets, reps,
                        rest_seconds, order_index, notes
                    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                    "#,
                )
                .bind(Uuid::new_v4())
                .bind(session.id.as_uuid())
                .bind(&exercise.exercise_name)
                .bind(&exercise.target_muscle)
                .bind(exercise.sets as i32)
                .bind(&exercise.reps)
                .bind(exercise.rest_seconds.map(|r| r as i32))
                .bind(exercise.order_index as i32)
                .bind(&exercise.notes)
                .execute(&mut *tx)
                .await
                .map_err(DomainError::database)?;
            }
        }

        tx.commit().await.map_err(DomainError::database)?;
        Ok(())
    }

    async fn archive_active_programs(&self, user_id: &UserId) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE workout_programs SET status = 'archived'
            WHERE user_id = $1 AND status = 'active'
            "#,
        )
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;

        Ok(())
    }

    async fn find_active_program(
        &self,
        user_id: &UserId,
    ) -> Result<Option<(WorkoutProgram, Vec<WorkoutSession>)>, DomainError> {
        let row: Option<ProgramRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, description, weekly_split, ai_generation_prompt,
                   status, start_date, end_date, created_at
            FROM workout_programs
            WHERE user_id = $1 AND status = 'active'
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(DomainError::database)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let program = WorkoutProgram::try_from(row)?;
        let sessions = self.sessions_for_program(&program.id).await?;
        Ok(Some((program, sessions)))
    }

    async fn find_session(
        &self,
        session_id: &WorkoutSessionId,
    ) -> Result<Option<WorkoutSession>, DomainError> {
        #[derive(sqlx::FromRow)]
        struct SessionRow {
            id: Uuid,
            program_id: Uuid,
            user_id: Uuid,
            day_of_week: i16,
            session_name: String,
            session_type: Option<String>,
            estimated_duration_minutes: Option<i32>,
        }

        let row: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT id, program_id, user_id, day_of_week, session_name, session_type,
                   estimated_duration_minutes
            FROM workout_sessions
            WHERE id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(DomainError::database)?;

        Ok(row.map(|s| WorkoutSession {
            id: WorkoutSessionId::from_uuid(s.id),
            program_id: ProgramId::from_uuid(s.program_id),
            user_id: UserId::from_uuid(s.user_id),
            day_of_week: s.day_of_week.clamp(0, 6) as u8,
            session_name: s.session_name,
            session_type: s.session_type,
            estimated_duration_minutes: s.estimated_duration_minutes.map(|d| d.max(0) as u32),
            exercises: Vec::new(),
        }))
    }

    async fn save_log(&self, log: &WorkoutLog) -> Result<(), DomainError> {
        let exercises = serde_json::to_value(&log.exercises)
            .map_err(|e| DomainError::database(format!("serialize exercise logs: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO workout_logs (
                id, user_id, session_id, duration_minutes, exercises, notes, completed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(log.id.as_uuid())
        .bind(log.user_id.as_uuid())
        .bind(log.session_id.as_uuid())
        .bind(log.duration_minutes as i32)
        .bind(exercises)
        .bind(&log.notes)
        .bind(log.completed_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;

        Ok(())
    }
}
