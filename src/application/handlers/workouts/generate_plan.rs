//! GeneratePlanHandler - builds a prompt from the profile, calls the model,
//! and persists the returned program tree.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::generation::parse_reply;
use crate::domain::user::{ScheduleSlot, User};
use crate::domain::workout::{
    GeneratedProgram, SessionExercise, WorkoutProgram, WorkoutSession,
};
use crate::ports::{AiProvider, UserRepository, WorkoutRepository};

/// Command to generate a new workout plan.
#[derive(Debug, Clone)]
pub struct GeneratePlanCommand {
    pub user_id: UserId,
}

/// Handler for plan generation.
///
/// Requires a completed profile. The previous active program is archived
/// before the new one is persisted, keeping at most one active program per
/// user.
pub struct GeneratePlanHandler {
    users: Arc<dyn UserRepository>,
    workouts: Arc<dyn WorkoutRepository>,
    ai: Arc<dyn AiProvider>,
}

impl GeneratePlanHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        workouts: Arc<dyn WorkoutRepository>,
        ai: Arc<dyn AiProvider>,
    ) -> Self {
        Self {
            users,
            workouts,
            ai,
        }
    }

    pub async fn handle(
        &self,
        cmd: GeneratePlanCommand,
    ) -> Result<(WorkoutProgram, Vec<WorkoutSession>), DomainError> {
        let user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "Usuário não encontrado"))?;

        if !user.profile_completed {
            return Err(DomainError::new(
                ErrorCode::ProfileIncomplete,
                "Complete seu perfil primeiro",
            ));
        }

        let schedule = self.users.weekly_schedule(&cmd.user_id).await?;

        self.workouts.archive_active_programs(&cmd.user_id).await?;

        let prompt = build_workout_prompt(&user, &schedule);
        tracing::info!(user_id = %cmd.user_id, "Generating workout with AI");

        let reply = self.ai.generate(&prompt).await.map_err(DomainError::from)?;
        let generated: GeneratedProgram = parse_reply(&reply)?;

        let now = Timestamp::now();
        let program = WorkoutProgram::new_active(
            cmd.user_id,
            &generated.name,
            Some(generated.description.clone()),
            Some(generated.weekly_split.clone()),
            &prompt,
            now,
        );

        let sessions: Vec<WorkoutSession> = generated
            .sessions
            .iter()
            .map(|s| WorkoutSession {
                id: crate::domain::foundation::WorkoutSessionId::new(),
                program_id: program.id,
                user_id: cmd.user_id,
                day_of_week: s.day_of_week.min(6),
                session_name: s.session_name.clone(),
                session_type: Some(s.session_type.clone()),
                estimated_duration_minutes: Some(s.estimated_duration_minutes),
                exercises: s
                    .exercises
                    .iter()
                    .map(|e| SessionExercise {
                        exercise_name: e.exercise_name.clone(),
                        target_muscle: e.target_muscle.clone(),
                        sets: e.sets,
                        reps: e.reps.clone(),
                        rest_seconds: Some(e.rest_seconds),
                        order_index: e.order_index,
                        notes: e.notes.clone(),
                    })
                    .collect(),
            })
            .collect();

        self.workouts.save_program(&program, &sessions).await?;

        Ok((program, sessions))
    }
}

/// Builds the generation prompt from profile data and availability.
fn build_workout_prompt(user: &User, schedule: &[ScheduleSlot]) -> String {
    let equipment = if user.gym_access {
        "full gym access".to_string()
    } else if user.home_equipment.is_empty() {
        "no equipment".to_string()
    } else {
        user.home_equipment.join(", ")
    };

    let history = if user.injuries.is_empty() {
        "No injuries reported.".to_string()
    } else {
        format!("Note these injuries: {}", user.injuries.join(", "))
    };

    let availability: Vec<String> = schedule
        .iter()
        .filter(|s| s.available)
        .map(|s| {
            format!(
                "Day {}: {}min in the {}",
                s.day_of_week,
                s.duration_minutes.unwrap_or(60),
                s.preferred_time
                    .map(|t| format!("{:?}", t).to_lowercase())
                    .unwrap_or_else(|| "evening".to_string()),
            )
        })
        .collect();

    let goal = user
        .fitness_goal
        .map(|g| format!("{:?}", g))
        .unwrap_or_else(|| "GeneralHealth".to_string());
    let level = user
        .experience_level
        .map(|l| format!("{:?}", l))
        .unwrap_or_else(|| "Beginner".to_string());

    format!(
        r#"You are a master fitness coach. Generate a personalized 4-week workout program for a user with the following profile:
- Goal: {goal}
- Experience Level: {level}
- Equipment Available: {equipment}
- Health History: {history}
- Weekly Availability:
{availability}

RESPONSE FORMAT:
You MUST return ONLY a valid JSON object with the following structure:
{{
    "name": "Program Name",
    "description": "Brief program description",
    "weekly_split": "Push/Pull/Legs, Full Body, etc.",
    "sessions": [
        {{
            "day_of_week": 0,
            "session_name": "Chest & Triceps",
            "session_type": "Hypertrophy",
            "estimated_duration_minutes": 60,
            "exercises": [
                {{
                    "exercise_name": "Bench Press",
                    "sets": 4,
                    "reps": "8-12",
                    "rest_seconds": 90,
                    "order_index": 1,
                    "target_muscle": "Chest",
                    "notes": "Keep core tight"
                }}
            ]
        }}
    ]
}}

IMPORTANT:
- Only include sessions for available days provided in the schedule.
- Provide a balanced and safe program.
- The JSON must be clean and parseable."#,
        goal = goal,
        level = level,
        equipment = equipment,
        history = history,
        availability = availability.join("\n"),
    )
}
