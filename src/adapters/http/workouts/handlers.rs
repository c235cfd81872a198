//! HTTP handlers for the workout endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::envelope::{ApiError, ApiResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppState;
use crate::application::handlers::workouts::{
    GeneratePlanCommand, GetActivePlanQuery, LogSessionCommand, LoggedExerciseInput, SetInput,
};
use crate::domain::foundation::DomainError;

use super::dto::{LogResponse, LogSessionRequest, ProgramResponse};

/// POST /api/v1/workouts/generate
pub async fn generate_plan(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let (program, sessions) = state
        .generate_plan_handler()
        .handle(GeneratePlanCommand {
            user_id: user.user_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Treino gerado com sucesso",
            ProgramResponse::from_tree(&program, &sessions),
        )),
    ))
}

/// GET /api/v1/workouts/active
pub async fn get_active_plan(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let plan = state
        .get_active_plan_handler()
        .handle(GetActivePlanQuery {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(ApiResponse {
        success: true,
        message: None,
        data: Some(plan.map(ProgramResponse::from)),
    }))
}

/// POST /api/v1/workouts/log
pub async fn log_session(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<LogSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = request
        .session_id
        .parse()
        .map_err(|_| ApiError(DomainError::validation("session_id", "Identificador inválido")))?;

    let log = state
        .log_session_handler()
        .handle(LogSessionCommand {
            user_id: user.user_id,
            session_id,
            duration_minutes: request.duration_minutes,
            exercises: request
                .exercises
                .into_iter()
                .map(|e| LoggedExerciseInput {
                    exercise_name: e.exercise_name,
                    sets: e
                        .sets
                        .into_iter()
                        .map(|s| SetInput {
                            reps: s.reps,
                            weight_kg: s.weight,
                            completed: s.completed,
                        })
                        .collect(),
                })
                .collect(),
            notes: request.notes,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Treino registrado com sucesso",
            LogResponse::from(log),
        )),
    ))
}
