//! Router for the workout endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers;
use crate::adapters::http::AppState;

/// Workout routes, mounted at `/api/v1/workouts`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(handlers::generate_plan))
        .route("/active", get(handlers::get_active_plan))
        .route("/log", post(handlers::log_session))
}
