//! Router for the nutrition endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers;
use crate::adapters::http::AppState;

/// Nutrition routes, mounted at `/api/v1/nutrition`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/meal-plan", post(handlers::generate_meal_plan))
        .route("/recipes/search", post(handlers::search_recipes))
        .route("/analyze-photo", post(handlers::analyze_photo))
}
