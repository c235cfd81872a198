//! Router for the profile endpoints.

use axum::routing::{delete, get, post, put};
use axum::Router;

use super::handlers;
use crate::adapters::http::AppState;

/// Profile routes, mounted at `/api/v1/users`. All require a bearer token.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::get_profile))
        .route("/complete", post(handlers::complete_profile))
        .route("/me/update", put(handlers::update_profile))
        .route("/schedule", get(handlers::get_schedule))
        .route("/photos", get(handlers::list_photos).post(handlers::upload_photo))
        .route("/me/delete", delete(handlers::delete_account))
}
