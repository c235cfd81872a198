//! Router for the chat endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers;
use crate::adapters::http::AppState;

/// Chat routes, mounted at `/api/v1/chat`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/message", post(handlers::send_message))
        .route("/history", get(handlers::get_history))
}
