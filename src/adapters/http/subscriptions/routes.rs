//! Routers for the subscription endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers;
use crate::adapters::http::AppState;

/// Subscription routes, mounted at `/api/v1/subscriptions`. Bearer auth.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_subscription))
        .route("/checkout", post(handlers::create_checkout))
        .route("/cancel", post(handlers::cancel_subscription))
}

/// Webhook routes, mounted at `/api/v1/webhooks`. No bearer auth; the
/// delivery is authenticated by its signature.
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/stripe", post(handlers::stripe_webhook))
}
