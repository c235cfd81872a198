//! Router for the auth endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers;
use crate::adapters::http::AppState;

/// Auth routes, mounted at `/api/v1/auth`. All public; the tighter auth
/// rate limiter wraps this router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/send-code", post(handlers::send_code))
        .route("/verify-code", post(handlers::verify_code))
        .route("/refresh", post(handlers::refresh))
        .route("/signup/email", post(handlers::signup_email))
        .route("/verify/email", post(handlers::verify_email))
        .route("/login/email", post(handlers::login_email))
        .route("/forgot-password", post(handlers::forgot_password))
        .route("/reset-password", post(handlers::reset_password))
}
