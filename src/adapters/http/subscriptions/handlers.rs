//! HTTP handlers for the subscription endpoints.

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::adapters::http::envelope::{ApiError, ApiResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppState;
use crate::application::handlers::subscriptions::{
    CancelSubscriptionCommand, CreateCheckoutCommand, GetSubscriptionQuery,
    HandleStripeWebhookCommand,
};
use crate::domain::foundation::{DomainError, ErrorCode};

use super::dto::{CheckoutRequest, CheckoutResponse, SubscriptionResponse};

/// GET /api/v1/subscriptions
pub async fn get_subscription(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let subscription = state
        .get_subscription_handler()
        .handle(GetSubscriptionQuery {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(ApiResponse::data(SubscriptionResponse::from(
        subscription,
    ))))
}

/// POST /api/v1/subscriptions/checkout
pub async fn create_checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .create_checkout_handler()
        .handle(CreateCheckoutCommand {
            user_id: user.user_id,
            plan: request.plan,
            success_url: request.success_url,
            cancel_url: request.cancel_url,
        })
        .await?;

    Ok(Json(ApiResponse::data(CheckoutResponse {
        session_id: session.id,
        url: session.url,
    })))
}

/// POST /api/v1/subscriptions/cancel
pub async fn cancel_subscription(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    state
        .cancel_subscription_handler()
        .handle(CancelSubscriptionCommand {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(ApiResponse::message("Assinatura cancelada com sucesso")))
}

/// POST /api/v1/webhooks/stripe
///
/// Takes the raw body: the signature covers the exact bytes Stripe sent, so
/// the payload must not pass through JSON extraction first.
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            ApiError(DomainError::new(
                ErrorCode::WebhookInvalid,
                "Missing Stripe-Signature header",
            ))
        })?
        .to_string();

    state
        .stripe_webhook_handler()
        .handle(HandleStripeWebhookCommand {
            payload: body.to_vec(),
            signature,
        })
        .await?;

    Ok((StatusCode::OK, Json(serde_json::json!({ "received": true }))))
}
