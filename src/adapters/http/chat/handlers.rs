//! HTTP handlers for the chat endpoints.

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::adapters::http::envelope::{ApiError, ApiResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppState;
use crate::application::handlers::chat::{GetHistoryQuery, SendMessageCommand};
use crate::domain::usage::UsageCategory;

use super::dto::{MessageResponse, SendMessageRequest};

/// POST /api/v1/chat/message
///
/// Entitlement-gated: quota checked before the model call, usage recorded
/// after a successful reply.
pub async fn send_message(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .entitlements
        .check(&user.user_id, UsageCategory::Chat)
        .await?;

    let reply = state
        .send_message_handler()
        .handle(SendMessageCommand {
            user_id: user.user_id,
            message: request.message,
        })
        .await?;

    state
        .entitlements
        .record(&user.user_id, UsageCategory::Chat)
        .await;

    Ok(Json(ApiResponse::data(MessageResponse::from(reply))))
}

/// GET /api/v1/chat/history
pub async fn get_history(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let history = state
        .chat_history_handler()
        .handle(GetHistoryQuery {
            user_id: user.user_id,
        })
        .await?;

    let messages: Vec<MessageResponse> =
        history.into_iter().map(MessageResponse::from).collect();
    Ok(Json(ApiResponse::data(messages)))
}
