//! Uniform response envelopes and error mapping.
//!
//! Success bodies are `{success, message, data}`; error bodies are
//! `{error, message, statusCode, details}` with conventional HTTP status
//! semantics. Infrastructure errors are masked to a generic message so
//! internals never leak to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Standard success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success with payload.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Success with payload and message.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Success with a message only.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Error envelope produced from a [`DomainError`].
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

/// Maps an error code onto its HTTP status.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::InvalidFormat
        | ErrorCode::CodeExpired
        | ErrorCode::CodeInvalid
        | ErrorCode::TooManyAttempts
        | ErrorCode::ProfileIncomplete
        | ErrorCode::ProfileAlreadyComplete
        | ErrorCode::NoActiveSubscription
        | ErrorCode::WebhookInvalid => StatusCode::BAD_REQUEST,

        ErrorCode::Unauthorized
        | ErrorCode::TokenExpired
        | ErrorCode::TokenInvalid
        | ErrorCode::InvalidCredentials
        | ErrorCode::EmailNotVerified => StatusCode::UNAUTHORIZED,

        ErrorCode::QuotaExceeded => StatusCode::FORBIDDEN,

        ErrorCode::UserNotFound
        | ErrorCode::SubscriptionNotFound
        | ErrorCode::WorkoutNotFound => StatusCode::NOT_FOUND,

        ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,

        ErrorCode::GenerationFailed
        | ErrorCode::PaymentFailed
        | ErrorCode::DeliveryFailed
        | ErrorCode::EncryptionFailed
        | ErrorCode::DatabaseError
        | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// True for codes whose message must never reach the client.
fn is_masked(code: ErrorCode) -> bool {
    matches!(
        code,
        ErrorCode::DatabaseError | ErrorCode::EncryptionFailed | ErrorCode::InternalError
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.code);

        tracing::error!(
            code = %self.0.code,
            status = status.as_u16(),
            message = %self.0.message,
            "Request failed"
        );

        let (message, details) = if is_masked(self.0.code) {
            ("Erro interno do servidor".to_string(), None)
        } else {
            (self.0.message, self.0.details)
        };

        let body = serde_json::json!({
            "error": self.0.code.to_string(),
            "message": message,
            "statusCode": status.as_u16(),
            "details": details,
        });

        (status, Json(body)).into_response()
    }
}
