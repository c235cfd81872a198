//! Bearer token authentication middleware and extractor.
//!
//! The middleware validates `Authorization: Bearer <token>` through the
//! `TokenService` port and injects [`AuthenticatedUser`] into request
//! extensions. Handlers opt in with the [`RequireAuth`] extractor; routes
//! without it stay public.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::TokenService;

/// Middleware validating bearer tokens.
///
/// A missing token passes through without injecting a user; an invalid or
/// expired token short-circuits with 401.
pub async fn auth_middleware(
    State(tokens): State<Arc<dyn TokenService>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) => match tokens.validate_access(token) {
            Ok(user) => {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
            Err(err) => {
                let (message, code) = match err {
                    AuthError::TokenExpired => ("Token expirado", "TOKEN_EXPIRED"),
                    _ => ("Token inválido", "TOKEN_INVALID"),
                };
                (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({
                        "error": code,
                        "message": message,
                        "statusCode": 401,
                    })),
                )
                    .into_response()
            }
        },
        None => next.run(request).await,
    }
}

/// Extractor requiring an authenticated user.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection)
        })
    }
}

/// Rejection for missing authentication.
#[derive(Debug, Clone)]
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": "UNAUTHORIZED",
                "message": "Não autorizado",
                "statusCode": 401,
            })),
        )
            .into_response()
    }
}
