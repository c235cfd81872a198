//! HTTP handlers for the auth endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::envelope::{ApiError, ApiResponse};
use crate::adapters::http::AppState;
use crate::application::handlers::auth::{
    EmailLoginCommand, EmailSignupCommand, ForgotPasswordCommand, RefreshTokenCommand,
    ResetPasswordCommand, SendPhoneCodeCommand, VerifyEmailCommand, VerifyPhoneCodeCommand,
};

use super::dto::{
    AccessTokenResponse, EmailLoginRequest, EmailSignupRequest, ForgotPasswordRequest,
    RefreshRequest, ResetPasswordRequest, SendCodeRequest, TokensResponse, VerifyCodeRequest,
    VerifyEmailRequest,
};

/// POST /api/v1/auth/send-code
pub async fn send_code(
    State(state): State<AppState>,
    Json(request): Json<SendCodeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .send_phone_code_handler()
        .handle(SendPhoneCodeCommand {
            phone: request.phone,
            country_code: request.country_code,
        })
        .await?;

    Ok(Json(ApiResponse::message("Código enviado com sucesso")))
}

/// POST /api/v1/auth/verify-code
pub async fn verify_code(
    State(state): State<AppState>,
    Json(request): Json<VerifyCodeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tokens = state
        .verify_phone_code_handler()
        .handle(VerifyPhoneCodeCommand {
            phone: request.phone,
            code: request.code,
        })
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Login realizado com sucesso",
        TokensResponse {
            token: tokens.token,
            refresh_token: tokens.refresh_token,
            is_new_user: tokens.is_new_user,
        },
    )))
}

/// POST /api/v1/auth/signup/email
pub async fn signup_email(
    State(state): State<AppState>,
    Json(request): Json<EmailSignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .email_signup_handler()
        .handle(EmailSignupCommand {
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message("Usuário criado. Verifique seu e-mail.")),
    ))
}

/// POST /api/v1/auth/verify/email
pub async fn verify_email(
    State(state): State<AppState>,
    Json(request): Json<VerifyEmailRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tokens = state
        .verify_email_handler()
        .handle(VerifyEmailCommand {
            email: request.email,
            code: request.code,
        })
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Login realizado com sucesso",
        TokensResponse {
            token: tokens.token,
            refresh_token: tokens.refresh_token,
            is_new_user: tokens.is_new_user,
        },
    )))
}

/// POST /api/v1/auth/login/email
pub async fn login_email(
    State(state): State<AppState>,
    Json(request): Json<EmailLoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tokens = state
        .email_login_handler()
        .handle(EmailLoginCommand {
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Login realizado com sucesso",
        TokensResponse {
            token: tokens.token,
            refresh_token: tokens.refresh_token,
            is_new_user: tokens.is_new_user,
        },
    )))
}

/// POST /api/v1/auth/forgot-password
///
/// Always 200, whether or not the address exists.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .forgot_password_handler()
        .handle(ForgotPasswordCommand {
            email: request.email,
        })
        .await?;

    Ok(Json(ApiResponse::message(
        "Se o e-mail existir, um código foi enviado.",
    )))
}

/// POST /api/v1/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .reset_password_handler()
        .handle(ResetPasswordCommand {
            email: request.email,
            code: request.code,
            new_password: request.new_password,
        })
        .await?;

    Ok(Json(ApiResponse::message("Senha alterada com sucesso.")))
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let token = state
        .refresh_token_handler()
        .handle(RefreshTokenCommand {
            refresh_token: request.refresh_token,
        })
        .await?;

    Ok(Json(ApiResponse::data(AccessTokenResponse { token })))
}
