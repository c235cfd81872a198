//! Request/response DTOs for the auth endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SendCodeRequest {
    pub phone: String,
    #[serde(rename = "countryCode")]
    pub country_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyCodeRequest {
    pub phone: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailSignupRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct TokensResponse {
    pub token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    #[serde(rename = "isNewUser")]
    pub is_new_user: bool,
}

#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_code_request_accepts_camel_case() {
        let body = r#"{"phone":"+351912345678","countryCode":"+351"}"#;
        let request: SendCodeRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.phone, "+351912345678");
        assert_eq!(request.country_code.as_deref(), Some("+351"));
    }

    #[test]
    fn tokens_response_serializes_camel_case() {
        let response = TokensResponse {
            token: "a".to_string(),
            refresh_token: "r".to_string(),
            is_new_user: true,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["refreshToken"], "r");
        assert_eq!(value["isNewUser"], true);
    }
}
