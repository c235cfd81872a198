//! Resend adapter - implementation of EmailSender against the Resend REST
//! API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::config::EmailConfig;
use crate::ports::{DeliveryError, EmailSender};

/// Resend REST adapter.
pub struct ResendEmailSender {
    config: EmailConfig,
    client: Client,
}

impl ResendEmailSender {
    /// Creates an adapter from the email configuration.
    pub fn new(config: EmailConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    async fn send(&self, to: &str, subject: &str, text: String) -> Result<(), DeliveryError> {
        let Some(api_key) = self.config.api_key() else {
            return Err(DeliveryError::NotConfigured);
        };

        let request = SendEmailRequest {
            from: self.config.from_address.clone(),
            to: vec![to.to_string()],
            subject: subject.to_string(),
            text,
        };

        let response = self
            .client
            .post(format!("{}/emails", self.config.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DeliveryError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(to = %to, subject = %subject, "Email sent");
        Ok(())
    }
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), DeliveryError> {
        self.send(
            email,
            "FitAI - Código de Verificação",
            format!(
                "Seu código de verificação é: {}. Este código expira em 10 minutos.",
                code
            ),
        )
        .await
    }

    async fn send_password_reset_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<(), DeliveryError> {
        self.send(
            email,
            "FitAI - Recuperação de Senha",
            format!("Seu código para redefinir a senha é: {}.", code),
        )
        .await
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_sender_reports_not_configured() {
        let sender = ResendEmailSender::new(EmailConfig::default());
        let result = sender.send_verification_code("a@b.com", "123456").await;
        assert!(matches!(result, Err(DeliveryError::NotConfigured)));
    }
}
