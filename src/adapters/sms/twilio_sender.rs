//! Twilio adapter - implementation of SmsSender against the Twilio REST API.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::SmsConfig;
use crate::ports::{DeliveryError, SmsSender};

/// Twilio REST adapter.
///
/// Without credentials every send fails with `NotConfigured`; the handler
/// layer decides whether that is fatal (production) or logged (development).
pub struct TwilioSmsSender {
    config: SmsConfig,
    client: Client,
}

impl TwilioSmsSender {
    /// Creates an adapter from the SMS configuration.
    pub fn new(config: SmsConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl SmsSender for TwilioSmsSender {
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<(), DeliveryError> {
        let (Some(account_sid), Some(auth_token), Some(from)) = (
            self.config.twilio_account_sid.as_deref(),
            self.config.auth_token(),
            self.config.twilio_from_number.as_deref(),
        ) else {
            return Err(DeliveryError::NotConfigured);
        };

        let body = format!("Seu código de verificação FitAI: {}", code);
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.base_url, account_sid,
        );

        let response = self
            .client
            .post(url)
            .basic_auth(account_sid, Some(auth_token))
            .form(&[("To", phone), ("From", from), ("Body", &body)])
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

        tracing::info!(phone = %phone, "Verification code sent via Twilio");
        Ok(())
    }
}
