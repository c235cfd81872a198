//! Stripe adapter - implementation of PaymentProvider against the Stripe
//! REST API.
//!
//! Stripe's API takes form-encoded bodies and bearer authentication with the
//! secret key. Webhook verification is not here: it lives in the domain
//! (`StripeWebhookVerifier`) because it is pure computation over the raw
//! payload.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::PaymentConfig;
use crate::domain::foundation::UserId;
use crate::ports::{CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentProvider};

/// Stripe REST adapter.
pub struct StripeAdapter {
    config: PaymentConfig,
    client: Client,
}

impl StripeAdapter {
    /// Creates an adapter from the payment configuration.
    pub fn new(config: PaymentConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    async fn post_form(
        &self,
        path: &str,
        form: &[(String, String)],
    ) -> Result<serde_json::Value, PaymentError> {
        let response = self
            .client
            .post(format!("{}{}", self.config.base_url, path))
            .bearer_auth(self.config.api_key())
            .form(form)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<StripeErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(PaymentError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| PaymentError::Parse(e.to_string()))
    }
}

#[async_trait]
impl PaymentProvider for StripeAdapter {
    async fn create_customer(
        &self,
        user_id: &UserId,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<String, PaymentError> {
        let mut form = vec![("metadata[user_id]".to_string(), user_id.to_string())];
        if let Some(email) = email {
            form.push(("email".to_string(), email.to_string()));
        }
        if let Some(phone) = phone {
            form.push(("phone".to_string(), phone.to_string()));
        }

        let value = self.post_form("/v1/customers", &form).await?;
        value
            .get("id")
            .and_then(serde_json::Value::as_str)
            .map(String::from)
            .ok_or_else(|| PaymentError::Parse("customer response missing id".to_string()))
    }

    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let form = vec![
            ("customer".to_string(), request.customer_id),
            ("mode".to_string(), "subscription".to_string()),
            ("payment_method_types[0]".to_string(), "card".to_string()),
            ("line_items[0][price]".to_string(), request.price_id),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
            ("success_url".to_string(), request.success_url),
            ("cancel_url".to_string(), request.cancel_url),
            (
                "metadata[user_id]".to_string(),
                request.user_id.to_string(),
            ),
            ("metadata[plan]".to_string(), request.plan.to_string()),
            // the same metadata must land on the checkout session object the
            // webhook receives
            (
                "subscription_data[metadata][user_id]".to_string(),
                request.user_id.to_string(),
            ),
        ];

        let value = self.post_form("/v1/checkout/sessions", &form).await?;
        let session: CheckoutSessionBody =
            serde_json::from_value(value).map_err(|e| PaymentError::Parse(e.to_string()))?;

        Ok(CheckoutSession {
            id: session.id,
            url: session.url.unwrap_or_default(),
        })
    }

    async fn cancel_at_period_end(&self, subscription_id: &str) -> Result<(), PaymentError> {
        let form = vec![("cancel_at_period_end".to_string(), "true".to_string())];
        self.post_form(&format!("/v1/subscriptions/{}", subscription_id), &form)
            .await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct CheckoutSessionBody {
    id: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_session_body_parses() {
        let body = r#"{"id":"cs_123","url":"https://checkout.stripe.com/pay/cs_123"}"#;
        let session: CheckoutSessionBody = serde_json::from_str(body).unwrap();
        assert_eq!(session.id, "cs_123");
        assert!(session.url.is_some());
    }

    #[test]
    fn stripe_error_body_parses() {
        let body = r#"{"error":{"message":"No such customer","type":"invalid_request_error"}}"#;
        let parsed: StripeErrorBody = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "No such customer");
    }
}
