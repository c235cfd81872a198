//! Payment provider port - interface to the billing service.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::subscription::SubscriptionPlan;

/// Request to start a checkout flow for a paid plan.
#[derive(Debug, Clone)]
pub struct CreateCheckoutRequest {
    pub customer_id: String,
    pub user_id: UserId,
    pub plan: SubscriptionPlan,
    pub price_id: String,
    pub success_url: String,
    pub cancel_url: String,
}

/// A created checkout session the client is redirected to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

/// Port for billing provider calls.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Creates a billing customer for the user, returning the customer id.
    async fn create_customer(
        &self,
        user_id: &UserId,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<String, PaymentError>;

    /// Creates a checkout session for a subscription purchase.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;

    /// Schedules a provider-side cancellation at the end of the current
    /// billing period.
    async fn cancel_at_period_end(&self, subscription_id: &str) -> Result<(), PaymentError>;
}

/// Payment provider errors.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("network error: {0}")]
    Network(String),

    #[error("provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),
}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        tracing::error!(error = %err, "Payment provider call failed");
        DomainError::new(ErrorCode::PaymentFailed, "Falha ao criar sessão de pagamento")
    }
}
