//! Payment configuration (Stripe)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::subscription::SubscriptionPlan;

/// Payment configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key
    pub stripe_api_key: Secret<String>,

    /// Stripe webhook signing secret
    pub stripe_webhook_secret: Secret<String>,

    /// Base URL for the Stripe API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Price ID for the base plan
    pub price_base: String,

    /// Price ID for the pro plan
    pub price_pro: String,

    /// Price ID for the unlimited plan
    pub price_unlimited: String,
}

impl PaymentConfig {
    /// Expose the API key for making requests
    pub fn api_key(&self) -> &str {
        self.stripe_api_key.expose_secret()
    }

    /// Expose the webhook signing secret for verification
    pub fn webhook_secret(&self) -> &str {
        self.stripe_webhook_secret.expose_secret()
    }

    /// Resolve the Stripe price ID for a purchasable plan.
    ///
    /// Only the paid plans have price IDs; trial and limited-free plans are
    /// never sold through checkout.
    pub fn price_id(&self, plan: SubscriptionPlan) -> Option<&str> {
        match plan {
            SubscriptionPlan::Base => Some(&self.price_base),
            SubscriptionPlan::Pro => Some(&self.price_pro),
            SubscriptionPlan::Unlimited => Some(&self.price_unlimited),
            SubscriptionPlan::FreeTrial | SubscriptionPlan::LimitedFree => None,
        }
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.stripe_api_key.expose_secret().starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !self.stripe_webhook_secret.expose_secret().starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }
        if self.price_base.is_empty() || self.price_pro.is_empty() || self.price_unlimited.is_empty()
        {
            return Err(ValidationError::MissingRequired("STRIPE_PRICE_*"));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://api.stripe.com".to_string()
}
