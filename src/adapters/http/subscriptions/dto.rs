//! Request/response DTOs for the subscription endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::subscription::{Subscription, SubscriptionPlan};

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub plan: SubscriptionPlan,
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub id: String,
    pub plan: String,
    pub status: String,
    #[serde(rename = "trialEndsAt")]
    pub trial_ends_at: Option<String>,
    #[serde(rename = "currentPeriodStart")]
    pub current_period_start: String,
    #[serde(rename = "currentPeriodEnd")]
    pub current_period_end: String,
    #[serde(rename = "cancelAtPeriodEnd")]
    pub cancel_at_period_end: bool,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        Self {
            id: subscription.id.to_string(),
            plan: subscription.plan.as_str().to_string(),
            status: subscription.status.as_str().to_string(),
            trial_ends_at: subscription
                .trial_ends_at
                .map(|t| t.as_datetime().to_rfc3339()),
            current_period_start: subscription.current_period_start.as_datetime().to_rfc3339(),
            current_period_end: subscription.current_period_end.as_datetime().to_rfc3339(),
            cancel_at_period_end: subscription.cancel_at_period_end,
        }
    }
}
