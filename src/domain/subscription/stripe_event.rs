//! Stripe webhook event envelope and typed payload extraction.
//!
//! Stripe delivers every event as `{id, type, created, data: {object}}` where
//! the shape of `object` depends on the event type. The envelope is parsed
//! generically and the handlers pull out the typed view they need.

use serde::Deserialize;
use serde_json::Value;

use super::{SubscriptionStatus, WebhookError};
use crate::domain::foundation::Timestamp;

/// Raw Stripe event envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeEvent {
    /// Event id (`evt_...`).
    pub id: String,
    /// Event type, e.g. `checkout.session.completed`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Unix timestamp when the event was created.
    pub created: i64,
    /// Whether the event originates from live mode.
    #[serde(default)]
    pub livemode: bool,
    /// Event payload wrapper.
    pub data: StripeEventData,
}

/// The `data` wrapper around the event object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeEventData {
    /// The API object the event describes, shape varies by event type.
    pub object: Value,
}

impl StripeEvent {
    /// Returns true if this is a live-mode event.
    pub fn is_live(&self) -> bool {
        self.livemode
    }

    /// Extracts a checkout session view from a
    /// `checkout.session.completed` event.
    pub fn as_checkout_session(&self) -> Result<CheckoutSessionData, WebhookError> {
        let object = &self.data.object;
        Ok(CheckoutSessionData {
            session_id: require_str(object, "id")?,
            customer_id: require_str(object, "customer")?,
            subscription_id: object
                .get("subscription")
                .and_then(Value::as_str)
                .map(String::from),
            user_id: metadata_str(object, "user_id"),
            plan: metadata_str(object, "plan"),
        })
    }

    /// Extracts a subscription view from `customer.subscription.updated` or
    /// `customer.subscription.deleted` events.
    pub fn as_subscription(&self) -> Result<SubscriptionData, WebhookError> {
        let object = &self.data.object;
        let status = object
            .get("status")
            .and_then(Value::as_str)
            .map(map_provider_status)
            .unwrap_or(SubscriptionStatus::Active);

        Ok(SubscriptionData {
            subscription_id: require_str(object, "id")?,
            customer_id: require_str(object, "customer")?,
            status,
            current_period_start: object
                .get("current_period_start")
                .and_then(Value::as_i64)
                .map(Timestamp::from_unix_secs),
            current_period_end: object
                .get("current_period_end")
                .and_then(Value::as_i64)
                .map(Timestamp::from_unix_secs),
            cancel_at_period_end: object
                .get("cancel_at_period_end")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })
    }

    /// Extracts an invoice view from `invoice.payment_failed` /
    /// `invoice.payment_succeeded` events.
    pub fn as_invoice(&self) -> Result<InvoiceData, WebhookError> {
        let object = &self.data.object;
        Ok(InvoiceData {
            invoice_id: require_str(object, "id")?,
            customer_id: require_str(object, "customer")?,
            subscription_id: object
                .get("subscription")
                .and_then(Value::as_str)
                .map(String::from),
        })
    }
}

/// Typed view of a completed checkout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSessionData {
    pub session_id: String,
    pub customer_id: String,
    pub subscription_id: Option<String>,
    pub user_id: Option<String>,
    pub plan: Option<String>,
}

/// Typed view of a provider subscription object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionData {
    pub subscription_id: String,
    pub customer_id: String,
    pub status: SubscriptionStatus,
    pub current_period_start: Option<Timestamp>,
    pub current_period_end: Option<Timestamp>,
    pub cancel_at_period_end: bool,
}

/// Typed view of an invoice object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceData {
    pub invoice_id: String,
    pub customer_id: String,
    pub subscription_id: Option<String>,
}

/// Maps Stripe subscription statuses onto our status enum.
fn map_provider_status(status: &str) -> SubscriptionStatus {
    match status {
        "trialing" => SubscriptionStatus::Trialing,
        "past_due" | "unpaid" => SubscriptionStatus::PastDue,
        "canceled" | "incomplete_expired" => SubscriptionStatus::Canceled,
        // incomplete/active and anything Stripe adds later count as active
        _ => SubscriptionStatus::Active,
    }
}

fn require_str(object: &Value, field: &str) -> Result<String, WebhookError> {
    object
        .get(field)
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| WebhookError::ParseError(format!("missing field '{}'", field)))
}

fn metadata_str(object: &Value, field: &str) -> Option<String> {
    object
        .get("metadata")
        .and_then(|m| m.get(field))
        .and_then(Value::as_str)
        .map(String::from)
}
