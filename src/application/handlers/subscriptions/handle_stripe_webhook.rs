//! HandleStripeWebhookHandler - keeps the local subscription record in sync
//! with billing provider events.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::subscription::{
    StripeEvent, StripeWebhookVerifier, Subscription, SubscriptionPlan,
};
use crate::ports::SubscriptionRepository;

/// Command carrying the raw webhook delivery.
#[derive(Debug, Clone)]
pub struct HandleStripeWebhookCommand {
    /// Raw request body, byte-exact as signed by Stripe.
    pub payload: Vec<u8>,
    /// The `Stripe-Signature` header value.
    pub signature: String,
}

/// What the handler did with the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookDisposition {
    /// Subscription state was updated.
    Processed,
    /// Event was valid but required no local change.
    Acknowledged,
    /// Event type is not one we handle.
    Ignored,
}

/// Handler for the Stripe webhook endpoint.
///
/// Events for unknown customers are logged and acknowledged rather than
/// failed; returning an error would make Stripe retry a delivery that can
/// never succeed.
pub struct HandleStripeWebhookHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
    verifier: StripeWebhookVerifier,
}

impl HandleStripeWebhookHandler {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionRepository>,
        verifier: StripeWebhookVerifier,
    ) -> Self {
        Self {
            subscriptions,
            verifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandleStripeWebhookCommand,
    ) -> Result<WebhookDisposition, DomainError> {
        let event = self
            .verifier
            .verify_and_parse(&cmd.payload, &cmd.signature)?;
        self.apply_event(&event).await
    }

    /// Applies a verified event to the local subscription record.
    pub async fn apply_event(
        &self,
        event: &StripeEvent,
    ) -> Result<WebhookDisposition, DomainError> {
        match event.event_type.as_str() {
            "checkout.session.completed" => self.on_checkout_completed(event).await,
            "customer.subscription.updated" => self.on_subscription_updated(event).await,
            "customer.subscription.deleted" => self.on_subscription_deleted(event).await,
            "invoice.payment_succeeded" => {
                tracing::info!(event_id = %event.id, "Payment succeeded");
                Ok(WebhookDisposition::Acknowledged)
            }
            "invoice.payment_failed" => self.on_payment_failed(event).await,
            other => {
                tracing::info!(event_type = %other, "Unhandled webhook event");
                Ok(WebhookDisposition::Ignored)
            }
        }
    }

    async fn on_checkout_completed(
        &self,
        event: &StripeEvent,
    ) -> Result<WebhookDisposition, DomainError> {
        let session = event.as_checkout_session()?;

        let plan = session
            .plan
            .as_deref()
            .and_then(|p| p.parse::<SubscriptionPlan>().ok());
        let (Some(plan), Some(subscription_id)) = (plan, session.subscription_id.clone()) else {
            tracing::error!(session_id = %session.session_id, "Missing metadata in checkout session");
            return Ok(WebhookDisposition::Acknowledged);
        };

        let Some(mut subscription) = self.find_for_customer(&session.customer_id).await? else {
            return Ok(WebhookDisposition::Acknowledged);
        };

        subscription.activate_plan(plan, subscription_id, Timestamp::now());
        self.subscriptions.update(&subscription).await?;

        tracing::info!(user_id = %subscription.user_id, plan = %plan, "Checkout completed and subscription updated");
        Ok(WebhookDisposition::Processed)
    }

    async fn on_subscription_updated(
        &self,
        event: &StripeEvent,
    ) -> Result<WebhookDisposition, DomainError> {
        let data = event.as_subscription()?;

        let Some(mut subscription) = self.find_for_customer(&data.customer_id).await? else {
            return Ok(WebhookDisposition::Acknowledged);
        };

        subscription.sync_from_provider(
            data.status,
            data.current_period_start
                .unwrap_or(subscription.current_period_start),
            data.current_period_end
                .unwrap_or(subscription.current_period_end),
            data.cancel_at_period_end,
            Timestamp::now(),
        );
        self.subscriptions.update(&subscription).await?;

        tracing::info!(user_id = %subscription.user_id, "Subscription updated");
        Ok(WebhookDisposition::Processed)
    }

    async fn on_subscription_deleted(
        &self,
        event: &StripeEvent,
    ) -> Result<WebhookDisposition, DomainError> {
        let data = event.as_subscription()?;

        let Some(mut subscription) = self.find_for_customer(&data.customer_id).await? else {
            return Ok(WebhookDisposition::Acknowledged);
        };

        subscription.downgrade_to_limited_free(Timestamp::now());
        self.subscriptions.update(&subscription).await?;

        tracing::info!(user_id = %subscription.user_id, "Subscription canceled, downgraded to limited_free");
        Ok(WebhookDisposition::Processed)
    }

    async fn on_payment_failed(
        &self,
        event: &StripeEvent,
    ) -> Result<WebhookDisposition, DomainError> {
        let invoice = event.as_invoice()?;

        let Some(mut subscription) = self.find_for_customer(&invoice.customer_id).await? else {
            return Ok(WebhookDisposition::Acknowledged);
        };

        subscription.mark_past_due(Timestamp::now());
        self.subscriptions.update(&subscription).await?;

        tracing::warn!(user_id = %subscription.user_id, "Payment failed, subscription past due");
        Ok(WebhookDisposition::Processed)
    }

    async fn find_for_customer(
        &self,
        customer_id: &str,
    ) -> Result<Option<Subscription>, DomainError> {
        let found = self
            .subscriptions
            .find_by_stripe_customer_id(customer_id)
            .await?;
        if found.is_none() {
            tracing::warn!(customer_id = %customer_id, "Subscription not found for customer");
        }
        Ok(found)
    }
}
