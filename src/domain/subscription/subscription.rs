//! The per-user subscription aggregate.

use serde::{Deserialize, Serialize};

use super::{SubscriptionPlan, SubscriptionStatus};
use crate::domain::foundation::{SubscriptionId, Timestamp, UserId};

/// Length of the signup trial in days.
pub const TRIAL_DURATION_DAYS: i64 = 15;

/// A user's subscription record.
///
/// There is exactly one per user; webhook events from the billing provider
/// drive all transitions after the initial trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub plan: SubscriptionPlan,
    pub status: SubscriptionStatus,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub trial_ends_at: Option<Timestamp>,
    pub current_period_start: Timestamp,
    pub current_period_end: Timestamp,
    pub cancel_at_period_end: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Subscription {
    /// Creates the trial subscription granted at first signup.
    pub fn start_trial(user_id: UserId, now: Timestamp) -> Self {
        let trial_ends_at = now.add_days(TRIAL_DURATION_DAYS);
        Self {
            id: SubscriptionId::new(),
            user_id,
            plan: SubscriptionPlan::FreeTrial,
            status: SubscriptionStatus::Trialing,
            stripe_customer_id: None,
            stripe_subscription_id: None,
            trial_ends_at: Some(trial_ends_at),
            current_period_start: now,
            current_period_end: trial_ends_at,
            cancel_at_period_end: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Records the Stripe customer created for this user on first checkout.
    pub fn attach_customer(&mut self, customer_id: impl Into<String>, now: Timestamp) {
        self.stripe_customer_id = Some(customer_id.into());
        self.updated_at = now;
    }

    /// Applies a completed checkout: the plan from the session metadata
    /// becomes active and the provider subscription id is stored.
    pub fn activate_plan(
        &mut self,
        plan: SubscriptionPlan,
        stripe_subscription_id: impl Into<String>,
        now: Timestamp,
    ) {
        self.plan = plan;
        self.status = SubscriptionStatus::Active;
        self.stripe_subscription_id = Some(stripe_subscription_id.into());
        self.trial_ends_at = None;
        self.cancel_at_period_end = false;
        self.updated_at = now;
    }

    /// Syncs status and billing period bounds from a provider
    /// `customer.subscription.updated` event.
    pub fn sync_from_provider(
        &mut self,
        status: SubscriptionStatus,
        period_start: Timestamp,
        period_end: Timestamp,
        cancel_at_period_end: bool,
        now: Timestamp,
    ) {
        self.status = status;
        self.current_period_start = period_start;
        self.current_period_end = period_end;
        self.cancel_at_period_end = cancel_at_period_end;
        self.updated_at = now;
    }

    /// Applies a provider-side deletion: the user drops to the limited free
    /// plan and the provider subscription id is cleared.
    pub fn downgrade_to_limited_free(&mut self, now: Timestamp) {
        self.plan = SubscriptionPlan::LimitedFree;
        self.status = SubscriptionStatus::Canceled;
        self.stripe_subscription_id = None;
        self.cancel_at_period_end = false;
        self.updated_at = now;
    }

    /// Marks the subscription past due after a failed renewal payment.
    pub fn mark_past_due(&mut self, now: Timestamp) {
        self.status = SubscriptionStatus::PastDue;
        self.updated_at = now;
    }

    /// Records a user-requested cancellation at the end of the current
    /// billing period.
    pub fn schedule_cancellation(&mut self, now: Timestamp) {
        self.cancel_at_period_end = true;
        self.updated_at = now;
    }

    /// Returns true if the trial window has passed.
    pub fn trial_expired(&self, now: Timestamp) -> bool {
        matches!(self.status, SubscriptionStatus::Trialing)
            && self
                .trial_ends_at
                .map(|ends| now.is_after(&ends))
                .unwrap_or(false)
    }
}
