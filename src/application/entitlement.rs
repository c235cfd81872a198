//! Entitlement gate - the check-then-increment pair guarding AI-cost
//! endpoints.
//!
//! `check` compares today's counter for a usage category against the quota
//! derived from the user's subscription plan. `record` is called only after
//! the gated action succeeds and bumps the counter with a plain
//! read-then-write; a failure there is logged and swallowed because the
//! user-visible action has already happened.
//!
//! Day rollover is implicit: the row for a new date does not exist yet, so
//! counters start from zero without any reset job.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::usage::{DailyUsage, PlanQuotas, UsageCategory, UsageDate};
use crate::ports::{SubscriptionRepository, UsageStore};

/// Gate for usage-metered endpoints.
pub struct EntitlementGate {
    subscriptions: Arc<dyn SubscriptionRepository>,
    usage: Arc<dyn UsageStore>,
    /// UTC offset applied when deriving the day key.
    day_offset_hours: i8,
}

impl EntitlementGate {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionRepository>,
        usage: Arc<dyn UsageStore>,
        day_offset_hours: i8,
    ) -> Self {
        Self {
            subscriptions,
            usage,
            day_offset_hours,
        }
    }

    fn today(&self) -> UsageDate {
        UsageDate::today(self.day_offset_hours)
    }

    /// Decides whether a gated action may proceed.
    ///
    /// Fails with `SubscriptionNotFound` when the user has no subscription
    /// record, and with `QuotaExceeded` (carrying current count, limit, and
    /// plan name) when today's counter has reached the plan's limit.
    pub async fn check(
        &self,
        user_id: &UserId,
        category: UsageCategory,
    ) -> Result<(), DomainError> {
        let subscription = self
            .subscriptions
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    crate::domain::foundation::ErrorCode::SubscriptionNotFound,
                    "Assinatura não encontrada",
                )
            })?;

        let quotas = PlanQuotas::for_plan(subscription.plan);
        let limit = match quotas.limit_for(category) {
            Some(limit) => limit,
            // Unlimited category: skip the counter read entirely
            None => return Ok(()),
        };

        let current = self
            .usage
            .find(user_id, self.today())
            .await?
            .map(|row| row.count(category))
            .unwrap_or(0);

        if current >= limit {
            tracing::warn!(
                user_id = %user_id,
                limit_type = category.counter_name(),
                current_usage = current,
                max_limit = limit,
                plan = subscription.plan.as_str(),
                "Usage limit exceeded"
            );
            return Err(DomainError::quota_exceeded(
                category.counter_name(),
                current,
                limit,
                subscription.plan.as_str(),
            ));
        }

        Ok(())
    }

    /// Records one successful gated action.
    ///
    /// Read-then-write without atomicity: two concurrent requests can read
    /// the same prior value and undercount by one. Errors are logged and
    /// swallowed so the primary request never fails here.
    pub async fn record(&self, user_id: &UserId, category: UsageCategory) {
        if let Err(err) = self.try_record(user_id, category).await {
            tracing::error!(
                user_id = %user_id,
                limit_type = category.counter_name(),
                error = %err,
                "Failed to increment usage"
            );
        }
    }

    async fn try_record(
        &self,
        user_id: &UserId,
        category: UsageCategory,
    ) -> Result<(), DomainError> {
        let today = self.today();
        match self.usage.find(user_id, today).await? {
            Some(mut row) => {
                row.increment(category);
                self.usage.update(&row).await
            }
            None => {
                let mut row = DailyUsage::empty(*user_id, today);
                row.increment(category);
                self.usage.insert(&row).await
            }
        }
    }
}
