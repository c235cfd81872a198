//! CancelSubscriptionHandler - schedules cancellation at period end.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::{PaymentProvider, SubscriptionRepository};

/// Command to cancel the user's subscription.
#[derive(Debug, Clone)]
pub struct CancelSubscriptionCommand {
    pub user_id: UserId,
}

/// Handler for cancellation.
///
/// Cancellation always takes effect at the end of the current billing
/// period; the provider keeps charging nothing further and fires a
/// `customer.subscription.deleted` webhook when the period lapses.
pub struct CancelSubscriptionHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
    payments: Arc<dyn PaymentProvider>,
}

impl CancelSubscriptionHandler {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionRepository>,
        payments: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            subscriptions,
            payments,
        }
    }

    pub async fn handle(&self, cmd: CancelSubscriptionCommand) -> Result<(), DomainError> {
        let mut subscription = self
            .subscriptions
            .find_by_user_id(&cmd.user_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::SubscriptionNotFound, "Assinatura não encontrada")
            })?;

        let stripe_subscription_id = subscription
            .stripe_subscription_id
            .clone()
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::NoActiveSubscription,
                    "Sem assinatura ativa para cancelar",
                )
            })?;

        self.payments
            .cancel_at_period_end(&stripe_subscription_id)
            .await
            .map_err(DomainError::from)?;

        subscription.schedule_cancellation(Timestamp::now());
        self.subscriptions.update(&subscription).await?;

        tracing::info!(user_id = %cmd.user_id, "Subscription scheduled for cancellation");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::auth::test_support::MockSubscriptionRepository;
    use crate::application::handlers::subscriptions::create_checkout::tests::MockPayments;
    use crate::domain::subscription::{Subscription, SubscriptionPlan};

    #[tokio::test]
    async fn cancellation_flags_period_end() {
        let subscriptions = Arc::new(MockSubscriptionRepository::new());
        let user_id = UserId::new();
        let mut sub = Subscription::start_trial(user_id, Timestamp::now());
        sub.activate_plan(SubscriptionPlan::Base, "sub_123", Timestamp::now());
        subscriptions.push(sub);
        let payments = Arc::new(MockPayments::new());

        CancelSubscriptionHandler::new(subscriptions.clone(), payments.clone())
            .handle(CancelSubscriptionCommand { user_id })
            .await
            .unwrap();

        assert!(subscriptions.stored()[0].cancel_at_period_end);
        assert_eq!(payments.cancelled.lock().unwrap().as_slice(), ["sub_123"]);
    }

    #[tokio::test]
    async fn trial_without_provider_subscription_cannot_cancel() {
        let subscriptions = Arc::new(MockSubscriptionRepository::new());
        let user_id = UserId::new();
        subscriptions.push(Subscription::start_trial(user_id, Timestamp::now()));

        let err = CancelSubscriptionHandler::new(subscriptions, Arc::new(MockPayments::new()))
            .handle(CancelSubscriptionCommand { user_id })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NoActiveSubscription);
    }
}
