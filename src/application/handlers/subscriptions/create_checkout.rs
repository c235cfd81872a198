//! CreateCheckoutHandler - starts a Stripe checkout for a paid plan.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::subscription::SubscriptionPlan;
use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentProvider, SubscriptionRepository,
    UserRepository,
};

/// Stripe price ids per purchasable plan, resolved from configuration at
/// composition time.
#[derive(Debug, Clone)]
pub struct PlanPrices {
    pub base: String,
    pub pro: String,
    pub unlimited: String,
}

impl PlanPrices {
    fn price_for(&self, plan: SubscriptionPlan) -> Option<&str> {
        match plan {
            SubscriptionPlan::Base => Some(&self.base),
            SubscriptionPlan::Pro => Some(&self.pro),
            SubscriptionPlan::Unlimited => Some(&self.unlimited),
            SubscriptionPlan::FreeTrial | SubscriptionPlan::LimitedFree => None,
        }
    }
}

/// Command to create a checkout session.
#[derive(Debug, Clone)]
pub struct CreateCheckoutCommand {
    pub user_id: UserId,
    pub plan: SubscriptionPlan,
    pub success_url: String,
    pub cancel_url: String,
}

/// Handler for checkout creation.
///
/// Creates the Stripe customer lazily on first checkout and stores its id on
/// the subscription record for webhook correlation.
pub struct CreateCheckoutHandler {
    users: Arc<dyn UserRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    payments: Arc<dyn PaymentProvider>,
    prices: PlanPrices,
}

impl CreateCheckoutHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        payments: Arc<dyn PaymentProvider>,
        prices: PlanPrices,
    ) -> Self {
        Self {
            users,
            subscriptions,
            payments,
            prices,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutCommand,
    ) -> Result<CheckoutSession, DomainError> {
        let price_id = self
            .prices
            .price_for(cmd.plan)
            .ok_or_else(|| DomainError::validation("plan", "Plano não disponível para compra"))?
            .to_string();

        let user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "Usuário não encontrado"))?;

        let mut subscription = self
            .subscriptions
            .find_by_user_id(&cmd.user_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::SubscriptionNotFound, "Assinatura não encontrada")
            })?;

        let customer_id = match &subscription.stripe_customer_id {
            Some(id) => id.clone(),
            None => {
                let customer_id = self
                    .payments
                    .create_customer(&cmd.user_id, user.email.as_deref(), user.phone.as_deref())
                    .await
                    .map_err(DomainError::from)?;
                subscription.attach_customer(&customer_id, Timestamp::now());
                self.subscriptions.update(&subscription).await?;
                customer_id
            }
        };

        let session = self
            .payments
            .create_checkout_session(CreateCheckoutRequest {
                customer_id,
                user_id: cmd.user_id,
                plan: cmd.plan,
                price_id,
                success_url: cmd.success_url,
                cancel_url: cmd.cancel_url,
            })
            .await
            .map_err(DomainError::from)?;

        tracing::info!(user_id = %cmd.user_id, session_id = %session.id, "Stripe checkout session created");
        Ok(session)
    }
}
