//! GetSubscriptionHandler - reads the user's subscription record.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::subscription::Subscription;
use crate::ports::SubscriptionRepository;

/// Query for the current user's subscription.
#[derive(Debug, Clone)]
pub struct GetSubscriptionQuery {
    pub user_id: UserId,
}

/// Handler for subscription reads.
pub struct GetSubscriptionHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl GetSubscriptionHandler {
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }

    pub async fn handle(&self, query: GetSubscriptionQuery) -> Result<Subscription, DomainError> {
        self.subscriptions
            .find_by_user_id(&query.user_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::SubscriptionNotFound, "Assinatura não encontrada")
            })
    }
}
