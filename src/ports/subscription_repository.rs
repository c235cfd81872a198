//! Subscription persistence port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::Subscription;

/// Port for subscription record persistence.
///
/// The `user_id` column is unique, so there is never more than one record
/// (and thus one active status) per user.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Inserts a new subscription.
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Updates an existing subscription.
    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Finds the subscription for a user.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Subscription>, DomainError>;

    /// Finds a subscription by Stripe customer id, used by webhook handlers.
    async fn find_by_stripe_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Option<Subscription>, DomainError>;
}
