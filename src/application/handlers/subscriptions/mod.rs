//! Subscription use cases: status reads, checkout, cancellation, and the
//! billing webhook.

mod cancel_subscription;
mod create_checkout;
mod get_subscription;
mod handle_stripe_webhook;

pub use cancel_subscription::{CancelSubscriptionCommand, CancelSubscriptionHandler};
pub use create_checkout::{
    CreateCheckoutCommand, CreateCheckoutHandler, PlanPrices,
};
pub use get_subscription::{GetSubscriptionHandler, GetSubscriptionQuery};
pub use handle_stripe_webhook::{
    HandleStripeWebhookCommand, HandleStripeWebhookHandler, WebhookDisposition,
};
