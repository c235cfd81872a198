//! Subscription domain - plans, statuses, the per-user subscription record,
//! and Stripe webhook verification.

mod plan;
mod status;
mod stripe_event;
mod subscription;
mod webhook_errors;
mod webhook_verifier;

pub use plan::SubscriptionPlan;
pub use status::SubscriptionStatus;
pub use stripe_event::{CheckoutSessionData, InvoiceData, StripeEvent, SubscriptionData};
pub use subscription::{Subscription, TRIAL_DURATION_DAYS};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{SignatureHeader, StripeWebhookVerifier};
