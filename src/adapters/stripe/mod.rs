//! Stripe billing adapter.

mod stripe_adapter;

pub use stripe_adapter::StripeAdapter;
