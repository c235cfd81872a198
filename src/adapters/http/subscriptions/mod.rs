//! Subscription and webhook endpoints.

mod dto;
mod handlers;
mod routes;

pub use routes::{routes, webhook_routes};
