//! HTTP middleware: bearer authentication and IP rate limiting.

mod auth;
mod rate_limit;

pub use auth::{auth_middleware, RequireAuth};
pub use rate_limit::{rate_limit_middleware, RateLimitState};
