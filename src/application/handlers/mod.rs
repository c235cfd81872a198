//! Use case handlers grouped by API area.

pub mod auth;
pub mod chat;
pub mod nutrition;
pub mod profile;
pub mod subscriptions;
pub mod workouts;
