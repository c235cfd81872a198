//! FitAI - AI Fitness Coaching Backend
//!
//! Phone/email authentication, AI-generated workout and nutrition plans,
//! subscription billing, and per-day usage metering behind a JSON HTTP API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
