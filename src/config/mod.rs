//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the `FITAI`
//! prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use fitai::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod ai;
mod auth;
mod database;
mod email;
mod encryption;
mod error;
mod payment;
mod server;
mod sms;

pub use ai::AiConfig;
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use encryption::EncryptionConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};
pub use sms::SmsConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the FitAI backend. Load using
/// [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Authentication configuration (JWT secrets and expiries)
    pub auth: AuthConfig,

    /// AI provider configuration (Gemini)
    pub ai: AiConfig,

    /// Payment configuration (Stripe)
    pub payment: PaymentConfig,

    /// SMS configuration (Twilio)
    #[serde(default)]
    pub sms: SmsConfig,

    /// Email configuration (Resend)
    #[serde(default)]
    pub email: EmailConfig,

    /// Field encryption configuration (medical conditions at rest)
    pub encryption: EncryptionConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `FITAI` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `FITAI__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `FITAI__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required environment variables are missing or
    /// values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FITAI")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation: URL formats, pool sizes, key prefixes,
    /// and production-specific requirements.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.ai.validate()?;
        self.payment.validate()?;
        self.sms.validate(&self.server.environment)?;
        self.email.validate(&self.server.environment)?;
        self.encryption.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to set environment variables for testing
    fn set_minimal_env() {
        env::set_var("FITAI__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var("FITAI__AUTH__JWT_SECRET", "0123456789abcdef0123456789abcdef");
        env::set_var(
            "FITAI__AUTH__JWT_REFRESH_SECRET",
            "fedcba9876543210fedcba9876543210",
        );
        env::set_var("FITAI__AI__GEMINI_API_KEY", "AIzaTestKey");
        env::set_var("FITAI__PAYMENT__STRIPE_API_KEY", "sk_test_xxx");
        env::set_var("FITAI__PAYMENT__STRIPE_WEBHOOK_SECRET", "whsec_xxx");
        env::set_var("FITAI__PAYMENT__PRICE_BASE", "price_base");
        env::set_var("FITAI__PAYMENT__PRICE_PRO", "price_pro");
        env::set_var("FITAI__PAYMENT__PRICE_UNLIMITED", "price_unlimited");
        env::set_var(
            "FITAI__ENCRYPTION__KEY",
            "an-encryption-key-of-32-characters!!",
        );
    }

    fn clear_env() {
        env::remove_var("FITAI__DATABASE__URL");
        env::remove_var("FITAI__AUTH__JWT_SECRET");
        env::remove_var("FITAI__AUTH__JWT_REFRESH_SECRET");
        env::remove_var("FITAI__AI__GEMINI_API_KEY");
        env::remove_var("FITAI__PAYMENT__STRIPE_API_KEY");
        env::remove_var("FITAI__PAYMENT__STRIPE_WEBHOOK_SECRET");
        env::remove_var("FITAI__PAYMENT__PRICE_BASE");
        env::remove_var("FITAI__PAYMENT__PRICE_PRO");
        env::remove_var("FITAI__PAYMENT__PRICE_UNLIMITED");
        env::remove_var("FITAI__ENCRYPTION__KEY");
        env::remove_var("FITAI__SERVER__PORT");
        env::remove_var("FITAI__SERVER__ENVIRONMENT");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok());
        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("FITAI__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("FITAI__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }
}
