//! Error types for the domain layer.

use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i32,
        max: i32,
        actual: i32,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i32, max: i32, actual: i32) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidFormat,

    // Auth errors
    Unauthorized,
    TokenExpired,
    TokenInvalid,
    InvalidCredentials,
    EmailNotVerified,

    // Verification code errors
    CodeExpired,
    CodeInvalid,
    TooManyAttempts,

    // Rate limiting
    RateLimited,

    // Not found errors
    UserNotFound,
    SubscriptionNotFound,
    WorkoutNotFound,

    // Profile state errors
    ProfileIncomplete,
    ProfileAlreadyComplete,

    // Entitlement errors
    QuotaExceeded,

    // Billing errors
    NoActiveSubscription,
    PaymentFailed,
    WebhookInvalid,

    // AI errors
    GenerationFailed,

    // Infrastructure errors
    DeliveryFailed,
    EncryptionFailed,
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::TokenExpired => "TOKEN_EXPIRED",
            ErrorCode::TokenInvalid => "TOKEN_INVALID",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::EmailNotVerified => "EMAIL_NOT_VERIFIED",
            ErrorCode::CodeExpired => "CODE_EXPIRED",
            ErrorCode::CodeInvalid => "CODE_INVALID",
            ErrorCode::TooManyAttempts => "TOO_MANY_ATTEMPTS",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::SubscriptionNotFound => "SUBSCRIPTION_NOT_FOUND",
            ErrorCode::WorkoutNotFound => "WORKOUT_NOT_FOUND",
            ErrorCode::ProfileIncomplete => "PROFILE_INCOMPLETE",
            ErrorCode::ProfileAlreadyComplete => "PROFILE_ALREADY_COMPLETE",
            ErrorCode::QuotaExceeded => "QUOTA_EXCEEDED",
            ErrorCode::NoActiveSubscription => "NO_ACTIVE_SUBSCRIPTION",
            ErrorCode::PaymentFailed => "PAYMENT_FAILED",
            ErrorCode::WebhookInvalid => "WEBHOOK_INVALID",
            ErrorCode::GenerationFailed => "GENERATION_FAILED",
            ErrorCode::DeliveryFailed => "DELIVERY_FAILED",
            ErrorCode::EncryptionFailed => "ENCRYPTION_FAILED",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional structured details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: Some(serde_json::json!({ "field": field.into() })),
        }
    }

    /// Creates a database error wrapping the underlying cause.
    pub fn database(cause: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DatabaseError, format!("Database error: {}", cause))
    }

    /// Creates a quota-exceeded error carrying machine-readable usage details
    /// so the caller can render an upgrade prompt.
    pub fn quota_exceeded(limit_type: &str, current_usage: u32, max_limit: u32, plan: &str) -> Self {
        Self {
            code: ErrorCode::QuotaExceeded,
            message: "Limite de uso excedido".to_string(),
            details: Some(serde_json::json!({
                "limitType": limit_type,
                "currentUsage": current_usage,
                "maxLimit": max_limit,
                "plan": plan,
                "upgradeRequired": true,
            })),
        }
    }

    /// Attaches structured details to the error.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::new(ErrorCode::ValidationFailed, err.to_string())
    }
}
