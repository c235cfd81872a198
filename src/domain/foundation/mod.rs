//! Foundation types shared across the domain layer.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    ChatMessageId, PhotoId, ProgramId, SubscriptionId, UserId, VerificationCodeId, WorkoutLogId,
    WorkoutSessionId,
};
pub use timestamp::Timestamp;
