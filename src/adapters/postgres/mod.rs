//! PostgreSQL implementations of the repository ports, built on sqlx.

mod chat_repository;
mod photo_repository;
mod subscription_repository;
mod usage_store;
mod user_repository;
mod verification_code_repository;
mod workout_repository;

pub use chat_repository::PostgresChatRepository;
pub use photo_repository::PostgresPhotoRepository;
pub use subscription_repository::PostgresSubscriptionRepository;
pub use usage_store::PostgresUsageStore;
pub use user_repository::PostgresUserRepository;
pub use verification_code_repository::PostgresVerificationCodeRepository;
pub use workout_repository::PostgresWorkoutRepository;
