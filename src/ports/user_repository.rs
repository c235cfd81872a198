//! User persistence port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{ScheduleSlot, User};

/// Port for user account persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user.
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Updates an existing user.
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    /// Finds a user by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Finds a user by phone number.
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError>;

    /// Finds a user by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Returns the user's weekly schedule ordered by day of week.
    async fn weekly_schedule(&self, user_id: &UserId) -> Result<Vec<ScheduleSlot>, DomainError>;

    /// Replaces the user's weekly schedule.
    async fn replace_weekly_schedule(
        &self,
        user_id: &UserId,
        slots: &[ScheduleSlot],
    ) -> Result<(), DomainError>;
}
