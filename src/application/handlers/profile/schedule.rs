//! GetWeeklyScheduleHandler - reads the user's training availability.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::ScheduleSlot;
use crate::ports::UserRepository;

/// Query for a user's weekly schedule.
#[derive(Debug, Clone)]
pub struct GetWeeklyScheduleQuery {
    pub user_id: UserId,
}

/// Handler for schedule reads.
pub struct GetWeeklyScheduleHandler {
    users: Arc<dyn UserRepository>,
}

impl GetWeeklyScheduleHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(
        &self,
        query: GetWeeklyScheduleQuery,
    ) -> Result<Vec<ScheduleSlot>, DomainError> {
        self.users.weekly_schedule(&query.user_id).await
    }
}
