//! Daily usage counter storage port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::usage::{DailyUsage, UsageDate};

/// Port for the per-(user, day) usage counter table.
///
/// The entitlement gate performs a plain read-then-write through this port;
/// there is deliberately no atomic increment. Two concurrent requests can
/// read the same prior value and undercount by one, which is accepted for
/// this workload.
#[async_trait]
pub trait UsageStore: Send + Sync {
    /// Returns the counter row for the (user, day) pair, if one exists.
    async fn find(
        &self,
        user_id: &UserId,
        date: UsageDate,
    ) -> Result<Option<DailyUsage>, DomainError>;

    /// Inserts a fresh counter row.
    async fn insert(&self, usage: &DailyUsage) -> Result<(), DomainError>;

    /// Writes back an updated counter row.
    async fn update(&self, usage: &DailyUsage) -> Result<(), DomainError>;
}
