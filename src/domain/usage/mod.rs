//! Usage metering domain - daily counters and plan-derived quotas.

mod daily_usage;
mod quota;

pub use daily_usage::{DailyUsage, UsageDate};
pub use quota::{PlanQuotas, UsageCategory};
