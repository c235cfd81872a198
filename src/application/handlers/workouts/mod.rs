//! Workout use cases: plan generation, active plan reads, and session logs.

pub(crate) mod generate_plan;
mod get_active_plan;
mod log_session;

pub use generate_plan::{GeneratePlanCommand, GeneratePlanHandler};
pub use get_active_plan::{ActivePlan, GetActivePlanHandler, GetActivePlanQuery};
pub use log_session::{LogSessionCommand, LogSessionHandler, LoggedExerciseInput, SetInput};
