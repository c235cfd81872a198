//! User domain - profile, enumerated attributes, progress photos, and
//! weekly schedule.

mod photo;
mod profile;
mod schedule;

pub use photo::ProgressPhoto;
pub use profile::{
    ActivityLevel, ExperienceLevel, FitnessGoal, Gender, ProfileUpdate, Units, User,
};
pub use schedule::{PreferredTime, ScheduleSlot};
