//! Profile use cases: onboarding, updates, schedule, photos, and account
//! deletion.

mod complete_profile;
mod delete_account;
mod get_profile;
mod photos;
mod schedule;
mod update_profile;

pub use complete_profile::{CompleteProfileCommand, CompleteProfileHandler};
pub use delete_account::{DeleteAccountCommand, DeleteAccountHandler};
pub use get_profile::{GetProfileHandler, GetProfileQuery, ProfileView};
pub use photos::{ListPhotosHandler, UploadPhotoCommand, UploadPhotoHandler};
pub use schedule::{GetWeeklyScheduleHandler, GetWeeklyScheduleQuery};
pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler};
