//! Weekly training availability.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Time of day the user prefers to train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredTime {
    Morning,
    Afternoon,
    Evening,
}

/// One day of the user's weekly availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    /// Day of week, 0 = Sunday through 6 = Saturday.
    pub day_of_week: u8,
    /// Whether the user can train that day.
    pub available: bool,
    pub preferred_time: Option<PreferredTime>,
    pub duration_minutes: Option<u32>,
}

impl ScheduleSlot {
    /// Creates a slot, validating the day index.
    pub fn new(
        day_of_week: u8,
        available: bool,
        preferred_time: Option<PreferredTime>,
        duration_minutes: Option<u32>,
    ) -> Result<Self, ValidationError> {
        if day_of_week > 6 {
            return Err(ValidationError::out_of_range(
                "day_of_week",
                0,
                6,
                i32::from(day_of_week),
            ));
        }
        Ok(Self {
            day_of_week,
            available,
            preferred_time,
            duration_minutes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_day_accepted() {
        let slot = ScheduleSlot::new(6, true, Some(PreferredTime::Evening), Some(60));
        assert!(slot.is_ok());
    }

    #[test]
    fn day_out_of_range_rejected() {
        assert!(ScheduleSlot::new(7, true, None, None).is_err());
    }

    #[test]
    fn preferred_time_serializes_snake_case() {
        let json = serde_json::to_string(&PreferredTime::Morning).unwrap();
        assert_eq!(json, "\"morning\"");
    }
}
