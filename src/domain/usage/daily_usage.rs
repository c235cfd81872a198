//! Per-user, per-day usage counters.

use chrono::{Duration, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::UsageCategory;
use crate::domain::foundation::UserId;

/// Calendar day key for usage metering.
///
/// Derived from wall-clock time shifted by the server's configured UTC
/// offset. Rollover is implicit: a new date simply has no counter row yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageDate(NaiveDate);

impl UsageDate {
    /// Returns today's date at the given UTC offset in hours.
    pub fn today(utc_offset_hours: i8) -> Self {
        let offset = FixedOffset::east_opt(i32::from(utc_offset_hours) * 3600)
            .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());
        Self(Utc::now().with_timezone(&offset).date_naive())
    }

    /// Creates a date from components, for fixtures and tests.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Wraps an existing calendar date.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the inner calendar date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Returns the following day.
    pub fn next_day(&self) -> Self {
        Self(self.0 + Duration::days(1))
    }
}

impl std::fmt::Display for UsageDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// One row of usage counters for a (user, day) pair.
///
/// Counters only ever grow within a day; a new day starts from a fresh row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyUsage {
    pub user_id: UserId,
    pub date: UsageDate,
    pub ai_chat_count: u32,
    pub recipe_generation_count: u32,
    pub image_analysis_count: u32,
}

impl DailyUsage {
    /// Creates an empty counter row for the given user and day.
    pub fn empty(user_id: UserId, date: UsageDate) -> Self {
        Self {
            user_id,
            date,
            ai_chat_count: 0,
            recipe_generation_count: 0,
            image_analysis_count: 0,
        }
    }

    /// Returns the counter value for a category.
    pub fn count(&self, category: UsageCategory) -> u32 {
        match category {
            UsageCategory::Chat => self.ai_chat_count,
            UsageCategory::RecipeGeneration => self.recipe_generation_count,
            UsageCategory::ImageAnalysis => self.image_analysis_count,
        }
    }

    /// Adds one to a category counter.
    pub fn increment(&mut self, category: UsageCategory) {
        match category {
            UsageCategory::Chat => self.ai_chat_count += 1,
            UsageCategory::RecipeGeneration => self.recipe_generation_count += 1,
            UsageCategory::ImageAnalysis => self.image_analysis_count += 1,
        }
    }
}
