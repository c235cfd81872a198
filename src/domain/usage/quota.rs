//! Plan-derived daily quotas for AI-cost-incurring features.

use serde::{Deserialize, Serialize};

use crate::domain::subscription::SubscriptionPlan;

/// A metered usage category guarding an AI-cost endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageCategory {
    /// Coaching chat messages.
    Chat,
    /// Recipe / meal-plan generation.
    RecipeGeneration,
    /// Food photo analysis.
    ImageAnalysis,
}

impl UsageCategory {
    /// Returns the counter column name used in the database and in
    /// quota-exceeded error details.
    pub fn counter_name(&self) -> &'static str {
        match self {
            UsageCategory::Chat => "ai_chat_count",
            UsageCategory::RecipeGeneration => "recipe_generation_count",
            UsageCategory::ImageAnalysis => "image_analysis_count",
        }
    }
}

/// Daily limits for one subscription plan. `None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanQuotas {
    /// Chat messages per day.
    pub chat: Option<u32>,
    /// Recipe/meal-plan generations per day.
    pub recipe_generation: Option<u32>,
    /// Food photo analyses per day.
    pub image_analysis: Option<u32>,
}

impl PlanQuotas {
    /// Static quota table.
    ///
    /// | plan         | chat | recipe | image |
    /// |--------------|------|--------|-------|
    /// | free_trial   | ∞    | ∞      | ∞     |
    /// | limited_free | 3    | 1      | 0     |
    /// | base         | 50   | 10     | 5     |
    /// | pro          | 200  | ∞      | 20    |
    /// | unlimited    | ∞    | ∞      | ∞     |
    pub fn for_plan(plan: SubscriptionPlan) -> Self {
        match plan {
            SubscriptionPlan::FreeTrial => Self {
                chat: None,
                recipe_generation: None,
                image_analysis: None,
            },
            SubscriptionPlan::LimitedFree => Self {
                chat: Some(3),
                recipe_generation: Some(1),
                image_analysis: Some(0),
            },
            SubscriptionPlan::Base => Self {
                chat: Some(50),
                recipe_generation: Some(10),
                image_analysis: Some(5),
            },
            SubscriptionPlan::Pro => Self {
                chat: Some(200),
                recipe_generation: None,
                image_analysis: Some(20),
            },
            SubscriptionPlan::Unlimited => Self {
                chat: None,
                recipe_generation: None,
                image_analysis: None,
            },
        }
    }

    /// Returns the limit for a category, `None` for unlimited.
    pub fn limit_for(&self, category: UsageCategory) -> Option<u32> {
        match category {
            UsageCategory::Chat => self.chat,
            UsageCategory::RecipeGeneration => self.recipe_generation,
            UsageCategory::ImageAnalysis => self.image_analysis,
        }
    }

    /// Returns true if the given counter value has reached the category's
    /// limit. Unlimited categories are never reached.
    pub fn is_reached(&self, category: UsageCategory, current: u32) -> bool {
        self.limit_for(category)
            .map(|max| current >= max)
            .unwrap_or(false)
    }
}
