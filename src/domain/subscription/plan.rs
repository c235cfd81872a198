//! Subscription plan definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Subscription plan.
///
/// Determines the daily quotas for AI-cost-incurring features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    /// Trial granted at first signup. Everything unlimited for 15 days.
    FreeTrial,
    /// Fallback plan after a trial ends or a paid plan is cancelled.
    /// 3 chats, 1 recipe, no image analysis per day.
    LimitedFree,
    /// Entry paid plan.
    Base,
    /// Mid paid plan.
    Pro,
    /// Top paid plan, everything unlimited.
    Unlimited,
}

impl SubscriptionPlan {
    /// Returns true if this plan is purchased through checkout.
    pub fn is_paid(&self) -> bool {
        matches!(
            self,
            SubscriptionPlan::Base | SubscriptionPlan::Pro | SubscriptionPlan::Unlimited
        )
    }

    /// Returns the wire name used in the API and database.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::FreeTrial => "free_trial",
            SubscriptionPlan::LimitedFree => "limited_free",
            SubscriptionPlan::Base => "base",
            SubscriptionPlan::Pro => "pro",
            SubscriptionPlan::Unlimited => "unlimited",
        }
    }
}

impl FromStr for SubscriptionPlan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free_trial" => Ok(SubscriptionPlan::FreeTrial),
            "limited_free" => Ok(SubscriptionPlan::LimitedFree),
            "base" => Ok(SubscriptionPlan::Base),
            "pro" => Ok(SubscriptionPlan::Pro),
            "unlimited" => Ok(SubscriptionPlan::Unlimited),
            other => Err(format!("unknown plan: {}", other)),
        }
    }
}

impl std::fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paid_plans_are_classified() {
        assert!(!SubscriptionPlan::FreeTrial.is_paid());
        assert!(!SubscriptionPlan::LimitedFree.is_paid());
        assert!(SubscriptionPlan::Base.is_paid());
        assert!(SubscriptionPlan::Pro.is_paid());
        assert!(SubscriptionPlan::Unlimited.is_paid());
    }

    #[test]
    fn plan_serializes_snake_case() {
        let json = serde_json::to_string(&SubscriptionPlan::FreeTrial).unwrap();
        assert_eq!(json, "\"free_trial\"");
        let json = serde_json::to_string(&SubscriptionPlan::LimitedFree).unwrap();
        assert_eq!(json, "\"limited_free\"");
    }

    #[test]
    fn plan_roundtrips_through_str() {
        for plan in [
            SubscriptionPlan::FreeTrial,
            SubscriptionPlan::LimitedFree,
            SubscriptionPlan::Base,
            SubscriptionPlan::Pro,
            SubscriptionPlan::Unlimited,
        ] {
            assert_eq!(plan.as_str().parse::<SubscriptionPlan>().unwrap(), plan);
        }
    }

    #[test]
    fn unknown_plan_is_rejected() {
        assert!("platinum".parse::<SubscriptionPlan>().is_err());
    }
}
