//! Generated daily meal plans.

use serde::{Deserialize, Serialize};

/// Daily macro targets in grams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub protein: f32,
    pub carbs: f32,
    pub fat: f32,
}

/// One meal in a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Time slot or meal name, e.g. "08:00 - Pequeno-almoço".
    pub time: String,
    pub items: Vec<String>,
    pub calories: f32,
}

/// A full generated day of eating, returned to the client as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub name: String,
    pub total_calories: f32,
    pub macros: Macros,
    pub meals: Vec<Meal>,
}
