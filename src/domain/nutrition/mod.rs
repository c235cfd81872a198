//! Nutrition domain - generated meal plans, recipes, and food photo
//! analyses.

mod food_analysis;
mod meal_plan;
mod recipe;

pub use food_analysis::FoodAnalysis;
pub use meal_plan::{Macros, Meal, MealPlan};
pub use recipe::{Ingredient, Recipe};
