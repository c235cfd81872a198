//! Request DTOs for the nutrition endpoints.
//!
//! Responses reuse the domain types directly: meal plans, recipes, and food
//! analyses are already client-shaped.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RecipeSearchRequest {
    pub query: String,
}
