//! Generated recipes.

use serde::{Deserialize, Serialize};

/// One recipe ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub item: String,
    pub quantity: String,
    pub unit: String,
}

/// A generated recipe with nutrition estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub prep_time_minutes: Option<u32>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    #[serde(default)]
    pub calories: Option<f32>,
    #[serde(default)]
    pub protein_g: Option<f32>,
    #[serde(default)]
    pub carbs_g: Option<f32>,
    #[serde(default)]
    pub fat_g: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::parse_reply;

    #[test]
    fn parses_model_shaped_recipe_list() {
        let reply = r#"```json
        [
            {
                "title": "Frango grelhado com quinoa",
                "description": "Rico em proteína",
                "prep_time_minutes": 25,
                "ingredients": [
                    { "item": "peito de frango", "quantity": "200", "unit": "g" }
                ],
                "instructions": ["Tempere o frango", "Grelhe 6 min por lado"],
                "calories": 420,
                "protein_g": 45,
                "carbs_g": 30,
                "fat_g": 10
            }
        ]
        ```"#;

        let recipes: Vec<Recipe> = parse_reply(reply).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "Frango grelhado com quinoa");
        assert_eq!(recipes[0].ingredients[0].unit, "g");
    }

    #[test]
    fn missing_nutrition_fields_default_to_none() {
        let reply = r#"[{"title":"Salada","ingredients":[],"instructions":[]}]"#;
        let recipes: Vec<Recipe> = parse_reply(reply).unwrap();
        assert!(recipes[0].calories.is_none());
    }
}
