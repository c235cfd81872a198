//! Food photo analysis results.

use serde::{Deserialize, Serialize};

/// Nutrition estimate produced from a food photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodAnalysis {
    pub food_item: String,
    pub calories: f32,
    pub protein_g: f32,
    pub carbs_g: f32,
    pub fat_g: f32,
    pub serving_size: String,
    /// 1 (poor) to 10 (excellent).
    pub health_rating: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::parse_reply;

    #[test]
    fn parses_model_shaped_analysis() {
        let reply = r#"{
            "food_item": "Francesinha",
            "calories": 1200,
            "protein_g": 55,
            "carbs_g": 90,
            "fat_g": 70,
            "serving_size": "um prato completo",
            "health_rating": 2
        }"#;

        let analysis: FoodAnalysis = parse_reply(reply).unwrap();
        assert_eq!(analysis.food_item, "Francesinha");
        assert_eq!(analysis.health_rating, 2);
    }
}
