//! AnalyzeFoodPhotoHandler - estimates nutrition from a food photo.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::generation::parse_reply;
use crate::domain::nutrition::FoodAnalysis;
use crate::ports::AiProvider;

/// Command to analyze a food photo.
#[derive(Debug, Clone)]
pub struct AnalyzeFoodPhotoCommand {
    pub user_id: UserId,
    pub image: Vec<u8>,
    pub mime_type: String,
}

/// Handler for food photo analysis.
pub struct AnalyzeFoodPhotoHandler {
    ai: Arc<dyn AiProvider>,
}

impl AnalyzeFoodPhotoHandler {
    pub fn new(ai: Arc<dyn AiProvider>) -> Self {
        Self { ai }
    }

    pub async fn handle(&self, cmd: AnalyzeFoodPhotoCommand) -> Result<FoodAnalysis, DomainError> {
        let prompt = r#"Analise esta imagem de comida e estime os valores nutricionais.
RETORNE APENAS UM JSON no seguinte formato:
{
    "food_item": "Nome do prato/alimento",
    "calories": 500,
    "protein_g": 30,
    "carbs_g": 45,
    "fat_g": 20,
    "serving_size": "descrição do tamanho da porção estimada",
    "health_rating": 5
}"#;

        tracing::info!(user_id = %cmd.user_id, "Analyzing food image with AI vision");
        let reply = self
            .ai
            .generate_with_image(prompt, &cmd.image, &cmd.mime_type)
            .await
            .map_err(DomainError::from)?;
        parse_reply(&reply)
    }
}
