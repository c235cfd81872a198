//! SearchRecipesHandler - generates recipes for a free-text query.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::generation::parse_reply;
use crate::domain::nutrition::Recipe;
use crate::ports::AiProvider;

/// Query for recipe search.
#[derive(Debug, Clone)]
pub struct SearchRecipesQuery {
    pub query: String,
}

/// Handler for recipe search.
pub struct SearchRecipesHandler {
    ai: Arc<dyn AiProvider>,
}

impl SearchRecipesHandler {
    pub fn new(ai: Arc<dyn AiProvider>) -> Self {
        Self { ai }
    }

    pub async fn handle(&self, query: SearchRecipesQuery) -> Result<Vec<Recipe>, DomainError> {
        let prompt = format!(
            r#"Gere uma lista de 3 receitas saudáveis baseadas na busca: "{query}".
As receitas devem ser detalhadas e nutritivas.

RETORNE APENAS UM JSON no formato de array de objetos:
[
    {{
        "title": "Nome",
        "description": "Breve info",
        "prep_time_minutes": 20,
        "instructions": ["passo 1", "passo 2"],
        "ingredients": [{{ "item": "nome", "quantity": "valor", "unit": "unidade" }}],
        "calories": 420,
        "protein_g": 30,
        "carbs_g": 40,
        "fat_g": 12
    }}
]"#,
            query = query.query,
        );

        tracing::info!(query = %query.query, "Searching recipes with AI");
        let reply = self.ai.generate(&prompt).await.map_err(DomainError::from)?;
        parse_reply(&reply)
    }
}
