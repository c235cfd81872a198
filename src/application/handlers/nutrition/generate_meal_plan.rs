//! GenerateMealPlanHandler - builds a daily meal plan from the profile.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::generation::parse_reply;
use crate::domain::nutrition::MealPlan;
use crate::ports::{AiProvider, UserRepository};

/// Command to generate a meal plan.
#[derive(Debug, Clone)]
pub struct GenerateMealPlanCommand {
    pub user_id: UserId,
}

/// Handler for meal plan generation.
pub struct GenerateMealPlanHandler {
    users: Arc<dyn UserRepository>,
    ai: Arc<dyn AiProvider>,
}

impl GenerateMealPlanHandler {
    pub fn new(users: Arc<dyn UserRepository>, ai: Arc<dyn AiProvider>) -> Self {
        Self { users, ai }
    }

    pub async fn handle(&self, cmd: GenerateMealPlanCommand) -> Result<MealPlan, DomainError> {
        let user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "Usuário não encontrado"))?;

        let prompt = format!(
            r#"Como um nutricionista esportivo de elite, gere um plano alimentar diário para o usuário:
- Nome: {name}
- Peso: {weight}kg
- Altura: {height}cm
- Objetivo: {goal}
- Nível de atividade: {activity}

RETORNE APENAS UM JSON no seguinte formato:
{{
    "name": "Nome do Plano",
    "total_calories": 2400,
    "macros": {{ "protein": 180, "carbs": 260, "fat": 70 }},
    "meals": [
        {{ "time": "Horário/Refeição", "items": ["item 1", "item 2"], "calories": 520 }}
    ]
}}"#,
            name = user.name.as_deref().unwrap_or("Atleta"),
            weight = user.weight_kg.unwrap_or(70.0),
            height = user.height_cm.unwrap_or(170.0),
            goal = user
                .fitness_goal
                .map(|g| format!("{:?}", g))
                .unwrap_or_else(|| "GeneralHealth".to_string()),
            activity = user
                .activity_level
                .map(|a| format!("{:?}", a))
                .unwrap_or_else(|| "ModeratelyActive".to_string()),
        );

        tracing::info!(user_id = %cmd.user_id, "Generating meal plan with AI");
        let reply = self.ai.generate(&prompt).await.map_err(DomainError::from)?;
        parse_reply(&reply)
    }
}
