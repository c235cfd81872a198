//! HTTP handlers for the nutrition endpoints.
//!
//! All three endpoints are AI-cost-incurring and run behind the entitlement
//! gate: check before the model call, record after success.

use axum::extract::{Json, Multipart, State};
use axum::response::IntoResponse;

use crate::adapters::http::envelope::{ApiError, ApiResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppState;
use crate::application::handlers::nutrition::{
    AnalyzeFoodPhotoCommand, GenerateMealPlanCommand, SearchRecipesQuery,
};
use crate::domain::foundation::DomainError;
use crate::domain::usage::UsageCategory;

use super::dto::RecipeSearchRequest;

/// POST /api/v1/nutrition/meal-plan
pub async fn generate_meal_plan(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    state
        .entitlements
        .check(&user.user_id, UsageCategory::RecipeGeneration)
        .await?;

    let plan = state
        .generate_meal_plan_handler()
        .handle(GenerateMealPlanCommand {
            user_id: user.user_id,
        })
        .await?;

    state
        .entitlements
        .record(&user.user_id, UsageCategory::RecipeGeneration)
        .await;

    Ok(Json(ApiResponse::data(plan)))
}

/// POST /api/v1/nutrition/recipes/search
pub async fn search_recipes(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<RecipeSearchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .entitlements
        .check(&user.user_id, UsageCategory::RecipeGeneration)
        .await?;

    let recipes = state
        .search_recipes_handler()
        .handle(SearchRecipesQuery {
            query: request.query,
        })
        .await?;

    state
        .entitlements
        .record(&user.user_id, UsageCategory::RecipeGeneration)
        .await;

    Ok(Json(ApiResponse::data(recipes)))
}

/// POST /api/v1/nutrition/analyze-photo (multipart: `photo` file)
pub async fn analyze_photo(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    state
        .entitlements
        .check(&user.user_id, UsageCategory::ImageAnalysis)
        .await?;

    let mut image: Option<(Vec<u8>, String)> = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError(DomainError::validation("multipart", e.to_string()))
    })? {
        if field.name() == Some("photo") {
            let mime_type = field.content_type().unwrap_or("image/jpeg").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError(DomainError::validation("photo", e.to_string())))?;
            image = Some((bytes.to_vec(), mime_type));
        }
    }
    let (image, mime_type) =
        image.ok_or_else(|| ApiError(DomainError::validation("photo", "Imagem em falta")))?;

    let analysis = state
        .analyze_food_photo_handler()
        .handle(AnalyzeFoodPhotoCommand {
            user_id: user.user_id,
            image,
            mime_type,
        })
        .await?;

    state
        .entitlements
        .record(&user.user_id, UsageCategory::ImageAnalysis)
        .await;

    Ok(Json(ApiResponse::data(analysis)))
}
