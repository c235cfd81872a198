//! HTTP handlers for the profile endpoints.

use axum::extract::{Json, Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::envelope::{ApiError, ApiResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppState;
use crate::application::handlers::profile::{
    CompleteProfileCommand, DeleteAccountCommand, GetProfileQuery, GetWeeklyScheduleQuery,
    UpdateProfileCommand, UploadPhotoCommand,
};
use crate::domain::foundation::DomainError;
use crate::domain::user::{ProfileUpdate, ScheduleSlot};

use super::dto::{
    CompleteProfileRequest, PhotoResponse, ProfileResponse, ScheduleSlotDto, UpdateProfileRequest,
};

/// Accepted upload types and the 5 MB cap, matching the mobile client.
const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;
const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

fn to_slots(dtos: Vec<ScheduleSlotDto>) -> Result<Vec<ScheduleSlot>, DomainError> {
    dtos.into_iter()
        .map(|dto| {
            ScheduleSlot::new(
                dto.day_of_week,
                dto.available,
                dto.preferred_time,
                dto.duration_minutes,
            )
            .map_err(DomainError::from)
        })
        .collect()
}

/// GET /api/v1/users/me
pub async fn get_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let view = state
        .get_profile_handler()
        .handle(GetProfileQuery {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(ApiResponse::data(ProfileResponse::from(view))))
}

/// POST /api/v1/users/complete
pub async fn complete_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CompleteProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let weekly_schedule = to_slots(request.weekly_schedule)?;

    state
        .complete_profile_handler()
        .handle(CompleteProfileCommand {
            user_id: user.user_id,
            profile: ProfileUpdate {
                name: Some(request.name),
                age: Some(request.age),
                weight_kg: Some(request.weight_kg),
                height_cm: Some(request.height_cm),
                gender: Some(request.gender),
                fitness_goal: Some(request.fitness_goal),
                experience_level: Some(request.experience_level),
                activity_level: Some(request.activity_level),
                gym_access: Some(request.gym_access),
                home_equipment: Some(request.home_equipment),
                medical_conditions_encrypted: None,
                injuries: Some(request.injuries),
                preferred_language: request.preferred_language,
                units: request.units,
            },
            medical_conditions: request.medical_conditions,
            weekly_schedule,
        })
        .await?;

    let view = state
        .get_profile_handler()
        .handle(GetProfileQuery {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Perfil atualizado com sucesso",
        ProfileResponse::from(view),
    )))
}

/// PUT /api/v1/users/me/update
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let weekly_schedule = request.weekly_schedule.map(to_slots).transpose()?;

    state
        .update_profile_handler()
        .handle(UpdateProfileCommand {
            user_id: user.user_id,
            profile: ProfileUpdate {
                name: request.name,
                age: request.age,
                weight_kg: request.weight_kg,
                height_cm: request.height_cm,
                gender: request.gender,
                fitness_goal: request.fitness_goal,
                experience_level: request.experience_level,
                activity_level: request.activity_level,
                gym_access: request.gym_access,
                home_equipment: request.home_equipment,
                medical_conditions_encrypted: None,
                injuries: request.injuries,
                preferred_language: request.preferred_language,
                units: request.units,
            },
            medical_conditions: request.medical_conditions,
            weekly_schedule,
        })
        .await?;

    let view = state
        .get_profile_handler()
        .handle(GetProfileQuery {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Perfil atualizado com sucesso",
        ProfileResponse::from(view),
    )))
}

/// GET /api/v1/users/schedule
pub async fn get_schedule(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let schedule = state
        .weekly_schedule_handler()
        .handle(GetWeeklyScheduleQuery {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(ApiResponse::data(schedule)))
}

/// GET /api/v1/users/photos
pub async fn list_photos(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let photos = state.list_photos_handler().handle(user.user_id).await?;
    let photos: Vec<PhotoResponse> = photos.into_iter().map(PhotoResponse::from).collect();

    Ok(Json(ApiResponse::data(photos)))
}

/// POST /api/v1/users/photos (multipart: `photo` file, optional `weight_kg`)
pub async fn upload_photo(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut image: Option<(Vec<u8>, String)> = None;
    let mut weight_kg: Option<f32> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError(DomainError::validation("multipart", e.to_string()))
    })? {
        match field.name() {
            Some("photo") => {
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                if !ALLOWED_IMAGE_TYPES.contains(&mime_type.as_str()) {
                    return Err(ApiError(DomainError::validation(
                        "photo",
                        "Tipo de arquivo inválido",
                    )));
                }
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError(DomainError::validation("photo", e.to_string()))
                })?;
                if bytes.len() > MAX_PHOTO_BYTES {
                    return Err(ApiError(DomainError::validation(
                        "photo",
                        "Arquivo muito grande",
                    )));
                }
                image = Some((bytes.to_vec(), mime_type));
            }
            Some("weight_kg") => {
                let text = field.text().await.unwrap_or_default();
                weight_kg = text.trim().parse().ok();
            }
            _ => {}
        }
    }

    let (image, mime_type) =
        image.ok_or_else(|| ApiError(DomainError::validation("photo", "Imagem em falta")))?;

    let photo = state
        .upload_photo_handler()
        .handle(UploadPhotoCommand {
            user_id: user.user_id,
            image,
            mime_type,
            weight_kg,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(PhotoResponse::from(photo))),
    ))
}

/// DELETE /api/v1/users/me/delete
pub async fn delete_account(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    state
        .delete_account_handler()
        .handle(DeleteAccountCommand {
            user_id: user.user_id,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
