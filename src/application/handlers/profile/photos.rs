//! Progress photo use cases.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::user::ProgressPhoto;
use crate::ports::PhotoRepository;

/// Command to store an uploaded progress photo.
#[derive(Debug, Clone)]
pub struct UploadPhotoCommand {
    pub user_id: UserId,
    pub image: Vec<u8>,
    pub mime_type: String,
    pub weight_kg: Option<f32>,
}

/// Handler for photo uploads.
pub struct UploadPhotoHandler {
    photos: Arc<dyn PhotoRepository>,
}

impl UploadPhotoHandler {
    pub fn new(photos: Arc<dyn PhotoRepository>) -> Self {
        Self { photos }
    }

    pub async fn handle(&self, cmd: UploadPhotoCommand) -> Result<ProgressPhoto, DomainError> {
        let photo = ProgressPhoto::from_upload(
            cmd.user_id,
            &cmd.image,
            &cmd.mime_type,
            cmd.weight_kg,
            Timestamp::now(),
        );
        self.photos.save(&photo).await?;
        Ok(photo)
    }
}

/// Handler for listing a user's photos, newest first.
pub struct ListPhotosHandler {
    photos: Arc<dyn PhotoRepository>,
}

impl ListPhotosHandler {
    pub fn new(photos: Arc<dyn PhotoRepository>) -> Self {
        Self { photos }
    }

    pub async fn handle(&self, user_id: UserId) -> Result<Vec<ProgressPhoto>, DomainError> {
        self.photos.list_for_user(&user_id).await
    }
}
