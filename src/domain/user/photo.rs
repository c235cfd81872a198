//! Progress photos.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PhotoId, Timestamp, UserId};

/// A progress photo stored inline as a base64 data URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPhoto {
    pub id: PhotoId,
    pub user_id: UserId,
    /// `data:image/jpeg;base64,...` payload.
    pub image_url: String,
    pub weight_kg: Option<f32>,
    pub created_at: Timestamp,
}

impl ProgressPhoto {
    /// Stores an uploaded image as a data URL.
    pub fn from_upload(
        user_id: UserId,
        image_bytes: &[u8],
        mime_type: &str,
        weight_kg: Option<f32>,
        now: Timestamp,
    ) -> Self {
        use base64::Engine;
        let encoded = base64::engine::general_purpose::STANDARD.encode(image_bytes);
        Self {
            id: PhotoId::new(),
            user_id,
            image_url: format!("data:{};base64,{}", mime_type, encoded),
            weight_kg,
            created_at: now,
        }
    }
}
