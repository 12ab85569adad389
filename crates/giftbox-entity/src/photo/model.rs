//! Photo entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An uploaded photo. Lives inside a folder or, when `folder_id` is
/// `None`, in its owner's unfiled area.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Photo {
    /// Unique photo identifier.
    pub id: Uuid,
    /// The uploading user.
    pub owner_id: Uuid,
    /// Containing folder (`None` = unfiled).
    pub folder_id: Option<Uuid>,
    /// Original file name as uploaded.
    pub file_name: String,
    /// Object path within the blob storage provider.
    pub storage_path: String,
    /// MIME type, always `image/*`.
    pub mime_type: String,
    /// Size of the stored object in bytes.
    pub size_bytes: i64,
    /// Optional caption.
    pub caption: Option<String>,
    /// When the photo was uploaded.
    pub created_at: DateTime<Utc>,
}

impl Photo {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.file_name)
            .map(|ext| ext.to_lowercase())
    }
}

/// Data required to create a photo record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePhoto {
    /// Pre-allocated identifier (also used in the storage path).
    pub id: Uuid,
    /// The uploading user.
    pub owner_id: Uuid,
    /// Containing folder.
    pub folder_id: Option<Uuid>,
    /// Original file name.
    pub file_name: String,
    /// Object path within the blob storage provider.
    pub storage_path: String,
    /// MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Optional caption.
    pub caption: Option<String>,
}
