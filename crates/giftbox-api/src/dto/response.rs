//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use giftbox_core::types::pagination::PageResponse;
use giftbox_entity::folder::{Folder, FolderAccess};
use giftbox_entity::photo::Photo;
use giftbox_entity::user::{User, UserRole};
use giftbox_service::folder::{FolderDeletion, FolderDetails};
use giftbox_service::user::AuthSession;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `true`.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// User summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Email.
    pub email: Option<String>,
    /// Role.
    pub role: UserRole,
    /// Registration time.
    pub created_at: DateTime<Utc>,
    /// Most recent login.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer access token.
    pub access_token: String,
    /// Always `"Bearer"`.
    pub token_type: String,
    /// Access token expiration.
    pub expires_at: DateTime<Utc>,
    /// The signed-in user.
    pub user: UserResponse,
}

impl From<AuthSession> for LoginResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            access_token: session.access_token,
            token_type: "Bearer".to_string(),
            expires_at: session.expires_at,
            user: session.user.into(),
        }
    }
}

/// Folder as seen by its owner. The secret hash is never exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderResponse {
    /// Folder ID.
    pub id: Uuid,
    /// Name.
    pub name: String,
    /// Whether a secret guards deletion.
    pub is_protected: bool,
    /// `"protected"` or `"unprotected"`.
    pub access: FolderAccess,
    /// Number of photos, when requested individually.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_count: Option<u64>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last rename or re-key.
    pub updated_at: DateTime<Utc>,
}

impl From<Folder> for FolderResponse {
    fn from(folder: Folder) -> Self {
        Self {
            id: folder.id,
            is_protected: folder.is_protected(),
            access: folder.access(),
            name: folder.name,
            photo_count: None,
            created_at: folder.created_at,
            updated_at: folder.updated_at,
        }
    }
}

impl From<FolderDetails> for FolderResponse {
    fn from(details: FolderDetails) -> Self {
        Self {
            photo_count: Some(details.photo_count),
            ..details.folder.into()
        }
    }
}

/// Result of `POST /folders/{id}/verify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    /// The folder checked.
    pub folder_id: Uuid,
    /// Always `true`; failures use the error envelope.
    pub verified: bool,
}

/// Result of `DELETE /folders/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderDeletionResponse {
    /// The deleted folder.
    pub folder_id: Uuid,
    /// Photos deleted with it.
    pub photos_removed: u64,
    /// Photo blobs that could not be removed from storage.
    pub storage_cleanup_failures: usize,
}

impl From<FolderDeletion> for FolderDeletionResponse {
    fn from(deletion: FolderDeletion) -> Self {
        Self {
            folder_id: deletion.folder_id,
            photos_removed: deletion.photos_removed,
            storage_cleanup_failures: deletion.storage_failures.len(),
        }
    }
}

/// Photo metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoResponse {
    /// Photo ID.
    pub id: Uuid,
    /// Containing folder, if any.
    pub folder_id: Option<Uuid>,
    /// Original file name.
    pub file_name: String,
    /// MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Caption.
    pub caption: Option<String>,
    /// Where to fetch the image.
    pub content_url: String,
    /// Upload time.
    pub created_at: DateTime<Utc>,
}

impl From<Photo> for PhotoResponse {
    fn from(photo: Photo) -> Self {
        Self {
            content_url: format!("/api/photos/{}/content", photo.id),
            id: photo.id,
            folder_id: photo.folder_id,
            file_name: photo.file_name,
            mime_type: photo.mime_type,
            size_bytes: photo.size_bytes,
            caption: photo.caption,
            created_at: photo.created_at,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since startup.
    pub uptime_seconds: i64,
    /// Database reachability.
    pub database: String,
    /// Blob storage reachability.
    pub storage: String,
}

/// Converts every item of a page into its response form.
pub fn page_of<T, R: From<T>>(page: PageResponse<T>) -> PageResponse<R> {
    page.map(R::from)
}
