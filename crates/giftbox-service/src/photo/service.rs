//! Photo upload, retrieval and removal.

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use giftbox_auth::ownership::OwnershipGuard;
use giftbox_core::error::{AppError, ErrorKind};
use giftbox_core::result::AppResult;
use giftbox_core::traits::storage::StorageProvider;
use giftbox_database::store::{FolderStore, PhotoStore};
use giftbox_entity::photo::{CreatePhoto, Photo};

use crate::context::RequestContext;

const MAX_CAPTION_LENGTH: usize = 500;
const MAX_FILE_NAME_LENGTH: usize = 255;
const CONTENT_NOT_FOUND: &str = "Photo content not found";

/// Manages photos and their blobs.
#[derive(Debug, Clone)]
pub struct PhotoService {
    folders: Arc<dyn FolderStore>,
    photos: Arc<dyn PhotoStore>,
    storage: Arc<dyn StorageProvider>,
    max_upload_size_bytes: u64,
}

/// An image to store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadPhotoRequest {
    /// Target folder; `None` leaves the photo unfiled.
    pub folder_id: Option<Uuid>,
    /// Optional caption.
    pub caption: Option<String>,
    /// Original file name.
    pub file_name: String,
    /// Declared MIME type; must be `image/*`.
    pub mime_type: String,
    /// Image content.
    #[serde(skip)]
    pub data: Bytes,
}

/// A photo and its content.
#[derive(Debug, Clone)]
pub struct PhotoContent {
    /// Photo metadata.
    pub photo: Photo,
    /// Raw image bytes.
    pub data: Bytes,
}

impl PhotoService {
    /// Creates a new photo service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        photos: Arc<dyn PhotoStore>,
        storage: Arc<dyn StorageProvider>,
        max_upload_size_bytes: u64,
    ) -> Self {
        Self {
            folders,
            photos,
            storage,
            max_upload_size_bytes,
        }
    }

    /// Stores an image and records it. The blob is written first; if the
    /// row cannot be inserted the blob is removed again.
    pub async fn upload_photo(
        &self,
        ctx: &RequestContext,
        req: UploadPhotoRequest,
    ) -> AppResult<Photo> {
        if let Some(folder_id) = req.folder_id {
            let folder = self
                .folders
                .find_by_id(folder_id)
                .await?
                .ok_or_else(|| AppError::not_found("Folder not found"))?;
            OwnershipGuard::authorize(ctx.user_id, &folder)?;
        }

        let mime_type = req.mime_type.trim().to_ascii_lowercase();
        if !mime_type.starts_with("image/") || mime_type.len() == "image/".len() {
            return Err(AppError::validation(format!(
                "Only images can be uploaded, got '{}'",
                req.mime_type
            )));
        }

        if req.data.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }

        let size = req.data.len() as u64;
        if size > self.max_upload_size_bytes {
            return Err(AppError::payload_too_large(format!(
                "Photo is {size} bytes; the limit is {} bytes",
                self.max_upload_size_bytes
            )));
        }

        let file_name = clean_file_name(&req.file_name)?;
        let caption = clean_caption(req.caption)?;

        let photo_id = Uuid::new_v4();
        let storage_path = format!(
            "photos/{}/{}.{}",
            ctx.user_id,
            photo_id,
            extension_for(&file_name, &mime_type)
        );

        self.storage.write(&storage_path, req.data).await?;

        let record = CreatePhoto {
            id: photo_id,
            owner_id: ctx.user_id,
            folder_id: req.folder_id,
            file_name,
            storage_path: storage_path.clone(),
            mime_type,
            size_bytes: i64::try_from(size).unwrap_or(i64::MAX),
            caption,
        };

        let photo = match self.photos.create(&record).await {
            Ok(photo) => photo,
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&storage_path).await {
                    warn!(
                        path = %storage_path,
                        error = %cleanup,
                        "Failed to remove orphaned photo blob"
                    );
                }
                return Err(e);
            }
        };

        info!(
            user_id = %ctx.user_id,
            photo_id = %photo.id,
            folder_id = ?photo.folder_id,
            size_bytes = photo.size_bytes,
            "Photo uploaded"
        );

        Ok(photo)
    }

    /// Lists the photos in one of the caller's folders, or the caller's
    /// unfiled photos when `folder_id` is `None`.
    pub async fn list_photos(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
    ) -> AppResult<Vec<Photo>> {
        match folder_id {
            Some(folder_id) => {
                let folder = self
                    .folders
                    .find_by_id(folder_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Folder not found"))?;
                OwnershipGuard::authorize(ctx.user_id, &folder)?;
                self.photos.list_by_folder(folder_id).await
            }
            None => self.photos.list_unfiled(ctx.user_id).await,
        }
    }

    /// Gets one of the caller's photos.
    pub async fn get_photo(&self, ctx: &RequestContext, photo_id: Uuid) -> AppResult<Photo> {
        let photo = self
            .photos
            .find_by_id(photo_id)
            .await?
            .ok_or_else(|| AppError::not_found("Photo not found"))?;
        OwnershipGuard::authorize(ctx.user_id, &photo)?;
        Ok(photo)
    }

    /// Reads a photo's content.
    pub async fn download_photo(
        &self,
        ctx: &RequestContext,
        photo_id: Uuid,
    ) -> AppResult<PhotoContent> {
        let photo = self.get_photo(ctx, photo_id).await?;

        if !self.storage.exists(&photo.storage_path).await? {
            warn!(
                photo_id = %photo.id,
                path = %photo.storage_path,
                "Photo row has no stored content"
            );
            return Err(AppError::not_found(CONTENT_NOT_FOUND));
        }

        let data = self
            .storage
            .read_bytes(&photo.storage_path)
            .await
            .map_err(|e| {
                if e.kind == ErrorKind::NotFound {
                    AppError::not_found(CONTENT_NOT_FOUND)
                } else {
                    e
                }
            })?;
        Ok(PhotoContent { photo, data })
    }

    /// Deletes one of the caller's photos. Blob removal is best effort.
    pub async fn delete_photo(&self, ctx: &RequestContext, photo_id: Uuid) -> AppResult<()> {
        let photo = self.get_photo(ctx, photo_id).await?;

        if let Err(e) = self.storage.delete(&photo.storage_path).await {
            warn!(
                photo_id = %photo_id,
                path = %photo.storage_path,
                error = %e,
                "Failed to remove photo blob; deleting the record anyway"
            );
        }

        if !self.photos.delete(photo_id).await? {
            return Err(AppError::not_found("Photo not found"));
        }

        info!(user_id = %ctx.user_id, photo_id = %photo_id, "Photo deleted");
        Ok(())
    }
}

fn clean_file_name(file_name: &str) -> AppResult<String> {
    let name = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() {
        return Ok("photo".to_string());
    }
    if name.chars().count() > MAX_FILE_NAME_LENGTH {
        return Err(AppError::validation(format!(
            "File name must be at most {MAX_FILE_NAME_LENGTH} characters"
        )));
    }
    Ok(name.to_string())
}

fn clean_caption(caption: Option<String>) -> AppResult<Option<String>> {
    let Some(caption) = caption else {
        return Ok(None);
    };
    let caption = caption.trim();
    if caption.is_empty() {
        return Ok(None);
    }
    if caption.chars().count() > MAX_CAPTION_LENGTH {
        return Err(AppError::validation(format!(
            "Caption must be at most {MAX_CAPTION_LENGTH} characters"
        )));
    }
    Ok(Some(caption.to_string()))
}

/// File extension for the blob path: the uploaded name's extension when
/// it is plain alphanumeric, otherwise the MIME subtype.
fn extension_for(file_name: &str, mime_type: &str) -> String {
    let is_safe = |ext: &str| {
        !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric())
    };

    if let Some((stem, ext)) = file_name.rsplit_once('.') {
        if !stem.is_empty() && is_safe(ext) {
            return ext.to_ascii_lowercase();
        }
    }

    let subtype = mime_type
        .trim_start_matches("image/")
        .split(['+', ';'])
        .next()
        .unwrap_or_default();
    if is_safe(subtype) {
        subtype.to_string()
    } else {
        "bin".to_string()
    }
}
