//! Folder lifecycle with owner-only access and optional secret gating.
//!
//! A protected folder is readable by its owner on identity alone.
//! Deleting it, or changing its secret, additionally requires the
//! current secret.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use giftbox_auth::ownership::OwnershipGuard;
use giftbox_auth::password::PasswordHasher;
use giftbox_core::error::AppError;
use giftbox_core::result::AppResult;
use giftbox_core::traits::storage::StorageProvider;
use giftbox_core::types::pagination::{PageRequest, PageResponse};
use giftbox_database::store::{FolderStore, PhotoStore};
use giftbox_entity::folder::{CreateFolder, Folder};

use crate::context::RequestContext;

const MAX_FOLDER_NAME_LENGTH: usize = 255;

/// Manages folders and their secrets.
#[derive(Debug, Clone)]
pub struct FolderService {
    folders: Arc<dyn FolderStore>,
    photos: Arc<dyn PhotoStore>,
    storage: Arc<dyn StorageProvider>,
    hasher: PasswordHasher,
}

/// Request to create a folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Optional secret protecting the folder.
    pub secret: Option<String>,
}

/// A folder together with how many photos it holds.
#[derive(Debug, Clone, Serialize)]
pub struct FolderDetails {
    /// The folder.
    pub folder: Folder,
    /// Number of photos inside.
    pub photo_count: u64,
}

/// A blob that could not be removed while deleting a folder.
#[derive(Debug, Clone, Serialize)]
pub struct StorageCleanupFailure {
    /// Photo whose blob was left behind.
    pub photo_id: Uuid,
    /// Object path that failed to delete.
    pub storage_path: String,
    /// Error reported by the storage provider.
    pub error: String,
}

/// Outcome of a folder deletion.
#[derive(Debug, Clone, Serialize)]
pub struct FolderDeletion {
    /// The deleted folder.
    pub folder_id: Uuid,
    /// Photo rows removed with it.
    pub photos_removed: u64,
    /// Blobs whose removal failed. Never causes the deletion to fail.
    pub storage_failures: Vec<StorageCleanupFailure>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        photos: Arc<dyn PhotoStore>,
        storage: Arc<dyn StorageProvider>,
    ) -> Self {
        Self {
            folders,
            photos,
            storage,
            hasher: PasswordHasher::new(),
        }
    }

    /// Lists the caller's folders, newest first.
    pub async fn list_folders(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<Folder>> {
        self.folders.list_by_owner(ctx.user_id, &page).await
    }

    /// Creates a folder owned by the caller, hashing the secret if given.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> AppResult<Folder> {
        let name = validate_name(&req.name)?;
        let secret_hash = match req.secret.as_deref() {
            Some(secret) => Some(self.hash_secret(secret)?),
            None => None,
        };

        let folder = self
            .folders
            .create(&CreateFolder {
                owner_id: ctx.user_id,
                name,
                secret_hash,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            protected = folder.is_protected(),
            "Folder created"
        );

        Ok(folder)
    }

    /// Gets one of the caller's folders.
    pub async fn get_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<Folder> {
        let folder = self.load(folder_id).await?;
        OwnershipGuard::authorize(ctx.user_id, &folder)?;
        Ok(folder)
    }

    /// Gets one of the caller's folders with its photo count.
    pub async fn get_folder_details(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> AppResult<FolderDetails> {
        let folder = self.get_folder(ctx, folder_id).await?;
        let photo_count = self.photos.count_by_folder(folder.id).await?;
        Ok(FolderDetails {
            folder,
            photo_count,
        })
    }

    /// Renames one of the caller's folders.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        new_name: &str,
    ) -> AppResult<Folder> {
        let name = validate_name(new_name)?;
        self.get_folder(ctx, folder_id).await?;

        let folder = self.folders.rename(folder_id, &name).await?;
        info!(user_id = %ctx.user_id, folder_id = %folder_id, "Folder renamed");
        Ok(folder)
    }

    /// Sets, changes or clears a folder's secret. When the folder is
    /// already protected, `current` must match the existing secret.
    pub async fn set_secret(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        current: Option<&str>,
        new_secret: Option<&str>,
    ) -> AppResult<Folder> {
        let folder = self.get_folder(ctx, folder_id).await?;

        if let Some(hash) = folder.secret_hash.as_deref() {
            let current = current.ok_or_else(|| {
                AppError::bad_request("The current folder secret is required to change it")
            })?;
            if !self.hasher.verify(current, hash) {
                return Err(AppError::authentication("Incorrect folder secret"));
            }
        }

        let secret_hash = match new_secret {
            Some(secret) => Some(self.hash_secret(secret)?),
            None => None,
        };

        let folder = self
            .folders
            .set_secret_hash(folder_id, secret_hash.as_deref())
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            protected = folder.is_protected(),
            "Folder secret updated"
        );

        Ok(folder)
    }

    /// Checks a supplied secret against a folder's stored hash.
    pub async fn verify_secret(&self, folder_id: Uuid, supplied: &str) -> AppResult<()> {
        let folder = self.load(folder_id).await?;
        self.check_secret(&folder, supplied)
    }

    /// Existence, ownership, then secret check. Gates navigation into a
    /// protected folder.
    pub async fn verify_access(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        secret: &str,
    ) -> AppResult<Folder> {
        let folder = self.get_folder(ctx, folder_id).await?;
        self.check_secret(&folder, secret)?;
        info!(user_id = %ctx.user_id, folder_id = %folder_id, "Folder secret verified");
        Ok(folder)
    }

    /// Deletes a folder with all of its photos.
    ///
    /// Every check runs before anything is removed. Blob removal is best
    /// effort: failures are logged and reported, and the metadata is
    /// deleted regardless.
    pub async fn delete_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        secret: Option<&str>,
    ) -> AppResult<FolderDeletion> {
        let folder = self.get_folder(ctx, folder_id).await?;

        if folder.access().requires_secret() {
            let secret = secret.ok_or_else(|| {
                AppError::bad_request("This folder is password protected; the secret is required")
            })?;
            self.check_secret(&folder, secret)?;
        }

        let photos = self.photos.list_by_folder(folder_id).await?;
        let mut storage_failures = Vec::new();
        for photo in &photos {
            if let Err(e) = self.storage.delete(&photo.storage_path).await {
                warn!(
                    folder_id = %folder_id,
                    photo_id = %photo.id,
                    path = %photo.storage_path,
                    error = %e,
                    "Failed to remove photo blob; continuing with folder deletion"
                );
                storage_failures.push(StorageCleanupFailure {
                    photo_id: photo.id,
                    storage_path: photo.storage_path.clone(),
                    error: e.message,
                });
            }
        }

        let photos_removed = self.photos.delete_by_folder(folder_id).await?;
        if !self.folders.delete(folder_id).await? {
            return Err(AppError::not_found("Folder not found"));
        }

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            photos_removed,
            storage_failures = storage_failures.len(),
            "Folder deleted"
        );

        Ok(FolderDeletion {
            folder_id,
            photos_removed,
            storage_failures,
        })
    }

    async fn load(&self, folder_id: Uuid) -> AppResult<Folder> {
        self.folders
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    fn check_secret(&self, folder: &Folder, supplied: &str) -> AppResult<()> {
        let Some(hash) = folder.secret_hash.as_deref() else {
            return Err(AppError::bad_request("Folder is not password protected"));
        };
        if !self.hasher.verify(supplied, hash) {
            warn!(folder_id = %folder.id, "Incorrect folder secret supplied");
            return Err(AppError::authentication("Incorrect folder secret"));
        }
        Ok(())
    }

    fn hash_secret(&self, secret: &str) -> AppResult<String> {
        if secret.is_empty() {
            return Err(AppError::validation("Folder secret cannot be empty"));
        }
        self.hasher.hash(secret)
    }
}

fn validate_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Folder name cannot be empty"));
    }
    if name.chars().count() > MAX_FOLDER_NAME_LENGTH {
        return Err(AppError::validation(format!(
            "Folder name must be at most {MAX_FOLDER_NAME_LENGTH} characters"
        )));
    }
    Ok(name.to_string())
}
