//! Shared fixtures for service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use giftbox_core::error::AppError;
use giftbox_core::result::AppResult;
use giftbox_core::traits::storage::StorageProvider;
use giftbox_database::Stores;
use giftbox_entity::user::UserRole;
use giftbox_storage::MemoryStorageProvider;

use crate::context::RequestContext;
use crate::folder::FolderService;
use crate::photo::{PhotoService, UploadPhotoRequest};

/// Blob storage that records every delete request and can be told to
/// fail them.
#[derive(Debug, Default)]
pub(crate) struct RecordingStorage {
    inner: MemoryStorageProvider,
    fail_deletes: bool,
    deleted: Mutex<Vec<String>>,
}

impl RecordingStorage {
    pub(crate) fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Self::default()
        }
    }

    pub(crate) fn deleted(&self) -> Vec<String> {
        self.deleted.lock().map(|d| d.clone()).unwrap_or_default()
    }

    pub(crate) fn object_count(&self) -> usize {
        self.inner.len()
    }
}

#[async_trait]
impl StorageProvider for RecordingStorage {
    fn provider_type(&self) -> &str {
        "recording"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        self.inner.read_bytes(path).await
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        self.inner.write(path, data).await
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        if let Ok(mut deleted) = self.deleted.lock() {
            deleted.push(path.to_string());
        }
        if self.fail_deletes {
            return Err(AppError::storage(format!("Simulated outage deleting {path}")));
        }
        self.inner.delete(path).await
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        self.inner.exists(path).await
    }
}

pub(crate) struct Fixture {
    pub stores: Stores,
    pub storage: Arc<RecordingStorage>,
    pub folders: FolderService,
    pub photos: PhotoService,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::with_storage(RecordingStorage::default())
    }

    pub(crate) fn with_storage(storage: RecordingStorage) -> Self {
        let stores = Stores::memory();
        let storage = Arc::new(storage);
        let folders = FolderService::new(
            Arc::clone(&stores.folders),
            Arc::clone(&stores.photos),
            storage.clone(),
        );
        let photos = PhotoService::new(
            Arc::clone(&stores.folders),
            Arc::clone(&stores.photos),
            storage.clone(),
            1024,
        );
        Self {
            stores,
            storage,
            folders,
            photos,
        }
    }

    /// Upload a small JPEG into `folder_id` as `ctx`.
    pub(crate) async fn upload(&self, ctx: &RequestContext, folder_id: Option<Uuid>) -> Uuid {
        self.photos
            .upload_photo(
                ctx,
                UploadPhotoRequest {
                    folder_id,
                    caption: None,
                    file_name: "sunset.jpg".to_string(),
                    mime_type: "image/jpeg".to_string(),
                    data: Bytes::from_static(b"\xff\xd8\xff\xe0jpeg"),
                },
            )
            .await
            .expect("upload photo")
            .id
    }
}

pub(crate) fn member(name: &str) -> RequestContext {
    RequestContext::new(Uuid::new_v4(), UserRole::Member, name)
}
