//! In-memory implementation of the store traits.
//!
//! Same semantics as the PostgreSQL repositories, including the
//! `photos.folder_id` foreign key and its `ON DELETE CASCADE`, but
//! nothing survives a restart. Used by tests and the `memory` provider.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use giftbox_core::error::AppError;
use giftbox_core::result::AppResult;
use giftbox_core::types::pagination::{PageRequest, PageResponse};
use giftbox_entity::folder::{CreateFolder, Folder};
use giftbox_entity::photo::{CreatePhoto, Photo};
use giftbox_entity::user::{CreateUser, User};

use crate::store::{FolderStore, PhotoStore, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    folders: HashMap<Uuid, Folder>,
    photos: HashMap<Uuid, Photo>,
}

impl Tables {
    fn photos_in(&self, folder_id: Uuid) -> Vec<Photo> {
        let mut photos: Vec<Photo> = self
            .photos
            .values()
            .filter(|p| p.folder_id == Some(folder_id))
            .cloned()
            .collect();
        sort_oldest_first(&mut photos);
        photos
    }
}

fn sort_oldest_first(photos: &mut [Photo]) {
    photos.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
}

fn paginate<T>(items: Vec<T>, page: &PageRequest) -> PageResponse<T> {
    let total = items.len() as u64;
    let items = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect();
    PageResponse::new(items, page, total)
}

/// A shared set of in-memory tables. Each store handle obtained from it
/// sees the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// User store handle.
    pub fn users(&self) -> MemoryUserStore {
        MemoryUserStore {
            tables: Arc::clone(&self.tables),
        }
    }

    /// Folder store handle.
    pub fn folders(&self) -> MemoryFolderStore {
        MemoryFolderStore {
            tables: Arc::clone(&self.tables),
        }
    }

    /// Photo store handle.
    pub fn photos(&self) -> MemoryPhotoStore {
        MemoryPhotoStore {
            tables: Arc::clone(&self.tables),
        }
    }
}

/// In-memory [`UserStore`].
#[derive(Debug, Clone)]
pub struct MemoryUserStore {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<User>> {
        let mut users: Vec<User> = self.tables.read().await.users.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(paginate(users, page))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == data.username) {
            return Err(AppError::conflict(format!(
                "Username '{}' is already taken",
                data.username
            )));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: data.username.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            role: data.role,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn record_login(&self, id: Uuid) -> AppResult<()> {
        if let Some(user) = self.tables.write().await.users.get_mut(&id) {
            user.last_login_at = Some(Utc::now());
        }
        Ok(())
    }
}

/// In-memory [`FolderStore`].
#[derive(Debug, Clone)]
pub struct MemoryFolderStore {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl FolderStore for MemoryFolderStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        Ok(self.tables.read().await.folders.get(&id).cloned())
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Folder>> {
        let mut folders: Vec<Folder> = self
            .tables
            .read()
            .await
            .folders
            .values()
            .filter(|f| f.owner_id == owner_id)
            .cloned()
            .collect();
        folders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(paginate(folders, page))
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let now = Utc::now();
        let folder = Folder {
            id: Uuid::new_v4(),
            owner_id: data.owner_id,
            name: data.name.clone(),
            secret_hash: data.secret_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        self.tables
            .write()
            .await
            .folders
            .insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn rename(&self, id: Uuid, name: &str) -> AppResult<Folder> {
        let mut tables = self.tables.write().await;
        let folder = tables
            .folders
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
        folder.name = name.to_string();
        folder.updated_at = Utc::now();
        Ok(folder.clone())
    }

    async fn set_secret_hash(&self, id: Uuid, secret_hash: Option<&str>) -> AppResult<Folder> {
        let mut tables = self.tables.write().await;
        let folder = tables
            .folders
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
        folder.secret_hash = secret_hash.map(String::from);
        folder.updated_at = Utc::now();
        Ok(folder.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.folders.remove(&id).is_none() {
            return Ok(false);
        }
        tables.photos.retain(|_, p| p.folder_id != Some(id));
        Ok(true)
    }
}

/// In-memory [`PhotoStore`].
#[derive(Debug, Clone)]
pub struct MemoryPhotoStore {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl PhotoStore for MemoryPhotoStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Photo>> {
        Ok(self.tables.read().await.photos.get(&id).cloned())
    }

    async fn list_by_folder(&self, folder_id: Uuid) -> AppResult<Vec<Photo>> {
        Ok(self.tables.read().await.photos_in(folder_id))
    }

    async fn list_unfiled(&self, owner_id: Uuid) -> AppResult<Vec<Photo>> {
        let mut photos: Vec<Photo> = self
            .tables
            .read()
            .await
            .photos
            .values()
            .filter(|p| p.owner_id == owner_id && p.folder_id.is_none())
            .cloned()
            .collect();
        sort_oldest_first(&mut photos);
        Ok(photos)
    }

    async fn count_by_folder(&self, folder_id: Uuid) -> AppResult<u64> {
        let tables = self.tables.read().await;
        Ok(tables
            .photos
            .values()
            .filter(|p| p.folder_id == Some(folder_id))
            .count() as u64)
    }

    async fn create(&self, data: &CreatePhoto) -> AppResult<Photo> {
        let mut tables = self.tables.write().await;
        if let Some(folder_id) = data.folder_id {
            if !tables.folders.contains_key(&folder_id) {
                return Err(AppError::not_found("Folder not found"));
            }
        }

        let photo = Photo {
            id: data.id,
            owner_id: data.owner_id,
            folder_id: data.folder_id,
            file_name: data.file_name.clone(),
            storage_path: data.storage_path.clone(),
            mime_type: data.mime_type.clone(),
            size_bytes: data.size_bytes,
            caption: data.caption.clone(),
            created_at: Utc::now(),
        };
        tables.photos.insert(photo.id, photo.clone());
        Ok(photo)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.tables.write().await.photos.remove(&id).is_some())
    }

    async fn delete_by_folder(&self, folder_id: Uuid) -> AppResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.photos.len();
        tables.photos.retain(|_, p| p.folder_id != Some(folder_id));
        Ok((before - tables.photos.len()) as u64)
    }
}
