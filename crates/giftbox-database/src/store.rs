//! Store traits: the persistence interface consumed by the service layer.
//!
//! Implementations: PostgreSQL ([`crate::repositories`]) and in-memory
//! ([`crate::memory`]). The PostgreSQL schema indexes folders by owner and
//! photos by folder for listing and cascade lookups; the in-memory store
//! filters its tables.

use async_trait::async_trait;
use uuid::Uuid;

use giftbox_core::result::AppResult;
use giftbox_core::types::pagination::{PageRequest, PageResponse};
use giftbox_entity::folder::{CreateFolder, Folder};
use giftbox_entity::photo::{CreatePhoto, Photo};
use giftbox_entity::user::{CreateUser, User};

/// Persistence for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// List users ordered by username.
    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<User>>;

    /// Insert a user. Fails with `Conflict` if the username is taken.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Stamp `last_login_at` with the current time.
    async fn record_login(&self, id: Uuid) -> AppResult<()>;
}

/// Persistence for folders.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a folder by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>>;

    /// List an owner's folders, newest first.
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Folder>>;

    /// Insert a folder.
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Change a folder's name. `NotFound` if the folder is gone.
    async fn rename(&self, id: Uuid, name: &str) -> AppResult<Folder>;

    /// Replace (or clear) a folder's secret hash. `NotFound` if the folder is gone.
    async fn set_secret_hash(&self, id: Uuid, secret_hash: Option<&str>) -> AppResult<Folder>;

    /// Delete a folder row. Returns `false` if it did not exist.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Persistence for photos.
#[async_trait]
pub trait PhotoStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a photo by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Photo>>;

    /// All photos in a folder, oldest first.
    async fn list_by_folder(&self, folder_id: Uuid) -> AppResult<Vec<Photo>>;

    /// An owner's photos that are not in any folder, oldest first.
    async fn list_unfiled(&self, owner_id: Uuid) -> AppResult<Vec<Photo>>;

    /// Count photos in a folder.
    async fn count_by_folder(&self, folder_id: Uuid) -> AppResult<u64>;

    /// Insert a photo. Fails with `NotFound` if the folder no longer exists.
    async fn create(&self, data: &CreatePhoto) -> AppResult<Photo>;

    /// Delete a photo row. Returns `false` if it did not exist.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Delete every photo row in a folder. Returns the number removed.
    async fn delete_by_folder(&self, folder_id: Uuid) -> AppResult<u64>;
}
