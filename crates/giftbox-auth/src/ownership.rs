//! Owner-only access to folders and photos.
//!
//! Every folder and photo has exactly one owner and nothing is shared.
//! The guard compares identities only; callers load the resource (and
//! report `NotFound`) before asking.

use tracing::warn;
use uuid::Uuid;

use giftbox_core::error::AppError;
use giftbox_core::result::AppResult;
use giftbox_entity::folder::Folder;
use giftbox_entity::photo::Photo;

/// A resource with a single owning user.
pub trait Owned {
    /// The owning user's ID.
    fn owner_id(&self) -> Uuid;

    /// Whether `user_id` owns this resource.
    fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id() == user_id
    }
}

impl Owned for Folder {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}

impl Owned for Photo {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}

/// Rejects principals acting on resources they do not own.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnershipGuard;

impl OwnershipGuard {
    /// `Ok` if `principal_id` owns `resource`, `Authorization` otherwise.
    pub fn authorize<R: Owned + ?Sized>(principal_id: Uuid, resource: &R) -> AppResult<()> {
        if resource.is_owned_by(principal_id) {
            return Ok(());
        }
        warn!(
            principal_id = %principal_id,
            owner_id = %resource.owner_id(),
            "Rejected access to a resource owned by another user"
        );
        Err(AppError::authorization(
            "You do not have permission to access this resource",
        ))
    }
}
