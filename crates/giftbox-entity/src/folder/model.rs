//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::access::FolderAccess;

/// A photo folder, optionally gated by a secret.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// The user who created the folder. Never changes.
    pub owner_id: Uuid,
    /// Display name.
    pub name: String,
    /// Argon2 hash of the folder secret; `None` for unprotected folders.
    #[serde(skip_serializing)]
    pub secret_hash: Option<String>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last renamed or re-keyed.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Whether a secret is required for sensitive operations.
    pub fn is_protected(&self) -> bool {
        self.secret_hash.is_some()
    }

    /// The access state of this folder.
    pub fn access(&self) -> FolderAccess {
        FolderAccess::from_secret_hash(self.secret_hash.as_deref())
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// The folder owner.
    pub owner_id: Uuid,
    /// Folder name.
    pub name: String,
    /// Pre-hashed secret, if the folder is protected.
    pub secret_hash: Option<String>,
}
